//! Number rendering rules shared by adapters and replies.
//!
//! Grouped numbers follow ko-KR conventions: comma thousands separators and
//! at most three fraction digits with trailing zeros dropped. Values exactly
//! halfway between two outputs round away from zero.

const GROUPED_FRACTION_DIGITS: usize = 3;

/// Render `value` with thousands separators and up to three decimals.
pub fn group_ko(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "∞" } else { "-∞" });
    }

    let rounded = fixed(value.abs(), GROUPED_FRACTION_DIGITS);
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (rounded.as_str(), ""),
    };
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    push_grouped_digits(&mut out, int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Render a foreign-currency price, widening precision for sub-unit coins.
///
/// Below 0.001 prints 8 decimals, below 1 prints 6, otherwise grouped.
pub fn foreign_price(price: f64) -> String {
    if price < 0.001 {
        fixed(price, 8)
    } else if price < 1.0 {
        fixed(price, 6)
    } else {
        group_ko(price)
    }
}

/// `"{price} {unit} (≈{krw} KRW)"` for quotes converted at `rate`.
pub fn converted_price(price: f64, unit: &str, rate: f64) -> String {
    format!(
        "{} {unit} (≈{} KRW)",
        foreign_price(price),
        group_ko(price * rate)
    )
}

/// `value` with exactly `digits` decimals, ties away from zero.
fn fixed(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    let body = if is_exact_tie(magnitude, digits) {
        // The tie has exactly one more decimal than requested, and it is a 5.
        let exact = format!("{:.*}", digits + 1, magnitude);
        increment_last_digit(&exact[..exact.len() - 1])
    } else {
        format!("{:.*}", digits, magnitude)
    };
    let body = body.trim_end_matches('.').to_owned();

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// True when `magnitude` sits exactly halfway between two `digits`-decimal
/// values, i.e. `magnitude * 2 * 10^digits` is an odd integer.
///
/// With `magnitude = odd * 2^e` that holds iff `e == -(digits + 1)`, since
/// `10^digits` contributes an odd factor `5^digits` and `2^digits`.
fn is_exact_tie(magnitude: f64, digits: usize) -> bool {
    if !magnitude.is_finite() || magnitude == 0.0 {
        return false;
    }

    let bits = magnitude.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1_u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1_u64 << 52), biased - 1075)
    };

    let exponent = exponent + mantissa.trailing_zeros() as i32;
    i32::try_from(digits).map_or(false, |digits| exponent == -(digits + 1))
}

/// Add one unit in the last place of a plain decimal string.
fn increment_last_digit(decimal: &str) -> String {
    let mut chars = decimal.chars().collect::<Vec<_>>();
    let mut index = chars.len();

    loop {
        if index == 0 {
            chars.insert(0, '1');
            break;
        }
        index -= 1;
        match chars[index] {
            '.' => continue,
            '9' => chars[index] = '0',
            digit => {
                chars[index] = char::from(digit as u8 + 1);
                break;
            }
        }
    }

    chars.into_iter().collect()
}

fn push_grouped_digits(out: &mut String, digits: &str) {
    let len = digits.len();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
}
