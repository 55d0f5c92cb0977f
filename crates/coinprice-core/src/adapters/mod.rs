//! Exchange adapters.
//!
//! | Adapter | Market convention | Quote currency |
//! |---------|-------------------|----------------|
//! | [`BinanceAdapter`] | `{S}USDT` | USDT, converted to KRW |
//! | [`UpbitAdapter`] | `KRW-{S}` | KRW |
//! | [`BithumbAdapter`] | `{S}_KRW` | KRW |
//! | [`CoinbaseAdapter`] | exchange rates for `{S}` | USD, converted to KRW |

mod binance;
mod bithumb;
mod coinbase;
pub(crate) mod upbit;

pub use binance::BinanceAdapter;
pub use bithumb::BithumbAdapter;
pub use coinbase::CoinbaseAdapter;
pub use upbit::UpbitAdapter;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::data_source::SourceError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::ExchangeId;

/// Perform one GET and return the body of a 2xx response.
pub(crate) async fn fetch_body(
    http_client: &dyn HttpClient,
    exchange: ExchangeId,
    url: &str,
) -> Result<String, SourceError> {
    let request = HttpRequest::get(url);
    let response = http_client.execute(request).await.map_err(|error| {
        SourceError::unavailable(exchange, format!("transport error: {}", error.message()))
    })?;

    if !response.is_success() {
        return Err(SourceError::unavailable(
            exchange,
            format!("upstream returned status {}", response.status),
        ));
    }

    Ok(response.body)
}

/// GET and decode a JSON payload.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    http_client: &dyn HttpClient,
    exchange: ExchangeId,
    url: &str,
) -> Result<T, SourceError> {
    let body = fetch_body(http_client, exchange, url).await?;
    serde_json::from_str(&body).map_err(|error| {
        SourceError::unavailable(exchange, format!("failed to parse response: {error}"))
    })
}

/// Read a usable price from a JSON number or numeric string.
///
/// Missing, non-numeric, non-finite and zero values are all unusable.
pub(crate) fn usable_price(value: Option<&Value>) -> Option<f64> {
    let price = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => raw.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (price.is_finite() && price != 0.0).then_some(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn usable_price_accepts_numbers_and_numeric_strings() {
        assert_eq!(usable_price(Some(&json!(1.5))), Some(1.5));
        assert_eq!(usable_price(Some(&json!(" 0.0042 "))), Some(0.0042));
    }

    #[test]
    fn usable_price_rejects_zero_and_garbage() {
        assert_eq!(usable_price(None), None);
        assert_eq!(usable_price(Some(&json!(0))), None);
        assert_eq!(usable_price(Some(&json!("0.00000000"))), None);
        assert_eq!(usable_price(Some(&json!("n/a"))), None);
        assert_eq!(usable_price(Some(&json!(null))), None);
        assert_eq!(usable_price(Some(&json!({"price": 1}))), None);
    }
}
