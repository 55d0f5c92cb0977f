//! Chat reply rendering.
//!
//! Everything here is a pure function of an aggregate and the render time,
//! so replies are reproducible in tests.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::aggregator::{AggregateResult, ListingAggregate, QuoteAggregate, QuoteClassification};
use crate::price_format::group_ko;
use crate::Quote;

const KO_DATE: &[BorrowedFormatItem<'_>] =
    format_description!("[year]. [month padding:none]. [day padding:none].");
const KO_CLOCK: &[BorrowedFormatItem<'_>] =
    format_description!("[hour repr:12 padding:none]:[minute]:[second]");

/// Render any aggregate with the standard headers.
pub fn render(result: &AggregateResult, rendered_at: OffsetDateTime) -> String {
    match result {
        AggregateResult::Quotes(quotes) => render_quotes(quotes, rendered_at),
        AggregateResult::Listings(listings) => render_listings(listings),
    }
}

/// Multi-exchange quote reply, or the not-found reply when nothing answered.
pub fn render_quotes(result: &QuoteAggregate, rendered_at: OffsetDateTime) -> String {
    if result.classification() == QuoteClassification::AllFailed {
        return not_found(result);
    }

    let header = format!("💰 {} 시세 정보\n\n", result.symbol);
    with_lines_and_footer(header, result, rendered_at)
}

/// Bitcoin shortcut reply. Always lists whatever answered, even nothing.
pub fn render_bitcoin(result: &QuoteAggregate, rendered_at: OffsetDateTime) -> String {
    with_lines_and_footer(String::from("₿ 비트코인 시세 정보\n\n"), result, rendered_at)
}

/// Single-exchange quote reply.
///
/// A failure names the exchange that was asked instead of claiming the coin
/// is missing everywhere.
pub fn render_exchange_quote(result: &QuoteAggregate, rendered_at: OffsetDateTime) -> String {
    if result.classification() == QuoteClassification::AllFailed {
        if let Some(error) = result.failures().next() {
            return format!(
                "❌ {}\n\n💡 /어디 {} 으로 상장 거래소를 먼저 확인해보세요.",
                error.message(),
                result.symbol
            );
        }
    }

    let header = format!("💰 {} 시세 정보\n\n", result.symbol);
    with_lines_and_footer(header, result, rendered_at)
}

pub fn render_listings(result: &ListingAggregate) -> String {
    if !result.listed_anywhere() {
        return format!(
            "❌ {} 코인이 지원하는 거래소에 상장되지 않았습니다.\n\n다른 코인을 확인해보시거나 /coins 로 지원 코인 목록을 확인해주세요.",
            result.symbol
        );
    }

    let mut message = format!("🏪 {} 상장 거래소\n\n", result.symbol);

    let listed = result
        .listed()
        .map(|status| {
            let pair = status.pair.as_deref().unwrap_or_default();
            format!("{} {} ({pair})", status.exchange.badge(), status.exchange.display_name())
        })
        .collect::<Vec<_>>();
    message.push_str("✅ 상장된 거래소:\n");
    message.push_str(&listed.join("\n"));
    message.push_str("\n\n");

    let not_listed = result
        .not_listed()
        .map(|status| format!("🚫 {}", status.exchange.display_name()))
        .collect::<Vec<_>>();
    if !not_listed.is_empty() {
        message.push_str("❌ 상장되지 않은 거래소:\n");
        message.push_str(&not_listed.join("\n"));
        message.push_str("\n\n");
    }

    message.push_str(&format!(
        "💡 /시세 {0} 또는 /가격 {0} 으로 시세를 확인할 수 있습니다.",
        result.symbol
    ));
    message
}

/// ko-KR style timestamp: `2024. 3. 9. 오후 2:05:07`.
pub fn ko_timestamp(at: OffsetDateTime) -> String {
    let meridiem = if at.hour() < 12 { "오전" } else { "오후" };
    let date = at.format(KO_DATE).unwrap_or_default();
    let clock = at.format(KO_CLOCK).unwrap_or_default();

    format!("{date} {meridiem} {clock}")
}

/// Current wall-clock time in the system's local offset, UTC if unknown.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn not_found(result: &QuoteAggregate) -> String {
    format!(
        "❌ {0} 코인을 찾을 수 없습니다.\n\n💡 /어디 {0} 으로 상장 거래소를 먼저 확인해보세요.\n\n지원하는 코인 목록: /coins",
        result.symbol
    )
}

fn with_lines_and_footer(
    mut message: String,
    result: &QuoteAggregate,
    rendered_at: OffsetDateTime,
) -> String {
    for quote in result.quotes() {
        message.push_str(&quote_line(quote));
        message.push('\n');
    }

    message.push_str(&format!("\n💱 USD/KRW 환율: {}", group_ko(result.rate.value())));
    message.push_str(&format!("\n📅 {} 기준", ko_timestamp(rendered_at)));
    message
}

fn quote_line(quote: &Quote) -> String {
    format!(
        "{} {}: {}",
        quote.exchange.badge(),
        quote.exchange.display_name(),
        quote.price_text()
    )
}
