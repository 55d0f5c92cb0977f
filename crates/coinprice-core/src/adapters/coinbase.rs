use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::{fetch_json, usable_price};
use crate::data_source::{ExchangeClient, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::price_format::converted_price;
use crate::{ExchangeId, ExchangeRate, ListingStatus, Quote, Symbol};

const EXCHANGE_RATES_URL: &str = "https://api.coinbase.com/v2/exchange-rates";

/// Coinbase adapter reading the USD rate of `{S}`.
#[derive(Clone)]
pub struct CoinbaseAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl Default for CoinbaseAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl CoinbaseAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    fn rates_url(symbol: &Symbol) -> String {
        format!(
            "{EXCHANGE_RATES_URL}?currency={}",
            urlencoding::encode(symbol.as_str())
        )
    }

    async fn usd_rate(&self, symbol: &Symbol) -> Result<Option<Value>, SourceError> {
        let response: CoinbaseRatesResponse = fetch_json(
            self.http_client.as_ref(),
            ExchangeId::Coinbase,
            &Self::rates_url(symbol),
        )
        .await?;

        Ok(response
            .data
            .and_then(|data| data.rates)
            .and_then(|mut rates| rates.remove("USD")))
    }
}

impl ExchangeClient for CoinbaseAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Coinbase
    }

    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
        rate: ExchangeRate,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let usd = self.usd_rate(symbol).await?;
            let price = usable_price(usd.as_ref()).ok_or_else(|| {
                SourceError::unavailable(ExchangeId::Coinbase, "USD rate missing or zero")
            })?;

            Ok(Quote::converted(
                ExchangeId::Coinbase,
                converted_price(price, "USD", rate.value()),
                "USD/KRW",
            ))
        })
    }

    fn listing<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = ListingStatus> + Send + 'a>> {
        Box::pin(async move {
            match self.usd_rate(symbol).await {
                Ok(Some(usd)) if is_present(&usd) => {
                    ListingStatus::listed(ExchangeId::Coinbase, format!("{symbol}/USD"))
                }
                Ok(_) => ListingStatus::not_listed(ExchangeId::Coinbase),
                Err(error) => {
                    tracing::debug!(%error, "coinbase listing check negative");
                    ListingStatus::not_listed(ExchangeId::Coinbase)
                }
            }
        })
    }
}

/// A rate entry counts as present unless it is null, empty or numeric zero.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(raw) => !raw.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => true,
    }
}

#[derive(Debug, Deserialize)]
struct CoinbaseRatesResponse {
    #[serde(default)]
    data: Option<CoinbaseRatesData>,
}

#[derive(Debug, Deserialize)]
struct CoinbaseRatesData {
    #[serde(default)]
    rates: Option<HashMap<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpResponse, ScriptedHttpClient};

    fn adapter(response: HttpResponse) -> CoinbaseAdapter {
        CoinbaseAdapter::with_http_client(Arc::new(
            ScriptedHttpClient::new().respond(EXCHANGE_RATES_URL, response),
        ))
    }

    #[tokio::test]
    async fn quote_converts_usd_rate() {
        let adapter = adapter(HttpResponse::ok_json(
            r#"{"data":{"currency":"SHIB","rates":{"USD":"0.0000123","KRW":"0.0166"}}}"#,
        ));
        let symbol = Symbol::parse("SHIB").expect("valid symbol");

        let quote = adapter
            .quote(&symbol, ExchangeRate::new(1400.0).expect("valid rate"))
            .await
            .expect("quote should succeed");

        assert_eq!(quote.display_price, "0.00001230 USD (≈0.017 KRW)");
        assert_eq!(quote.currency_label, "USD/KRW");
    }

    #[tokio::test]
    async fn missing_usd_rate_fails_quote_and_listing() {
        let adapter = adapter(HttpResponse::ok_json(
            r#"{"data":{"currency":"ABC","rates":{"EUR":"1.0"}}}"#,
        ));
        let symbol = Symbol::parse("ABC").expect("valid symbol");

        assert!(adapter
            .quote(&symbol, ExchangeRate::fallback())
            .await
            .is_err());
        assert!(!adapter.listing(&symbol).await.listed);
    }

    #[tokio::test]
    async fn unknown_currency_error_payload_is_not_listed() {
        let adapter = adapter(HttpResponse::with_status(
            400,
            r#"{"errors":[{"id":"invalid_request","message":"Invalid currency"}]}"#,
        ));
        let symbol = Symbol::parse("NOPE").expect("valid symbol");

        assert_eq!(
            adapter.listing(&symbol).await,
            ListingStatus::not_listed(ExchangeId::Coinbase)
        );
    }

    #[tokio::test]
    async fn zero_string_rate_is_listed_but_not_quotable() {
        let adapter = adapter(HttpResponse::ok_json(
            r#"{"data":{"currency":"DEAD","rates":{"USD":"0.0"}}}"#,
        ));
        let symbol = Symbol::parse("DEAD").expect("valid symbol");

        assert!(adapter.listing(&symbol).await.listed);
        assert!(adapter
            .quote(&symbol, ExchangeRate::fallback())
            .await
            .is_err());
    }
}
