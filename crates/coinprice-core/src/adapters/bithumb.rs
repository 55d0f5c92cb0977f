use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::{fetch_json, usable_price};
use crate::data_source::{ExchangeClient, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::price_format::group_ko;
use crate::{ExchangeId, ExchangeRate, ListingStatus, Quote, Symbol};

const TICKER_URL: &str = "https://api.bithumb.com/public/ticker";

/// Bithumb's success sentinel; the API answers HTTP 200 for most errors.
const STATUS_OK: &str = "0000";

/// Bithumb KRW market adapter quoting `{S}_KRW`.
#[derive(Clone)]
pub struct BithumbAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl Default for BithumbAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl BithumbAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    fn ticker_url(symbol: &Symbol) -> String {
        format!(
            "{TICKER_URL}/{}_KRW",
            urlencoding::encode(symbol.as_str())
        )
    }

    async fn ticker(&self, symbol: &Symbol) -> Result<BithumbTickerResponse, SourceError> {
        let response: BithumbTickerResponse = fetch_json(
            self.http_client.as_ref(),
            ExchangeId::Bithumb,
            &Self::ticker_url(symbol),
        )
        .await?;

        if !response.is_ok() {
            return Err(SourceError::unavailable(
                ExchangeId::Bithumb,
                format!("status {}", response.status_text()),
            ));
        }
        Ok(response)
    }
}

impl ExchangeClient for BithumbAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bithumb
    }

    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
        _rate: ExchangeRate,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let response = self.ticker(symbol).await?;
            let closing_price = response
                .data
                .as_ref()
                .and_then(|data| data.get("closing_price"));
            let price = usable_price(closing_price).ok_or_else(|| {
                SourceError::unavailable(ExchangeId::Bithumb, "closing_price missing or zero")
            })?;

            Ok(Quote::local(ExchangeId::Bithumb, group_ko(price)))
        })
    }

    fn listing<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = ListingStatus> + Send + 'a>> {
        Box::pin(async move {
            match self.ticker(symbol).await {
                Ok(_) => ListingStatus::listed(ExchangeId::Bithumb, format!("{symbol}/KRW")),
                Err(error) => {
                    tracing::debug!(%error, "bithumb listing check negative");
                    ListingStatus::not_listed(ExchangeId::Bithumb)
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct BithumbTickerResponse {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

impl BithumbTickerResponse {
    fn is_ok(&self) -> bool {
        self.status.as_ref().and_then(Value::as_str) == Some(STATUS_OK)
    }

    fn status_text(&self) -> String {
        match &self.status {
            Some(Value::String(status)) => status.clone(),
            Some(other) => other.to_string(),
            None => String::from("missing"),
        }
    }
}
