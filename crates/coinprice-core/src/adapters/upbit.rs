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

pub(crate) const TICKER_URL: &str = "https://api.upbit.com/v1/ticker";

/// Upbit KRW market adapter quoting `KRW-{S}`.
#[derive(Clone)]
pub struct UpbitAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl Default for UpbitAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl UpbitAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    pub(crate) fn ticker_url(market: &str) -> String {
        format!("{TICKER_URL}?markets={}", urlencoding::encode(market))
    }

    fn krw_market(symbol: &Symbol) -> String {
        format!("KRW-{symbol}")
    }
}

impl ExchangeClient for UpbitAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Upbit
    }

    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
        _rate: ExchangeRate,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let tickers: Vec<UpbitTicker> = fetch_json(
                self.http_client.as_ref(),
                ExchangeId::Upbit,
                &Self::ticker_url(&Self::krw_market(symbol)),
            )
            .await?;

            let ticker = tickers
                .first()
                .ok_or_else(|| SourceError::unavailable(ExchangeId::Upbit, "empty ticker list"))?;
            let price = usable_price(ticker.trade_price.as_ref()).ok_or_else(|| {
                SourceError::unavailable(ExchangeId::Upbit, "trade_price missing or zero")
            })?;

            Ok(Quote::local(ExchangeId::Upbit, group_ko(price)))
        })
    }

    fn listing<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = ListingStatus> + Send + 'a>> {
        Box::pin(async move {
            let tickers: Result<Vec<Value>, _> = fetch_json(
                self.http_client.as_ref(),
                ExchangeId::Upbit,
                &Self::ticker_url(&Self::krw_market(symbol)),
            )
            .await;

            match tickers {
                Ok(tickers) if !tickers.is_empty() => {
                    ListingStatus::listed(ExchangeId::Upbit, format!("{symbol}/KRW"))
                }
                Ok(_) => ListingStatus::not_listed(ExchangeId::Upbit),
                Err(error) => {
                    tracing::debug!(%error, "upbit listing check negative");
                    ListingStatus::not_listed(ExchangeId::Upbit)
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpbitTicker {
    #[serde(default)]
    pub(crate) trade_price: Option<Value>,
}
