use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::{fetch_body, fetch_json, usable_price};
use crate::data_source::{ExchangeClient, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::price_format::converted_price;
use crate::{ExchangeId, ExchangeRate, ListingStatus, Quote, Symbol};

const TICKER_PRICE_URL: &str = "https://api.binance.com/api/v3/ticker/price";

/// Binance spot adapter quoting `{S}USDT`.
#[derive(Clone)]
pub struct BinanceAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl Default for BinanceAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl BinanceAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    fn ticker_url(symbol: &Symbol) -> String {
        format!(
            "{TICKER_PRICE_URL}?symbol={}USDT",
            urlencoding::encode(symbol.as_str())
        )
    }
}

impl ExchangeClient for BinanceAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Binance
    }

    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
        rate: ExchangeRate,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let payload: BinanceTickerPrice = fetch_json(
                self.http_client.as_ref(),
                ExchangeId::Binance,
                &Self::ticker_url(symbol),
            )
            .await?;

            let price = usable_price(payload.price.as_ref()).ok_or_else(|| {
                SourceError::unavailable(ExchangeId::Binance, "price missing or zero")
            })?;

            Ok(Quote::converted(
                ExchangeId::Binance,
                converted_price(price, "USDT", rate.value()),
                "USDT/KRW",
            ))
        })
    }

    fn listing<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = ListingStatus> + Send + 'a>> {
        Box::pin(async move {
            // Binance answers 400 for unknown pairs, so a 2xx is enough.
            match fetch_body(
                self.http_client.as_ref(),
                ExchangeId::Binance,
                &Self::ticker_url(symbol),
            )
            .await
            {
                Ok(_) => ListingStatus::listed(ExchangeId::Binance, format!("{symbol}/USDT")),
                Err(error) => {
                    tracing::debug!(%error, "binance listing check negative");
                    ListingStatus::not_listed(ExchangeId::Binance)
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct BinanceTickerPrice {
    #[serde(default)]
    price: Option<Value>,
}
