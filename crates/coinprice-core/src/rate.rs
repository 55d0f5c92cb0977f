//! USD/KRW conversion rate lookup.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::adapters::upbit::{UpbitTicker, TICKER_URL};
use crate::adapters::{fetch_json, usable_price, UpbitAdapter};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{ExchangeId, ExchangeRate};

/// Source of the conversion rate used for one aggregate request.
///
/// `rate` never fails: any lookup problem yields [`RateProvider::fallback`].
pub trait RateProvider: Send + Sync {
    fn rate<'a>(&'a self) -> Pin<Box<dyn Future<Output = ExchangeRate> + Send + 'a>>;

    fn fallback(&self) -> ExchangeRate;
}

/// Reads the USDT/KRW trade price from Upbit as the USD/KRW rate.
///
/// One attempt per call, nothing cached.
#[derive(Clone)]
pub struct UpbitUsdtRateProvider {
    http_client: Arc<dyn HttpClient>,
    fallback: ExchangeRate,
}

impl Default for UpbitUsdtRateProvider {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), ExchangeRate::fallback())
    }
}

impl UpbitUsdtRateProvider {
    pub fn new(http_client: Arc<dyn HttpClient>, fallback: ExchangeRate) -> Self {
        Self {
            http_client,
            fallback,
        }
    }

    async fn fetch(&self) -> Option<ExchangeRate> {
        let url = UpbitAdapter::ticker_url("KRW-USDT");
        let tickers: Vec<UpbitTicker> =
            match fetch_json(self.http_client.as_ref(), ExchangeId::Upbit, &url).await {
                Ok(tickers) => tickers,
                Err(error) => {
                    tracing::warn!(%error, fallback = %self.fallback, "usd/krw rate lookup failed");
                    return None;
                }
            };

        let value = tickers
            .first()
            .and_then(|ticker| usable_price(ticker.trade_price.as_ref()));
        match value.map(ExchangeRate::new) {
            Some(Ok(rate)) => Some(rate),
            _ => {
                tracing::warn!(
                    fallback = %self.fallback,
                    endpoint = TICKER_URL,
                    "usd/krw rate payload unusable"
                );
                None
            }
        }
    }
}

impl RateProvider for UpbitUsdtRateProvider {
    fn rate<'a>(&'a self) -> Pin<Box<dyn Future<Output = ExchangeRate> + Send + 'a>> {
        Box::pin(async move { self.fetch().await.unwrap_or(self.fallback) })
    }

    fn fallback(&self) -> ExchangeRate {
        self.fallback
    }
}

/// Constant rate, for offline runs and deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateProvider(pub ExchangeRate);

impl RateProvider for FixedRateProvider {
    fn rate<'a>(&'a self) -> Pin<Box<dyn Future<Output = ExchangeRate> + Send + 'a>> {
        let rate = self.0;
        Box::pin(async move { rate })
    }

    fn fallback(&self) -> ExchangeRate {
        self.0
    }
}
