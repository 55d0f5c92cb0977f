//! Fan-out of one symbol lookup to every registered exchange.
//!
//! The aggregator asks all exchanges at once, waits for every call to
//! settle, and returns the outcomes in [`ExchangeId::ALL`] order. It has no
//! error path of its own: the worst case is a result where every source
//! failed, which is an ordinary value.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;

use crate::adapters::{BinanceAdapter, BithumbAdapter, CoinbaseAdapter, UpbitAdapter};
use crate::data_source::{ExchangeClient, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::rate::{RateProvider, UpbitUsdtRateProvider};
use crate::{ExchangeId, ExchangeRate, ListingStatus, Quote, Symbol};

/// Bound applied to each upstream call unless configured otherwise.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Overall shape of a quote aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteClassification {
    /// Every exchange answered with a price.
    Complete,
    /// Some exchanges failed; the rest are shown.
    Partial,
    /// No exchange produced a price.
    AllFailed,
}

/// Per-exchange quote outcomes for one request.
#[derive(Debug, Clone)]
pub struct QuoteAggregate {
    pub symbol: Symbol,
    pub rate: ExchangeRate,
    pub outcomes: Vec<Result<Quote, SourceError>>,
    pub latency_ms: u64,
}

impl QuoteAggregate {
    pub fn classification(&self) -> QuoteClassification {
        let succeeded = self.quotes().count();
        if succeeded == 0 {
            QuoteClassification::AllFailed
        } else if succeeded == self.outcomes.len() {
            QuoteClassification::Complete
        } else {
            QuoteClassification::Partial
        }
    }

    /// Successful quotes in display order.
    pub fn quotes(&self) -> impl Iterator<Item = &Quote> {
        self.outcomes.iter().filter_map(|outcome| outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceError> {
        self.outcomes.iter().filter_map(|outcome| outcome.as_ref().err())
    }

    pub fn exchanges(&self) -> Vec<ExchangeId> {
        self.outcomes
            .iter()
            .map(|outcome| match outcome {
                Ok(quote) => quote.exchange,
                Err(error) => error.exchange(),
            })
            .collect()
    }
}

/// Per-exchange listing outcomes for one request.
#[derive(Debug, Clone)]
pub struct ListingAggregate {
    pub symbol: Symbol,
    pub statuses: Vec<ListingStatus>,
    pub latency_ms: u64,
}

impl ListingAggregate {
    pub fn listed(&self) -> impl Iterator<Item = &ListingStatus> {
        self.statuses.iter().filter(|status| status.listed)
    }

    pub fn not_listed(&self) -> impl Iterator<Item = &ListingStatus> {
        self.statuses.iter().filter(|status| !status.listed)
    }

    pub fn listed_anywhere(&self) -> bool {
        self.statuses.iter().any(|status| status.listed)
    }
}

/// Result of one aggregate request, ready for rendering.
#[derive(Debug, Clone)]
pub enum AggregateResult {
    Quotes(QuoteAggregate),
    Listings(ListingAggregate),
}

impl From<QuoteAggregate> for AggregateResult {
    fn from(value: QuoteAggregate) -> Self {
        Self::Quotes(value)
    }
}

impl From<ListingAggregate> for AggregateResult {
    fn from(value: ListingAggregate) -> Self {
        Self::Listings(value)
    }
}

/// Exchange registry and fan-out engine.
pub struct Aggregator {
    clients: Vec<Arc<dyn ExchangeClient>>,
    rate_provider: Arc<dyn RateProvider>,
    call_timeout: Option<Duration>,
}

impl Default for Aggregator {
    fn default() -> Self {
        AggregatorBuilder::new().build()
    }
}

impl Aggregator {
    /// Register `clients` in display order; a later client with the same id
    /// replaces an earlier one.
    pub fn new(
        clients: Vec<Arc<dyn ExchangeClient>>,
        rate_provider: Arc<dyn RateProvider>,
        call_timeout: Option<Duration>,
    ) -> Self {
        let clients = clients
            .into_iter()
            .map(|client| (client.id().rank(), client))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .collect();
        Self {
            clients,
            rate_provider,
            call_timeout,
        }
    }

    pub fn builder() -> AggregatorBuilder {
        AggregatorBuilder::new()
    }

    pub fn exchanges(&self) -> Vec<ExchangeId> {
        self.clients.iter().map(|client| client.id()).collect()
    }

    pub const fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    /// Quote `symbol` on every registered exchange with one shared rate.
    pub async fn quote(&self, symbol: &Symbol) -> QuoteAggregate {
        self.quote_clients(symbol, self.clients.iter().collect()).await
    }

    /// Quote `symbol` on a single exchange.
    ///
    /// An exchange missing from the registry yields an all-failed aggregate.
    pub async fn quote_on(&self, exchange: ExchangeId, symbol: &Symbol) -> QuoteAggregate {
        let clients = self
            .clients
            .iter()
            .filter(|client| client.id() == exchange)
            .collect::<Vec<_>>();
        if clients.is_empty() {
            return QuoteAggregate {
                symbol: symbol.clone(),
                rate: self.rate_provider.fallback(),
                outcomes: vec![Err(SourceError::unavailable(
                    exchange,
                    "exchange is not registered",
                ))],
                latency_ms: 0,
            };
        }
        self.quote_clients(symbol, clients).await
    }

    /// Check where `symbol` is listed on every registered exchange.
    pub async fn listings(&self, symbol: &Symbol) -> ListingAggregate {
        let started = Instant::now();
        let calls = self.clients.iter().map(|client| async move {
            let exchange = client.id();
            match self.bounded(client.listing(symbol)).await {
                Some(status) => status,
                None => {
                    tracing::debug!(%exchange, %symbol, "listing check timed out");
                    ListingStatus::not_listed(exchange)
                }
            }
        });
        let statuses = join_all(calls).await;

        let aggregate = ListingAggregate {
            symbol: symbol.clone(),
            statuses,
            latency_ms: elapsed_ms(started),
        };
        tracing::info!(
            %symbol,
            listed = aggregate.listed().count(),
            latency_ms = aggregate.latency_ms,
            "listing aggregate complete"
        );
        aggregate
    }

    async fn quote_clients(
        &self,
        symbol: &Symbol,
        clients: Vec<&Arc<dyn ExchangeClient>>,
    ) -> QuoteAggregate {
        let started = Instant::now();
        let rate = self.current_rate().await;

        let calls = clients.into_iter().map(|client| async move {
            let exchange = client.id();
            let outcome = match self.bounded(client.quote(symbol, rate)).await {
                Some(outcome) => outcome,
                None => Err(SourceError::timed_out(
                    exchange,
                    self.call_timeout.unwrap_or_default(),
                )),
            };
            if let Err(error) = &outcome {
                tracing::debug!(%symbol, %error, "exchange quote unavailable");
            }
            outcome
        });
        let outcomes = join_all(calls).await;

        let aggregate = QuoteAggregate {
            symbol: symbol.clone(),
            rate,
            outcomes,
            latency_ms: elapsed_ms(started),
        };
        tracing::info!(
            %symbol,
            %rate,
            succeeded = aggregate.quotes().count(),
            failed = aggregate.failures().count(),
            latency_ms = aggregate.latency_ms,
            "quote aggregate complete"
        );
        aggregate
    }

    async fn current_rate(&self) -> ExchangeRate {
        match self.bounded(self.rate_provider.rate()).await {
            Some(rate) => rate,
            None => {
                let fallback = self.rate_provider.fallback();
                tracing::warn!(%fallback, "usd/krw rate lookup timed out");
                fallback
            }
        }
    }

    /// Run `call` under the per-call timeout; `None` means it timed out.
    async fn bounded<T>(&self, call: impl Future<Output = T>) -> Option<T> {
        match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.ok(),
            None => Some(call.await),
        }
    }
}

/// Builder for an [`Aggregator`] over the built-in exchange registry.
///
/// # Example
///
/// ```rust,ignore
/// use coinprice_core::{AggregatorBuilder, ExchangeRate};
///
/// let aggregator = AggregatorBuilder::new()
///     .with_fallback_rate(ExchangeRate::new(1350.0)?)
///     .with_call_timeout(None)
///     .build();
/// ```
pub struct AggregatorBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    rate_provider: Option<Arc<dyn RateProvider>>,
    fallback_rate: ExchangeRate,
    call_timeout: Option<Duration>,
    enabled: Vec<ExchangeId>,
    extra_clients: Vec<Arc<dyn ExchangeClient>>,
}

impl Default for AggregatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregatorBuilder {
    pub fn new() -> Self {
        Self {
            http_client: None,
            rate_provider: None,
            fallback_rate: ExchangeRate::fallback(),
            call_timeout: Some(DEFAULT_CALL_TIMEOUT),
            enabled: ExchangeId::ALL.to_vec(),
            extra_clients: Vec::new(),
        }
    }

    /// Share one transport between every adapter and the rate provider.
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Rate used when the live USD/KRW lookup fails.
    pub fn with_fallback_rate(mut self, fallback_rate: ExchangeRate) -> Self {
        self.fallback_rate = fallback_rate;
        self
    }

    /// Replace the Upbit-backed rate provider entirely.
    pub fn with_rate_provider(mut self, rate_provider: Arc<dyn RateProvider>) -> Self {
        self.rate_provider = Some(rate_provider);
        self
    }

    /// `None` waits for every call however long it takes.
    pub fn with_call_timeout(mut self, call_timeout: Option<Duration>) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn with_exchange_enabled(mut self, exchange: ExchangeId, enabled: bool) -> Self {
        self.enabled.retain(|id| *id != exchange);
        if enabled {
            self.enabled.push(exchange);
        }
        self
    }

    /// Register a custom client, replacing the built-in one with the same id.
    pub fn with_client(mut self, client: Arc<dyn ExchangeClient>) -> Self {
        self.extra_clients.push(client);
        self
    }

    pub fn build(self) -> Aggregator {
        let http_client = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));

        let mut clients = ExchangeId::ALL
            .into_iter()
            .filter(|id| self.enabled.contains(id))
            .map(|id| registry_client(id, http_client.clone()))
            .collect::<Vec<_>>();
        clients.extend(self.extra_clients);

        let rate_provider = self.rate_provider.unwrap_or_else(|| {
            Arc::new(UpbitUsdtRateProvider::new(http_client, self.fallback_rate))
        });

        Aggregator::new(clients, rate_provider, self.call_timeout)
    }
}

/// Built-in adapter for each exchange id.
fn registry_client(id: ExchangeId, http_client: Arc<dyn HttpClient>) -> Arc<dyn ExchangeClient> {
    match id {
        ExchangeId::Binance => Arc::new(BinanceAdapter::with_http_client(http_client)),
        ExchangeId::Upbit => Arc::new(UpbitAdapter::with_http_client(http_client)),
        ExchangeId::Bithumb => Arc::new(BithumbAdapter::with_http_client(http_client)),
        ExchangeId::Coinbase => Arc::new(CoinbaseAdapter::with_http_client(http_client)),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
