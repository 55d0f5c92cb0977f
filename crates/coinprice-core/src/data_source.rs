//! Exchange adapter contract and the per-source error type.
//!
//! Every exchange implements [`ExchangeClient`]: one network call for a
//! price, one for a listing check. Failures never escape an adapter as
//! anything richer than [`SourceError`]; a listing check cannot fail at all
//! and reports `listed = false` instead.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::{ExchangeId, ExchangeRate, ListingStatus, Quote, Symbol};

/// Adapter-level error classification.
///
/// Transport failures, HTTP errors, parse failures, unknown symbols and call
/// timeouts all collapse into `Unavailable`; replies suggest the listing
/// check as the recovery path for any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
}

/// Structured per-exchange failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    exchange: ExchangeId,
    detail: String,
}

impl SourceError {
    pub fn unavailable(exchange: ExchangeId, detail: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            exchange,
            detail: detail.into(),
        }
    }

    pub fn timed_out(exchange: ExchangeId, timeout: Duration) -> Self {
        Self::unavailable(
            exchange,
            format!("call timed out after {} ms", timeout.as_millis()),
        )
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub const fn exchange(&self) -> ExchangeId {
        self.exchange
    }

    /// Diagnostic detail for logs; never shown to chat users.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        format!(
            "{}에서 해당 코인을 찾을 수 없습니다",
            self.exchange.display_name()
        )
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.exchange, self.detail, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Exchange adapter contract.
///
/// | Method | Description |
/// |--------|-------------|
/// | [`id`](ExchangeClient::id) | Registry key and display order |
/// | [`quote`](ExchangeClient::quote) | Price for a symbol, converted with `rate` when foreign |
/// | [`listing`](ExchangeClient::listing) | Cheap existence check, independent of price parsing |
///
/// Implementations perform exactly one upstream request per call, never
/// retry, and leave time bounds to the caller.
pub trait ExchangeClient: Send + Sync {
    fn id(&self) -> ExchangeId;

    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
        rate: ExchangeRate,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>>;

    fn listing<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = ListingStatus> + Send + 'a>>;
}
