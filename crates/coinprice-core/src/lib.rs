//! # Coinprice Core
//!
//! Quote aggregation engine for the coinprice chat bot.
//!
//! ## Overview
//!
//! One user request fans out to four exchanges at once, waits for all of
//! them, and comes back as a single ordered result that renders to a Korean
//! chat reply:
//!
//! - **Domain types** for symbols, quotes, listing status and the USD/KRW rate
//! - **Exchange adapters** for Binance, Upbit, Bithumb and Coinbase
//! - **Rate provider** with a configurable fallback rate
//! - **Aggregator** with per-call timeouts and fixed display order
//! - **Renderer** producing the reply text
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Exchange adapters |
//! | [`aggregator`] | Concurrent fan-out and aggregate result types |
//! | [`data_source`] | Exchange client trait and per-source error |
//! | [`domain`] | Domain models (Symbol, Quote, ListingStatus, ExchangeRate) |
//! | [`error`] | Core error types |
//! | [`exchange`] | Exchange identifiers |
//! | [`http_client`] | HTTP client abstraction |
//! | [`price_format`] | ko-KR number formatting |
//! | [`rate`] | USD/KRW rate providers |
//! | [`render`] | Reply text rendering |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinprice_core::{render, Aggregator, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let aggregator = Aggregator::default();
//!     let symbol = Symbol::parse("btc")?;
//!
//!     let result = aggregator.quote(&symbol).await;
//!     println!("{}", render::render_quotes(&result, render::local_now()));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Aggregator    │────▶│  Rate Provider   │
//! └────────┬────────┘     └────────┬─────────┘
//!          │ join_all              │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Exchange Client │────▶│   HTTP Client    │
//! │  (×4 adapters)  │     │ (reqwest/stub)   │
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Renderer     │
//! └─────────────────┘
//! ```

pub mod adapters;
pub mod aggregator;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod http_client;
pub mod price_format;
pub mod rate;
pub mod render;

pub use adapters::{BinanceAdapter, BithumbAdapter, CoinbaseAdapter, UpbitAdapter};
pub use aggregator::{
    AggregateResult, Aggregator, AggregatorBuilder, ListingAggregate, QuoteAggregate,
    QuoteClassification, DEFAULT_CALL_TIMEOUT,
};
pub use data_source::{ExchangeClient, SourceError, SourceErrorKind};
pub use domain::{ExchangeRate, ListingStatus, Quote, QuoteKind, Symbol};
pub use error::{CoreError, ValidationError};
pub use exchange::ExchangeId;
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};
pub use rate::{FixedRateProvider, RateProvider, UpbitUsdtRateProvider};
