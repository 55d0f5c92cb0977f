//! # Domain Models
//!
//! Request-scoped value types shared by adapters, the aggregator and the
//! formatter. None of them are persisted; each lives for one command.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Uppercased coin ticker |
//! | [`ExchangeRate`] | KRW per USD used for conversion |
//! | [`Quote`] | Display-ready price from one exchange |
//! | [`ListingStatus`] | Listed/not-listed result from one exchange |

mod models;
mod symbol;

pub use models::{ExchangeRate, ListingStatus, Quote, QuoteKind};
pub use symbol::Symbol;
