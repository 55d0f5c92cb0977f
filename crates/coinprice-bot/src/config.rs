use std::sync::Arc;
use std::time::Duration;

use coinprice_core::{Aggregator, ExchangeRate, HttpClient, ValidationError};

use crate::cli::Cli;

/// Validated runtime settings shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotConfig {
    pub fallback_rate: ExchangeRate,
    /// `None` disables the per-call bound.
    pub call_timeout: Option<Duration>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            fallback_rate: ExchangeRate::fallback(),
            call_timeout: Some(coinprice_core::DEFAULT_CALL_TIMEOUT),
        }
    }
}

impl BotConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ValidationError> {
        let fallback_rate = ExchangeRate::new(cli.fallback_rate)?;
        let call_timeout = if cli.no_call_timeout {
            None
        } else if cli.call_timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        } else {
            Some(Duration::from_millis(cli.call_timeout_ms))
        };

        Ok(Self {
            fallback_rate,
            call_timeout,
        })
    }

    /// Aggregator over the built-in exchanges sharing `http_client`.
    pub fn aggregator(&self, http_client: Arc<dyn HttpClient>) -> Aggregator {
        Aggregator::builder()
            .with_http_client(http_client)
            .with_fallback_rate(self.fallback_rate)
            .with_call_timeout(self.call_timeout)
            .build()
    }
}
