use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{ExchangeId, ValidationError};

/// KRW per one USD, used to convert foreign-currency quotes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    /// Rate used whenever the live USD/KRW lookup fails.
    pub const DEFAULT_FALLBACK: f64 = 1350.0;

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidRate { value });
        }
        Ok(Self(value))
    }

    pub fn fallback() -> Self {
        Self(Self::DEFAULT_FALLBACK)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::fallback()
    }
}

impl TryFrom<f64> for ExchangeRate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for f64 {
    fn from(value: ExchangeRate) -> Self {
        value.0
    }
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a quote's display price relates to its currency label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteKind {
    /// Quoted directly in KRW; the label is appended when rendered.
    Local,
    /// Quoted in a foreign currency; the display price already carries both
    /// units and the KRW equivalent.
    Converted,
}

/// Normalized price from one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub exchange: ExchangeId,
    pub display_price: String,
    pub currency_label: String,
    pub kind: QuoteKind,
}

impl Quote {
    pub fn local(exchange: ExchangeId, display_price: impl Into<String>) -> Self {
        Self {
            exchange,
            display_price: display_price.into(),
            currency_label: String::from("KRW"),
            kind: QuoteKind::Local,
        }
    }

    pub fn converted(
        exchange: ExchangeId,
        display_price: impl Into<String>,
        currency_label: impl Into<String>,
    ) -> Self {
        Self {
            exchange,
            display_price: display_price.into(),
            currency_label: currency_label.into(),
            kind: QuoteKind::Converted,
        }
    }

    /// Price text as it appears after the exchange name in a reply.
    pub fn price_text(&self) -> String {
        match self.kind {
            QuoteKind::Local => format!("{} {}", self.display_price, self.currency_label),
            QuoteKind::Converted => self.display_price.clone(),
        }
    }
}

/// Whether a symbol trades on one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingStatus {
    pub exchange: ExchangeId,
    pub listed: bool,
    pub pair: Option<String>,
}

impl ListingStatus {
    pub fn listed(exchange: ExchangeId, pair: impl Into<String>) -> Self {
        Self {
            exchange,
            listed: true,
            pair: Some(pair.into()),
        }
    }

    pub const fn not_listed(exchange: ExchangeId) -> Self {
        Self {
            exchange,
            listed: false,
            pair: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_rates() {
        assert!(ExchangeRate::new(0.0).is_err());
        assert!(ExchangeRate::new(-1.0).is_err());
        assert!(ExchangeRate::new(f64::NAN).is_err());
        assert_eq!(ExchangeRate::fallback().value(), 1350.0);
    }

    #[test]
    fn local_quote_appends_label() {
        let quote = Quote::local(ExchangeId::Upbit, "95,000,000");
        assert_eq!(quote.price_text(), "95,000,000 KRW");

        let quote = Quote::converted(ExchangeId::Binance, "1.5 USDT (≈2,025 KRW)", "USDT/KRW");
        assert_eq!(quote.price_text(), "1.5 USDT (≈2,025 KRW)");
    }
}
