use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical exchange identifiers.
///
/// Declaration order is the display order of every aggregate reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Binance,
    Upbit,
    Bithumb,
    Coinbase,
}

impl ExchangeId {
    pub const ALL: [Self; 4] = [Self::Binance, Self::Upbit, Self::Bithumb, Self::Coinbase];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binance => "binance",
            Self::Upbit => "upbit",
            Self::Bithumb => "bithumb",
            Self::Coinbase => "coinbase",
        }
    }

    /// Name shown to chat users.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Binance => "바이낸스",
            Self::Upbit => "업비트",
            Self::Bithumb => "빗썸",
            Self::Coinbase => "코인베이스",
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            Self::Binance => "🟡",
            Self::Upbit => "🔵",
            Self::Bithumb => "🟢",
            Self::Coinbase => "🟠",
        }
    }

    /// Position in [`ExchangeId::ALL`].
    pub const fn rank(self) -> usize {
        match self {
            Self::Binance => 0,
            Self::Upbit => 1,
            Self::Bithumb => 2,
            Self::Coinbase => 3,
        }
    }
}

impl Display for ExchangeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "binance" => Ok(Self::Binance),
            "upbit" => Ok(Self::Upbit),
            "bithumb" => Ok(Self::Bithumb),
            "coinbase" => Ok(Self::Coinbase),
            other => Err(ValidationError::InvalidExchange {
                value: other.to_owned(),
            }),
        }
    }
}
