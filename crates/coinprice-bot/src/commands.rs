//! Chat command parsing.
//!
//! | Command | Parsed as |
//! |---------|-----------|
//! | `/start`, `/help`, `/coins` | static replies |
//! | `/price X`, `/시세 X`, `/가격 X` | [`ChatCommand::Quote`] |
//! | `/어디 X` | [`ChatCommand::Where`] |
//! | `/btc` | [`ChatCommand::Bitcoin`] |
//! | `/binance X`, `/upbit X`, `/bithumb X`, `/coinbase X` | [`ChatCommand::Exchange`] |
//! | text without a leading `/` | [`ChatCommand::PlainText`] |

use std::str::FromStr;

use coinprice_core::ExchangeId;

/// One parsed chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Help,
    Coins,
    Bitcoin,
    /// Aggregate quote; the argument is still unresolved user input.
    Quote(String),
    Where(String),
    Exchange(ExchangeId, String),
    /// A quote or listing command without its argument; carries the
    /// command as the user should type it.
    MissingArgument(String),
    PlainText,
}

impl ChatCommand {
    /// Parse a message. `None` means the message is an unknown or malformed
    /// slash command and gets no reply.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let Some(body) = text.strip_prefix('/') else {
            return Some(Self::PlainText);
        };

        let (head, rest) = match body.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (body, ""),
        };
        let name = head
            .split_once('@')
            .map_or(head, |(name, _bot)| name)
            .to_lowercase();

        let argument = |build: fn(String) -> Self| {
            if rest.is_empty() {
                Self::MissingArgument(format!("/{name}"))
            } else {
                build(rest.to_owned())
            }
        };

        let command = match name.as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "coins" => Self::Coins,
            "btc" if rest.is_empty() => Self::Bitcoin,
            "price" | "시세" | "가격" => argument(Self::Quote),
            "어디" => argument(Self::Where),
            other => {
                let exchange = ExchangeId::from_str(other).ok()?;
                if rest.is_empty() {
                    Self::MissingArgument(format!("/{name}"))
                } else {
                    Self::Exchange(exchange, rest.to_owned())
                }
            }
        };
        Some(command)
    }
}
