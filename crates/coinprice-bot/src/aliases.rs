//! User input to ticker resolution.

use std::collections::HashMap;

use coinprice_core::{Symbol, ValidationError};

/// Maps a raw chat argument to a validated [`Symbol`].
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, input: &str) -> Result<Symbol, ValidationError>;
}

const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("BTC", "BTC"),
    ("ETH", "ETH"),
    ("ADA", "ADA"),
    ("SOL", "SOL"),
    ("DOT", "DOT"),
    ("MATIC", "MATIC"),
    ("LINK", "LINK"),
    ("UNI", "UNI"),
    ("AVAX", "AVAX"),
    ("ATOM", "ATOM"),
    ("XRP", "XRP"),
    ("DOGE", "DOGE"),
    ("LTC", "LTC"),
    ("BCH", "BCH"),
    ("BONK", "BONK"),
    ("SHIB", "SHIB"),
    ("PEPE", "PEPE"),
    ("비트코인", "BTC"),
    ("이더리움", "ETH"),
    ("에이다", "ADA"),
    ("솔라나", "SOL"),
    ("리플", "XRP"),
    ("도지코인", "DOGE"),
    ("라이트코인", "LTC"),
    ("시바", "SHIB"),
    ("봉크", "BONK"),
];

/// Static alias table; unknown input passes through unchanged.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ALIASES.iter().copied())
    }
}

impl AliasTable {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let aliases = pairs
            .into_iter()
            .map(|(alias, ticker)| (alias.to_uppercase(), ticker.to_owned()))
            .collect();
        Self { aliases }
    }

    /// Tickers that have an explicit entry, sorted and deduplicated.
    pub fn known_tickers(&self) -> Vec<&str> {
        let mut tickers = self.aliases.values().map(String::as_str).collect::<Vec<_>>();
        tickers.sort_unstable();
        tickers.dedup();
        tickers
    }
}

impl SymbolResolver for AliasTable {
    fn resolve(&self, input: &str) -> Result<Symbol, ValidationError> {
        let key = input.trim().to_uppercase();
        let ticker = self.aliases.get(&key).map(String::as_str).unwrap_or(&key);
        Symbol::parse(ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_names_resolve_to_tickers() {
        let table = AliasTable::default();

        assert_eq!(table.resolve("비트코인").map(String::from), Ok(String::from("BTC")));
        assert_eq!(table.resolve(" 도지코인 ").map(String::from), Ok(String::from("DOGE")));
        assert_eq!(table.resolve("시바").map(String::from), Ok(String::from("SHIB")));
    }

    #[test]
    fn tickers_are_case_insensitive() {
        let table = AliasTable::default();

        assert_eq!(table.resolve("eth").map(String::from), Ok(String::from("ETH")));
        assert_eq!(table.resolve("Pepe").map(String::from), Ok(String::from("PEPE")));
    }

    #[test]
    fn unknown_input_passes_through_uppercased() {
        let table = AliasTable::default();

        assert_eq!(table.resolve("arb").map(String::from), Ok(String::from("ARB")));
    }

    #[test]
    fn invalid_input_is_rejected() {
        let table = AliasTable::default();

        assert_eq!(table.resolve("   "), Err(ValidationError::EmptySymbol));
        assert!(matches!(
            table.resolve("BTC/USDT"),
            Err(ValidationError::SymbolInvalidChar { ch: '/', .. })
        ));
    }

    #[test]
    fn known_tickers_are_deduplicated() {
        let table = AliasTable::default();
        let tickers = table.known_tickers();

        assert_eq!(tickers.len(), 17);
        assert!(tickers.contains(&"BONK"));
    }
}
