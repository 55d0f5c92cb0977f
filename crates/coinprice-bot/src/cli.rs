//! CLI argument definitions for coinprice.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Quote a coin on every exchange |
//! | `where` | List the exchanges a coin trades on |
//! | `btc` | Bitcoin shortcut |
//! | `exchange` | Quote a coin on one exchange |
//! | `serve` | Run the Telegram bot |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--fallback-rate` | `1350` | USD/KRW rate used when the live lookup fails |
//! | `--call-timeout-ms` | `3000` | Bound on each upstream call |
//! | `--no-call-timeout` | `false` | Wait for upstream calls indefinitely |
//! | `--log-filter` | `info` | tracing filter directives |
//!
//! # Examples
//!
//! ```bash
//! coinprice quote 비트코인
//! coinprice where doge
//! coinprice exchange upbit eth --call-timeout-ms 1500
//! TELEGRAM_BOT_TOKEN=... coinprice serve
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use coinprice_core::{ExchangeId, ExchangeRate};

/// Crypto quote aggregator for Binance, Upbit, Bithumb and Coinbase.
#[derive(Debug, Parser)]
#[command(
    name = "coinprice",
    author,
    version,
    about = "Multi-exchange crypto quote bot",
    long_about = "coinprice quotes a coin on Binance, Upbit, Bithumb and Coinbase at once and \
renders the answer as a Korean chat reply. Foreign prices are converted to KRW with the \
live USDT/KRW rate from Upbit.\n\
\n\
Use 'coinprice <command> --help' for command-specific help."
)]
pub struct Cli {
    /// USD/KRW rate used when the live lookup fails.
    #[arg(
        long,
        global = true,
        env = "COINPRICE_FALLBACK_RATE",
        default_value_t = ExchangeRate::DEFAULT_FALLBACK
    )]
    pub fallback_rate: f64,

    /// Upper bound for each upstream call in milliseconds.
    #[arg(
        long,
        global = true,
        env = "COINPRICE_CALL_TIMEOUT_MS",
        default_value_t = 3000
    )]
    pub call_timeout_ms: u64,

    /// Wait for every upstream call however long it takes.
    #[arg(long, global = true, default_value_t = false)]
    pub no_call_timeout: bool,

    /// Log filter directives, e.g. `info` or `coinprice_core=debug`.
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quote a coin on every exchange.
    Quote(SymbolArgs),
    /// Show which exchanges list a coin.
    Where(SymbolArgs),
    /// Quote bitcoin on every exchange.
    Btc,
    /// Quote a coin on a single exchange.
    Exchange(ExchangeArgs),
    /// Run the Telegram bot with long polling.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Ticker or Korean coin name.
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct ExchangeArgs {
    #[arg(value_enum)]
    pub exchange: ExchangeArg,

    /// Ticker or Korean coin name.
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExchangeArg {
    Binance,
    Upbit,
    Bithumb,
    Coinbase,
}

impl From<ExchangeArg> for ExchangeId {
    fn from(value: ExchangeArg) -> Self {
        match value {
            ExchangeArg::Binance => Self::Binance,
            ExchangeArg::Upbit => Self::Upbit,
            ExchangeArg::Bithumb => Self::Bithumb,
            ExchangeArg::Coinbase => Self::Coinbase,
        }
    }
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bot token from BotFather.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Telegram Bot API base URL.
    #[arg(long, default_value = crate::telegram::API_BASE)]
    pub api_base: String,
}
