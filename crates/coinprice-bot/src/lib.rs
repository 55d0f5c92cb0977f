//! # Coinprice Bot
//!
//! Chat front end for `coinprice-core`: command parsing, alias resolution,
//! reply delivery and the Telegram long-polling transport.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aliases`] | Korean coin names and ticker resolution |
//! | [`app`] | Subcommand execution |
//! | [`cli`] | clap argument definitions |
//! | [`commands`] | Chat command parsing |
//! | [`config`] | Validated runtime configuration |
//! | [`error`] | Bot and CLI error types |
//! | [`logging`] | tracing subscriber setup |
//! | [`messages`] | Static reply texts |
//! | [`notifier`] | Reply sinks |
//! | [`router`] | Command pipeline |
//! | [`telegram`] | Telegram Bot API client and poller |

pub mod aliases;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod messages;
pub mod notifier;
pub mod router;
pub mod telegram;

pub use aliases::{AliasTable, SymbolResolver};
pub use commands::ChatCommand;
pub use config::BotConfig;
pub use error::{BotError, CliError};
pub use notifier::{ChatId, Notifier, RecordingNotifier, StdoutNotifier};
pub use router::CommandRouter;
pub use telegram::{TelegramClient, TelegramConfig, TelegramPoller};
