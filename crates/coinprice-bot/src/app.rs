//! Subcommand execution.

use std::sync::Arc;

use coinprice_core::{ExchangeId, HttpClient, ReqwestHttpClient};

use crate::aliases::AliasTable;
use crate::cli::Command;
use crate::commands::ChatCommand;
use crate::config::BotConfig;
use crate::error::CliError;
use crate::notifier::StdoutNotifier;
use crate::router::CommandRouter;
use crate::telegram::{TelegramClient, TelegramConfig, TelegramPoller};

/// Chat id used for one-shot runs on stdout.
const CONSOLE_CHAT: i64 = 0;

pub async fn run(command: &Command, config: &BotConfig) -> Result<(), CliError> {
    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let aggregator = Arc::new(config.aggregator(http_client.clone()));

    let chat_command = match command {
        Command::Quote(args) => ChatCommand::Quote(args.symbol.clone()),
        Command::Where(args) => ChatCommand::Where(args.symbol.clone()),
        Command::Btc => ChatCommand::Bitcoin,
        Command::Exchange(args) => {
            ChatCommand::Exchange(ExchangeId::from(args.exchange), args.symbol.clone())
        }
        Command::Serve(args) => {
            let token = args
                .token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .ok_or(CliError::MissingToken)?;
            let telegram = Arc::new(TelegramClient::new(
                http_client,
                TelegramConfig::new(token).with_api_base(&args.api_base),
            ));
            let router = Arc::new(CommandRouter::new(aggregator, telegram.clone()));
            return serve(TelegramPoller::new(telegram, router), config).await;
        }
    };

    let router = CommandRouter::new(aggregator, Arc::new(StdoutNotifier));
    router.dispatch(CONSOLE_CHAT, chat_command).await?;
    Ok(())
}

async fn serve(poller: TelegramPoller, config: &BotConfig) -> Result<(), CliError> {
    let aliases = AliasTable::default();
    tracing::info!("🤖 암호화폐 시세 봇이 시작되었습니다...");
    tracing::info!(
        exchanges = %ExchangeId::ALL.map(ExchangeId::display_name).join(", "),
        coins = %aliases.known_tickers().join(", "),
        fallback_rate = %config.fallback_rate,
        call_timeout_ms = config.call_timeout.map(|timeout| timeout.as_millis() as u64),
        "bot configuration"
    );

    tokio::select! {
        () = poller.run() => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(error) = signal {
                tracing::error!(%error, "failed to listen for shutdown signal");
            }
            tracing::info!("shutting down");
        }
    }
    Ok(())
}
