//! Chat command pipeline: parse, resolve, load, aggregate, render, reply.

use std::sync::Arc;

use coinprice_core::render::{
    local_now, render_bitcoin, render_exchange_quote, render_listings, render_quotes,
};
use coinprice_core::{Aggregator, ExchangeId, Symbol};
use time::OffsetDateTime;

use crate::aliases::{AliasTable, SymbolResolver};
use crate::commands::ChatCommand;
use crate::error::BotError;
use crate::messages;
use crate::notifier::{ChatId, Notifier};

/// Routes one chat command to the aggregator and sends the replies.
///
/// Every lookup sends a loading message first, so a successful quote
/// produces two messages in order.
pub struct CommandRouter {
    aggregator: Arc<Aggregator>,
    notifier: Arc<dyn Notifier>,
    resolver: Arc<dyn SymbolResolver>,
    clock: fn() -> OffsetDateTime,
}

impl CommandRouter {
    pub fn new(aggregator: Arc<Aggregator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            aggregator,
            notifier,
            resolver: Arc::new(AliasTable::default()),
            clock: local_now,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn SymbolResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Source of the reply footer timestamp.
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Parse `text` and handle it. Unknown slash commands are ignored.
    pub async fn handle(&self, chat_id: ChatId, text: &str) -> Result<(), BotError> {
        match ChatCommand::parse(text) {
            Some(command) => self.dispatch(chat_id, command).await,
            None => {
                tracing::debug!(chat_id, "ignoring unknown command");
                Ok(())
            }
        }
    }

    pub async fn dispatch(&self, chat_id: ChatId, command: ChatCommand) -> Result<(), BotError> {
        tracing::info!(chat_id, ?command, "dispatching chat command");

        match command {
            ChatCommand::Start => self.reply(chat_id, messages::WELCOME).await,
            ChatCommand::Help => self.reply(chat_id, messages::HELP).await,
            ChatCommand::Coins => self.reply(chat_id, messages::COINS).await,
            ChatCommand::PlainText => self.reply(chat_id, messages::COMMAND_HINT).await,
            ChatCommand::MissingArgument(command) => {
                self.reply(chat_id, &messages::usage(&command)).await
            }
            ChatCommand::Bitcoin => self.bitcoin(chat_id).await,
            ChatCommand::Quote(input) => match self.resolve(chat_id, &input).await? {
                Some(symbol) => self.quote(chat_id, &symbol).await,
                None => Ok(()),
            },
            ChatCommand::Where(input) => match self.resolve(chat_id, &input).await? {
                Some(symbol) => self.listings(chat_id, &symbol).await,
                None => Ok(()),
            },
            ChatCommand::Exchange(exchange, input) => {
                match self.resolve(chat_id, &input).await? {
                    Some(symbol) => self.quote_on(chat_id, exchange, &symbol).await,
                    None => Ok(()),
                }
            }
        }
    }

    async fn quote(&self, chat_id: ChatId, symbol: &Symbol) -> Result<(), BotError> {
        self.reply(chat_id, &messages::quote_loading(symbol)).await?;
        let result = self.aggregator.quote(symbol).await;
        self.reply(chat_id, &render_quotes(&result, (self.clock)()))
            .await
    }

    async fn bitcoin(&self, chat_id: ChatId) -> Result<(), BotError> {
        let symbol = Symbol::parse("BTC")?;
        self.reply(chat_id, messages::BITCOIN_LOADING).await?;
        let result = self.aggregator.quote(&symbol).await;
        self.reply(chat_id, &render_bitcoin(&result, (self.clock)()))
            .await
    }

    async fn quote_on(
        &self,
        chat_id: ChatId,
        exchange: ExchangeId,
        symbol: &Symbol,
    ) -> Result<(), BotError> {
        self.reply(chat_id, &messages::quote_loading(symbol)).await?;
        let result = self.aggregator.quote_on(exchange, symbol).await;
        self.reply(chat_id, &render_exchange_quote(&result, (self.clock)()))
            .await
    }

    async fn listings(&self, chat_id: ChatId, symbol: &Symbol) -> Result<(), BotError> {
        self.reply(chat_id, &messages::listing_loading(symbol)).await?;
        let result = self.aggregator.listings(symbol).await;
        self.reply(chat_id, &render_listings(&result)).await
    }

    /// Resolve user input; on failure the user is told and `None` returned.
    async fn resolve(&self, chat_id: ChatId, input: &str) -> Result<Option<Symbol>, BotError> {
        match self.resolver.resolve(input) {
            Ok(symbol) => Ok(Some(symbol)),
            Err(error) => {
                tracing::debug!(chat_id, input, %error, "rejected coin argument");
                self.reply(chat_id, messages::UNSUPPORTED_COIN).await?;
                Ok(None)
            }
        }
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> Result<(), BotError> {
        self.notifier.send(chat_id, text).await
    }
}
