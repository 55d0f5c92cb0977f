//! Outbound reply channel.

use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::Mutex;

use crate::error::BotError;

/// Chat identifier as used by the Telegram Bot API.
pub type ChatId = i64;

/// Sink for reply texts.
pub trait Notifier: Send + Sync {
    fn send<'a>(
        &'a self,
        chat_id: ChatId,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>>;
}

/// Writes each reply to stdout followed by a blank line. Used by the
/// one-shot subcommands.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn send<'a>(
        &'a self,
        _chat_id: ChatId,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>> {
        let written = {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}\n").and_then(|()| stdout.flush())
        };
        Box::pin(async move { written.map_err(BotError::from) })
    }
}

/// Keeps every reply in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(ChatId, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn texts_for(&self, chat_id: ChatId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(id, _)| *id == chat_id)
            .map(|(_, text)| text)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn send<'a>(
        &'a self,
        chat_id: ChatId,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((chat_id, text.to_owned()));
        }
        Box::pin(async { Ok(()) })
    }
}
