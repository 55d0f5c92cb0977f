//! Telegram Bot API transport: `getUpdates` long polling and `sendMessage`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use coinprice_core::{HttpClient, HttpRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::error::BotError;
use crate::notifier::{ChatId, Notifier};
use crate::router::CommandRouter;

pub const API_BASE: &str = "https://api.telegram.org";

/// Server-side wait for `getUpdates`.
pub const LONG_POLL_TIMEOUT_SECS: u64 = 30;

const ERROR_PAUSE: Duration = Duration::from_secs(3);

/// Telegram bot connection settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub token: String,
    pub api_base: String,
}

impl TelegramConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: String::from(API_BASE),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: ChatId,
    text: &'a str,
}

/// Bot API client over the shared [`HttpClient`] transport.
#[derive(Clone)]
pub struct TelegramClient {
    http_client: Arc<dyn HttpClient>,
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: TelegramConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, BotError> {
        let mut url = format!(
            "{}?timeout={LONG_POLL_TIMEOUT_SECS}&allowed_updates=%5B%22message%22%5D",
            self.config.method_url("getUpdates")
        );
        if let Some(offset) = offset {
            url.push_str(&format!("&offset={offset}"));
        }

        let request =
            HttpRequest::get(url).with_timeout_ms((LONG_POLL_TIMEOUT_SECS + 10) * 1_000);
        self.call(request).await
    }

    pub async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), BotError> {
        let body = serde_json::to_string(&SendMessage { chat_id, text })?;
        let request = HttpRequest::post_json(self.config.method_url("sendMessage"), body);

        let _sent: serde_json::Value = self.call(request).await?;
        Ok(())
    }

    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, BotError> {
        let response = self.http_client.execute(request).await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&response.body)?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(BotError::Api {
                description: description
                    .unwrap_or_else(|| format!("request failed with status {}", response.status)),
            }),
        }
    }
}

impl Notifier for TelegramClient {
    fn send<'a>(
        &'a self,
        chat_id: ChatId,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>> {
        Box::pin(self.send_message(chat_id, text))
    }
}

/// Long-polling loop feeding chat messages to a [`CommandRouter`].
pub struct TelegramPoller {
    client: Arc<TelegramClient>,
    router: Arc<CommandRouter>,
    offset: Option<i64>,
}

impl TelegramPoller {
    pub fn new(client: Arc<TelegramClient>, router: Arc<CommandRouter>) -> Self {
        Self {
            client,
            router,
            offset: None,
        }
    }

    pub const fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetch one batch of updates and spawn a handler per text message.
    ///
    /// The offset advances past every update in the batch, including ones
    /// without text.
    pub async fn poll_once(&mut self) -> Result<Vec<JoinHandle<()>>, BotError> {
        let updates = self.client.get_updates(self.offset).await?;
        let mut handlers = Vec::with_capacity(updates.len());

        for update in updates {
            self.offset = Some(self.offset.map_or(update.update_id + 1, |offset| {
                offset.max(update.update_id + 1)
            }));

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                continue;
            };

            let router = Arc::clone(&self.router);
            let chat_id = message.chat.id;
            handlers.push(tokio::spawn(async move {
                if let Err(error) = router.handle(chat_id, &text).await {
                    tracing::warn!(chat_id, %error, "failed to answer chat message");
                }
            }));
        }

        Ok(handlers)
    }

    /// Poll forever. Transport errors are logged and retried after a pause.
    pub async fn run(mut self) {
        loop {
            if let Err(error) = self.poll_once().await {
                tracing::error!(%error, "telegram polling failed");
                tokio::time::sleep(ERROR_PAUSE).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::RecordingNotifier;
    use coinprice_core::{Aggregator, HttpMethod, HttpResponse, ScriptedHttpClient};

    const BASE: &str = "https://telegram.test";

    fn client(http: Arc<ScriptedHttpClient>) -> TelegramClient {
        TelegramClient::new(http, TelegramConfig::new("123:abc").with_api_base(BASE))
    }

    #[tokio::test]
    async fn get_updates_decodes_messages() {
        let http = Arc::new(ScriptedHttpClient::new().respond(
            "https://telegram.test/bot123:abc/getUpdates",
            HttpResponse::ok_json(
                r#"{"ok":true,"result":[
                    {"update_id":10,"message":{"message_id":1,"chat":{"id":77,"type":"private"},"text":"/btc"}},
                    {"update_id":11,"edited_message":{"message_id":1,"chat":{"id":77}}}
                ]}"#,
            ),
        ));

        let updates = client(http.clone())
            .get_updates(Some(10))
            .await
            .expect("updates");

        assert_eq!(updates.len(), 2);
        assert_eq!(
            updates[0].message.as_ref().and_then(|m| m.text.as_deref()),
            Some("/btc")
        );
        assert!(updates[1].message.is_none());
        let url = &http.recorded_requests()[0].url;
        assert!(url.contains("timeout=30"));
        assert!(url.ends_with("&offset=10"));
    }

    #[tokio::test]
    async fn send_message_posts_json() {
        let http = Arc::new(ScriptedHttpClient::new().respond(
            "https://telegram.test/bot123:abc/sendMessage",
            HttpResponse::ok_json(r#"{"ok":true,"result":{"message_id":5}}"#),
        ));

        client(http.clone())
            .send_message(77, "안녕하세요")
            .await
            .expect("sent");

        let request = &http.recorded_requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.timeout_ms,
            coinprice_core::http_client::DEFAULT_REQUEST_TIMEOUT_MS
        );
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap_or_default()).expect("json body");
        assert_eq!(body["chat_id"], 77);
        assert_eq!(body["text"], "안녕하세요");
    }

    #[tokio::test]
    async fn api_error_surfaces_description() {
        let http = Arc::new(ScriptedHttpClient::new().respond(
            BASE,
            HttpResponse::with_status(
                401,
                r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
            ),
        ));

        let error = client(http)
            .get_updates(None)
            .await
            .expect_err("unauthorized");

        assert!(matches!(error, BotError::Api { ref description } if description == "Unauthorized"));
    }

    #[tokio::test]
    async fn ok_envelope_without_result_is_rejected() {
        let http = Arc::new(
            ScriptedHttpClient::new().respond(BASE, HttpResponse::ok_json(r#"{"ok":true}"#)),
        );

        let error = client(http)
            .get_updates(None)
            .await
            .expect_err("missing result");

        assert!(matches!(
            error,
            BotError::Api { ref description } if description == "request failed with status 200"
        ));
    }

    #[tokio::test]
    async fn poll_once_advances_offset_and_dispatches_text() {
        let http = Arc::new(ScriptedHttpClient::new().respond(
            "https://telegram.test/bot123:abc/getUpdates",
            HttpResponse::ok_json(
                r#"{"ok":true,"result":[
                    {"update_id":41,"message":{"chat":{"id":5},"text":"hello"}},
                    {"update_id":42,"message":{"chat":{"id":5}}}
                ]}"#,
            ),
        ));
        let notifier = Arc::new(RecordingNotifier::new());
        let router = Arc::new(CommandRouter::new(
            Arc::new(Aggregator::builder().with_http_client(http.clone()).build()),
            notifier.clone(),
        ));
        let mut poller = TelegramPoller::new(Arc::new(client(http)), router);

        let handlers = poller.poll_once().await.expect("poll");
        assert_eq!(handlers.len(), 1);
        for handler in handlers {
            handler.await.expect("handler finished");
        }

        assert_eq!(poller.offset(), Some(43));
        assert_eq!(
            notifier.texts_for(5),
            vec![crate::messages::COMMAND_HINT.to_owned()]
        );
    }
}
