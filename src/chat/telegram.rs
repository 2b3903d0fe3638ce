use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::Dispatcher;
use crate::consts::{POLL_RETRY_DELAY_SECS, POLL_TIMEOUT_SECS, TELEGRAM_BASE_URL};

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("telegram {method} failed: {description}")]
    Api {
        method: &'static str,
        description: String,
    },

    #[error("telegram {method} returned {status} with unreadable body: {source}")]
    Decode {
        method: &'static str,
        status: reqwest::StatusCode,
        source: serde_json::Error,
    },
}

// --- API types ---

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Minimal Telegram Bot API client: long polling and sending HTML text.
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(TELEGRAM_BASE_URL, token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        body: serde_json::Value,
    ) -> Result<T, TelegramError> {
        let resp = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await?;

        // Errors come back as the same envelope with ok = false, whatever the status.
        let status = resp.status();
        let text = resp.text().await?;
        let envelope: ApiResponse<T> =
            serde_json::from_str(&text).map_err(|source| TelegramError::Decode {
                method,
                status,
                source,
            })?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(TelegramError::Api {
                method,
                description: description.unwrap_or_else(|| status.to_string()),
            }),
        }
    }

    /// Fetch message updates after `offset`, waiting up to `timeout_secs`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let mut body = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", body).await
    }

    /// Send `text` in HTML parse mode, optionally as a reply.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<(), TelegramError> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
        });
        if let Some(message_id) = reply_to {
            body["reply_parameters"] = json!({
                "message_id": message_id,
                "allow_sending_without_reply": true,
            });
        }
        let _sent: serde_json::Value = self.call("sendMessage", body).await?;
        Ok(())
    }
}

/// The long-polling loop. Each message is answered on its own task.
pub struct Bot {
    client: Arc<TelegramClient>,
    dispatcher: Arc<Dispatcher>,
    poll_timeout: u64,
    retry_delay: Duration,
}

impl Bot {
    pub fn new(client: Arc<TelegramClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            client,
            dispatcher,
            poll_timeout: POLL_TIMEOUT_SECS,
            retry_delay: Duration::from_secs(POLL_RETRY_DELAY_SECS),
        }
    }

    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout = secs;
        self
    }

    /// Poll forever. Poll errors are logged and retried after a pause.
    pub async fn run(&self) {
        let mut offset = None;
        info!("polling for updates");
        loop {
            if let Err(e) = self.poll_once(&mut offset).await {
                warn!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(self.retry_delay).await;
            }
        }
    }

    /// One `getUpdates` round. Advances `offset` past every update seen and
    /// returns the handles of the spawned message tasks.
    pub async fn poll_once(
        &self,
        offset: &mut Option<i64>,
    ) -> Result<Vec<JoinHandle<()>>, TelegramError> {
        let updates = self.client.get_updates(*offset, self.poll_timeout).await?;
        let mut handles = Vec::new();

        for update in updates {
            *offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            if message.text.is_none() {
                debug!(update_id = update.update_id, "skipping non-text message");
                continue;
            }

            let client = Arc::clone(&self.client);
            let dispatcher = Arc::clone(&self.dispatcher);
            handles.push(tokio::spawn(async move {
                handle_message(&client, &dispatcher, message).await;
            }));
        }

        Ok(handles)
    }
}

async fn handle_message(client: &TelegramClient, dispatcher: &Dispatcher, message: Message) {
    let Some(text) = message.text.as_deref() else {
        return;
    };
    let user = message.from.as_ref().map(|u| u.id);
    debug!(chat_id = message.chat.id, ?user, %text, "inbound message");

    let Some(reply) = dispatcher.respond(text).await else {
        return;
    };

    if let Err(e) = client
        .send_message(message.chat.id, &reply, Some(message.message_id))
        .await
    {
        error!(chat_id = message.chat.id, error = %e, "failed to send reply");
    }
}
