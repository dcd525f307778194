//! Message sending, in-place edits, callback answers, and command registration.

use super::types::{TgMessage, TgResponse};
use super::TelegramChannel;
use crate::utils::split_message;
use async_trait::async_trait;
use skycast_core::{error::SkycastError, traits::Messenger};
use tracing::{info, warn};

/// Telegram caps message text at 4096 characters.
const MAX_MESSAGE_LEN: usize = 4096;

/// Build an `InlineKeyboardMarkup` payload, one button per row.
pub(crate) fn keyboard_markup(buttons: &[(String, String)]) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = buttons
        .iter()
        .map(|(label, data)| {
            serde_json::json!([{ "text": label, "callback_data": data }])
        })
        .collect();
    serde_json::json!({ "inline_keyboard": rows })
}

impl TelegramChannel {
    /// POST a Bot API method and return the sent message's id.
    async fn call_send(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<i64, SkycastError> {
        let url = format!("{}/{method}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SkycastError::Channel(format!("telegram {method} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(SkycastError::Channel(format!(
                "telegram {method} failed ({status}): {error_text}"
            )));
        }

        let parsed: TgResponse<TgMessage> = resp.json().await.map_err(|e| {
            SkycastError::Channel(format!("telegram {method} parse failed: {e}"))
        })?;

        match parsed.result {
            Some(msg) if parsed.ok => Ok(msg.message_id),
            _ => Err(SkycastError::Channel(format!(
                "telegram {method} rejected: {}",
                parsed.description.unwrap_or_default()
            ))),
        }
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Subscribe and choose a language" },
                { "command": "report", "description": "Weather report for your cities, right now" },
                { "command": "addcity", "description": "Track a city" },
                { "command": "removecity", "description": "Stop tracking a city" },
                { "command": "mycities", "description": "List your tracked cities" },
                { "command": "done", "description": "Review your city list" },
                { "command": "stop", "description": "Unsubscribe from daily reports" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}

#[async_trait]
impl Messenger for TelegramChannel {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64, SkycastError> {
        let mut last_id = 0;
        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            let body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
            });
            last_id = self.call_send("sendMessage", body).await?;
        }
        Ok(last_id)
    }

    async fn send_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        buttons: &[(String, String)],
    ) -> Result<i64, SkycastError> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "reply_markup": keyboard_markup(buttons),
        });
        self.call_send("sendMessage", body).await
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), SkycastError> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
        });
        self.call_send("editMessageText", body).await.map(|_| ())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), SkycastError> {
        let url = format!("{}/answerCallbackQuery", self.base_url);
        let body = serde_json::json!({ "callback_query_id": callback_id });

        self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                SkycastError::Channel(format!("telegram answerCallbackQuery failed: {e}"))
            })?;

        Ok(())
    }
}
