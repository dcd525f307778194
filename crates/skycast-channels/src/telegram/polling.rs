//! Long-polling update loop and Channel trait implementation.

use super::types::{TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use skycast_core::{
    error::SkycastError,
    message::{CallbackQuery, IncomingEvent, IncomingMessage},
    traits::Channel,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingEvent>, SkycastError> {
        self.register_commands().await;

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!(
                    "{base_url}/getUpdates?timeout=30&allowed_updates=[\"message\",\"callback_query\"]"
                );
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(std::time::Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let event = match translate_update(update) {
                        Some(ev) => ev,
                        None => continue,
                    };

                    if tx.send(event).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn stop(&self) -> Result<(), SkycastError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

/// Map one Telegram update onto a channel event. Returns `None` for
/// payloads the bot does not handle (group chats, media, bare callbacks).
pub(super) fn translate_update(update: TgUpdate) -> Option<IncomingEvent> {
    if let Some(cb) = update.callback_query {
        let data = cb.data?;
        // Without the carrying message there is nothing to edit in place.
        let msg = cb.message?;
        return Some(IncomingEvent::Callback(CallbackQuery {
            id: cb.id,
            chat_id: msg.chat.id,
            message_id: msg.message_id,
            data,
        }));
    }

    let msg = update.message?;

    // Subscriptions, cities, and language are all keyed by chat id; group
    // chats would alias every member onto one state entry, so skip them.
    let is_group = matches!(msg.chat.chat_type.as_str(), "group" | "supergroup");
    if is_group {
        debug!("telegram: ignoring group message from chat {}", msg.chat.id);
        return None;
    }

    let text = msg.text?;

    let sender_name = msg.from.map(|user| {
        if let Some(ref un) = user.username {
            format!("@{un}")
        } else if let Some(ref ln) = user.last_name {
            format!("{} {ln}", user.first_name)
        } else {
            user.first_name.clone()
        }
    });

    Some(IncomingEvent::Message(IncomingMessage {
        chat_id: msg.chat.id,
        sender_name,
        text,
        timestamp: chrono::Utc::now(),
    }))
}
