use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An incoming text message from a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Platform chat id — the identity key for all per-user state.
    pub chat_id: i64,
    /// Human-readable sender name.
    pub sender_name: Option<String>,
    /// Message text content.
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Platform callback id, acknowledged via the channel.
    pub id: String,
    pub chat_id: i64,
    /// The message carrying the keyboard, for in-place edits.
    pub message_id: i64,
    /// Opaque payload attached to the pressed button.
    pub data: String,
}

/// One event from a channel's update stream.
#[derive(Debug, Clone)]
pub enum IncomingEvent {
    Message(IncomingMessage),
    Callback(CallbackQuery),
}
