use crate::{error::SkycastError, message::IncomingEvent, weather::WeatherSample};
use async_trait::async_trait;

/// Weather data source — one lookup per city.
///
/// The report builder depends on this seam so tests can substitute a stub
/// for the HTTP client.
#[async_trait]
pub trait Forecaster: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<WeatherSample, SkycastError>;
}

/// Generates natural-language commentary for a weather summary.
#[async_trait]
pub trait Commentator: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Request one completion commenting on `weather_line` for `city`,
    /// written in the natural language named by `language`.
    async fn comment(
        &self,
        city: &str,
        weather_line: &str,
        language: &str,
    ) -> Result<String, SkycastError>;

    /// Check if the provider is reachable and ready.
    async fn is_available(&self) -> bool;
}

/// Outbound surface of a messaging platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send plain text. Returns the platform message id for later edits.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64, SkycastError>;

    /// Send text with an inline keyboard, one `(label, callback_data)`
    /// button per row. Returns the platform message id.
    async fn send_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        buttons: &[(String, String)],
    ) -> Result<i64, SkycastError>;

    /// Replace the text of a previously sent message.
    async fn edit_text(&self, chat_id: i64, message_id: i64, text: &str)
        -> Result<(), SkycastError>;

    /// Acknowledge a callback query so the client stops its spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), SkycastError>;
}

/// Messaging channel — event intake plus the [`Messenger`] surface.
#[async_trait]
pub trait Channel: Messenger {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming updates.
    /// Returns a receiver that yields incoming events.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingEvent>, SkycastError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), SkycastError>;
}
