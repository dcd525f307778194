//! Bot command handlers — one per user-facing command.

mod cities;
mod report;
mod subscription;

#[cfg(test)]
mod tests;

pub use subscription::handle_language_callback;

use crate::i18n::Store;
use crate::report::ReportBuilder;
use skycast_core::error::SkycastError;
use skycast_core::state::Registry;
use skycast_core::traits::Messenger;

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub registry: &'a Registry,
    pub translations: &'a Store,
    pub messenger: &'a dyn Messenger,
    pub reporter: &'a ReportBuilder,
}

/// Known bot commands.
#[derive(Debug)]
pub enum Command {
    Start,
    Report,
    Done,
    AddCity,
    RemoveCity,
    MyCities,
    Stop,
}

impl Command {
    /// Parse a command from message text. Returns `None` for anything else
    /// (unknown commands and free text get a usage hint from the gateway).
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        // Strip @botname suffix (e.g. "/report@skycast_bot" → "/report").
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Some(Self::Start),
            "/report" => Some(Self::Report),
            "/done" => Some(Self::Done),
            "/addcity" => Some(Self::AddCity),
            "/removecity" => Some(Self::RemoveCity),
            "/mycities" => Some(Self::MyCities),
            "/stop" => Some(Self::Stop),
            _ => None,
        }
    }
}

/// The command's arguments: everything after the command word, joined so
/// multi-word city names ("Kuala Lumpur") survive.
fn args(text: &str) -> String {
    text.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
}

/// Handle a command for the given chat.
pub async fn handle(
    cmd: Command,
    ctx: &CommandContext<'_>,
    chat_id: i64,
    text: &str,
) -> Result<(), SkycastError> {
    match cmd {
        Command::Start => subscription::handle_start(ctx, chat_id).await,
        Command::Stop => subscription::handle_stop(ctx, chat_id).await,
        Command::AddCity => cities::handle_add_city(ctx, chat_id, &args(text)).await,
        Command::RemoveCity => cities::handle_remove_city(ctx, chat_id, &args(text)).await,
        Command::MyCities => cities::handle_my_cities(ctx, chat_id).await,
        Command::Done => cities::handle_done(ctx, chat_id).await,
        Command::Report => report::handle_report(ctx, chat_id).await,
    }
}
