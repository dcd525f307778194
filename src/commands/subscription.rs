//! Subscription lifecycle: /start, /stop, and the language-selection callback.

use super::CommandContext;
use crate::i18n::MessageKey;
use skycast_core::error::SkycastError;
use skycast_core::language::Language;
use skycast_core::message::CallbackQuery;
use tracing::{info, warn};

/// The /start prompt is shown before any language is chosen, so it carries
/// both languages verbatim.
const CHOOSE_LANGUAGE: &str = "Please choose your language:\nلطفا زبان خود را انتخاب کنید:";

pub(super) async fn handle_start(
    ctx: &CommandContext<'_>,
    chat_id: i64,
) -> Result<(), SkycastError> {
    if ctx.registry.subscribe(chat_id) {
        info!("chat {chat_id} subscribed to daily reports");
    }

    let buttons: Vec<(String, String)> = Language::ALL
        .iter()
        .map(|lang| (lang.button_label().to_string(), lang.code().to_string()))
        .collect();

    ctx.messenger
        .send_keyboard(chat_id, CHOOSE_LANGUAGE, &buttons)
        .await?;
    Ok(())
}

pub(super) async fn handle_stop(
    ctx: &CommandContext<'_>,
    chat_id: i64,
) -> Result<(), SkycastError> {
    let pack = ctx.translations.pack(ctx.registry.language(chat_id));
    let reply = if ctx.registry.unsubscribe(chat_id) {
        info!("chat {chat_id} unsubscribed from daily reports");
        pack.get(MessageKey::Unsubscribed)
    } else {
        pack.get(MessageKey::NotSubscribed)
    };
    ctx.messenger.send_text(chat_id, reply).await?;
    Ok(())
}

/// A pressed button on the language-selection keyboard.
///
/// Sets the chat's language, acknowledges the callback, replaces the
/// prompt with a localized confirmation, and follows up with the
/// subscription note.
pub async fn handle_language_callback(
    ctx: &CommandContext<'_>,
    callback: &CallbackQuery,
) -> Result<(), SkycastError> {
    ctx.messenger.answer_callback(&callback.id).await?;

    let Some(language) = Language::from_code(&callback.data) else {
        warn!(
            "chat {}: unknown callback data '{}'",
            callback.chat_id, callback.data
        );
        return Ok(());
    };

    ctx.registry.set_language(callback.chat_id, language);
    info!("chat {} selected language {:?}", callback.chat_id, language);

    let pack = ctx.translations.pack(Some(language));
    ctx.messenger
        .edit_text(
            callback.chat_id,
            callback.message_id,
            pack.get(MessageKey::LanguageSelected),
        )
        .await?;
    ctx.messenger
        .send_text(callback.chat_id, pack.get(MessageKey::Subscribed))
        .await?;
    Ok(())
}
