//! The /report command — on-demand report with live progress edits.

use super::CommandContext;
use crate::i18n::MessageKey;
use skycast_core::error::SkycastError;
use tracing::{info, warn};

/// Build and deliver a report for the chat's own city list.
///
/// Guarded: refuses before any provider call if the chat has not selected
/// a language or has no cities. Progress is reported by editing one
/// message with the percentage of cities actually completed.
pub(super) async fn handle_report(
    ctx: &CommandContext<'_>,
    chat_id: i64,
) -> Result<(), SkycastError> {
    let Some(language) = ctx.registry.language(chat_id) else {
        let pack = ctx.translations.pack(None);
        let reply = format!(
            "{}❌ {}",
            pack.get(MessageKey::Ecode),
            pack.get(MessageKey::SelectLanguageFirst)
        );
        ctx.messenger.send_text(chat_id, &reply).await?;
        return Ok(());
    };

    let pack = ctx.translations.pack(Some(language));
    let cities = ctx.registry.cities(chat_id);
    if cities.is_empty() {
        let reply = format!(
            "{}⚠️ {}",
            pack.get(MessageKey::Ecode),
            pack.get(MessageKey::NoCities)
        );
        ctx.messenger.send_text(chat_id, &reply).await?;
        return Ok(());
    }

    info!("chat {chat_id}: building report for {} cities", cities.len());

    let preparing = pack.get(MessageKey::PreparingReport);
    let progress_id = ctx
        .messenger
        .send_text(chat_id, &format!("⏳ {preparing}... (0%)"))
        .await?;

    let mut report = ctx.reporter.header(pack);
    let total = cities.len();
    for (done, city) in cities.iter().enumerate() {
        report.push_str(&ctx.reporter.city_block(pack, city).await);
        let completed = done + 1;
        if completed < total {
            let percent = completed * 100 / total;
            ctx.messenger
                .edit_text(
                    chat_id,
                    progress_id,
                    &format!("⏳ {preparing}... ({percent}%)"),
                )
                .await?;
        }
    }

    let final_text = format!(
        "✅ {}! (100%)\n\n{report}",
        pack.get(MessageKey::ProcessingComplete)
    );

    // A multi-city report can exceed the platform's message length cap, in
    // which case the in-place edit is rejected; deliver as fresh messages
    // (the channel splits those) instead.
    if let Err(e) = ctx
        .messenger
        .edit_text(chat_id, progress_id, &final_text)
        .await
    {
        warn!("chat {chat_id}: final edit failed, sending fresh: {e}");
        ctx.messenger.send_text(chat_id, &final_text).await?;
    }

    Ok(())
}
