//! City list handlers: /addcity, /removecity, /mycities, /done.

use super::CommandContext;
use crate::i18n::MessageKey;
use skycast_core::error::SkycastError;

pub(super) async fn handle_add_city(
    ctx: &CommandContext<'_>,
    chat_id: i64,
    city: &str,
) -> Result<(), SkycastError> {
    let pack = ctx.translations.pack(ctx.registry.language(chat_id));
    if city.is_empty() {
        let reply = format!(
            "{}❌ {}",
            pack.get(MessageKey::Ecode),
            pack.get(MessageKey::SpecifyCity)
        );
        ctx.messenger.send_text(chat_id, &reply).await?;
        return Ok(());
    }

    ctx.registry.add_city(chat_id, city);
    let reply = format!(
        "{}✅ {}",
        pack.get(MessageKey::Ecode),
        pack.city(MessageKey::CityAdded, city)
    );
    ctx.messenger.send_text(chat_id, &reply).await?;
    Ok(())
}

pub(super) async fn handle_remove_city(
    ctx: &CommandContext<'_>,
    chat_id: i64,
    city: &str,
) -> Result<(), SkycastError> {
    let pack = ctx.translations.pack(ctx.registry.language(chat_id));
    if city.is_empty() {
        let reply = format!(
            "{}❌ {}",
            pack.get(MessageKey::Ecode),
            pack.get(MessageKey::SpecifyCityRemove)
        );
        ctx.messenger.send_text(chat_id, &reply).await?;
        return Ok(());
    }

    let reply = if ctx.registry.remove_city(chat_id, city) {
        format!(
            "{}✅ {}",
            pack.get(MessageKey::Ecode),
            pack.city(MessageKey::CityRemoved, city)
        )
    } else {
        format!(
            "{}⚠️ {}",
            pack.get(MessageKey::Ecode),
            pack.city(MessageKey::CityNotFound, city)
        )
    };
    ctx.messenger.send_text(chat_id, &reply).await?;
    Ok(())
}

pub(super) async fn handle_my_cities(
    ctx: &CommandContext<'_>,
    chat_id: i64,
) -> Result<(), SkycastError> {
    let pack = ctx.translations.pack(ctx.registry.language(chat_id));
    let cities = ctx.registry.cities(chat_id);
    let reply = if cities.is_empty() {
        format!(
            "{}⚠️ {}",
            pack.get(MessageKey::Ecode),
            pack.get(MessageKey::NoCities)
        )
    } else {
        format!(
            "{}✅ {}: {}",
            pack.get(MessageKey::Ecode),
            pack.get(MessageKey::YourCities),
            cities.join(", ")
        )
    };
    ctx.messenger.send_text(chat_id, &reply).await?;
    Ok(())
}

/// Informational acknowledgment of the current list; no state change.
pub(super) async fn handle_done(
    ctx: &CommandContext<'_>,
    chat_id: i64,
) -> Result<(), SkycastError> {
    let pack = ctx.translations.pack(ctx.registry.language(chat_id));
    let cities = ctx.registry.cities(chat_id);
    let reply = if cities.is_empty() {
        format!("⚠️ {}", pack.get(MessageKey::NoCities))
    } else {
        format!(
            "✅ {}: {}",
            pack.get(MessageKey::YourCities),
            cities.join(", ")
        )
    };
    ctx.messenger.send_text(chat_id, &reply).await?;
    Ok(())
}
