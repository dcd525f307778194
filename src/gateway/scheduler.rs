//! Daily report delivery at a fixed wall-clock time.

use super::Gateway;
use chrono::{Duration, Local, NaiveDateTime};
use tracing::{debug, error, info};

/// The next occurrence of `hour:minute` strictly after `now`: today if the
/// time is still ahead, otherwise tomorrow. `None` for an invalid time.
fn next_run(now: NaiveDateTime, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let today = now.date().and_hms_opt(hour, minute, 0)?;
    if now < today {
        Some(today)
    } else {
        Some(today + Duration::days(1))
    }
}

impl Gateway {
    /// Background task: sleep until the configured time, then push a
    /// report to every subscribed chat.
    pub(super) async fn scheduler_loop(self: std::sync::Arc<Self>) {
        let (hour, minute) = (self.scheduler_config.hour, self.scheduler_config.minute);

        loop {
            let now = Local::now().naive_local();
            let Some(next) = next_run(now, hour, minute) else {
                error!("scheduler: invalid daily time {hour:02}:{minute:02}, disabling");
                return;
            };
            let wait = (next - now).to_std().unwrap_or_default();
            info!("scheduler: next daily report at {next}");
            tokio::time::sleep(wait).await;

            self.deliver_daily_reports().await;
        }
    }

    /// One scheduled sweep. Each subscriber gets a report over its own
    /// city list; unconfigured chats are skipped and per-chat delivery
    /// failures do not stop the sweep.
    pub(super) async fn deliver_daily_reports(&self) {
        let subscribers = self.registry.subscribers();
        info!(
            "scheduler: delivering daily reports to {} subscriber(s)",
            subscribers.len()
        );

        for chat_id in subscribers {
            let Some(language) = self.registry.language(chat_id) else {
                debug!("scheduler: chat {chat_id} has no language yet, skipping");
                continue;
            };
            let cities = self.registry.cities(chat_id);
            if cities.is_empty() {
                debug!("scheduler: chat {chat_id} has no cities, skipping");
                continue;
            }

            let pack = self.translations.pack(Some(language));
            let report = self.reporter.build(pack, &cities).await;
            match self.channel.send_text(chat_id, &report).await {
                Ok(_) => info!("scheduler: delivered report to chat {chat_id}"),
                Err(e) => error!("scheduler: delivery to chat {chat_id} failed: {e}"),
            }
        }
    }
}
