//! Gateway — the event loop connecting the Telegram channel to the
//! command handlers, plus the daily report scheduler.

mod scheduler;

use crate::commands::{self, Command, CommandContext};
use crate::i18n::{MessageKey, Store};
use crate::report::ReportBuilder;
use skycast_core::{
    config::SchedulerConfig,
    message::IncomingEvent,
    state::Registry,
    traits::{Channel, Messenger},
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The central gateway routing chat events to handlers.
pub struct Gateway {
    channel: Arc<dyn Channel>,
    registry: Registry,
    translations: Store,
    reporter: ReportBuilder,
    scheduler_config: SchedulerConfig,
}

impl Gateway {
    pub fn new(
        channel: Arc<dyn Channel>,
        registry: Registry,
        translations: Store,
        reporter: ReportBuilder,
        scheduler_config: SchedulerConfig,
    ) -> Self {
        Self {
            channel,
            registry,
            translations,
            reporter,
            scheduler_config,
        }
    }

    /// Run the main event loop until ctrl-c.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "skycast gateway running | channel: {} | daily report: {}",
            self.channel.name(),
            if self.scheduler_config.enabled {
                format!(
                    "{:02}:{:02}",
                    self.scheduler_config.hour, self.scheduler_config.minute
                )
            } else {
                "disabled".to_string()
            },
        );

        let mut rx = self
            .channel
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start channel: {e}"))?;

        // Spawn the daily report loop.
        let sched_handle = if self.scheduler_config.enabled {
            let gw = self.clone();
            Some(tokio::spawn(async move {
                gw.scheduler_loop().await;
            }))
        } else {
            None
        };

        // Main event loop with graceful shutdown.
        loop {
            tokio::select! {
                Some(event) = rx.recv() => {
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.handle_event(event).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        // Graceful shutdown.
        if let Some(h) = sched_handle {
            h.abort();
        }
        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel: {e}");
        }
        info!("Shutdown complete.");
        Ok(())
    }

    fn command_context(&self) -> CommandContext<'_> {
        CommandContext {
            registry: &self.registry,
            translations: &self.translations,
            messenger: self.channel.as_ref(),
            reporter: &self.reporter,
        }
    }

    /// Dispatch one event from the channel.
    async fn handle_event(self: Arc<Self>, event: IncomingEvent) {
        match event {
            IncomingEvent::Message(msg) => {
                let ctx = self.command_context();
                match Command::parse(&msg.text) {
                    Some(cmd) => {
                        if let Err(e) = commands::handle(cmd, &ctx, msg.chat_id, &msg.text).await {
                            error!("chat {}: handler failed: {e}", msg.chat_id);
                        }
                    }
                    None => {
                        // Free text and unknown commands get a usage hint.
                        let pack = self
                            .translations
                            .pack(self.registry.language(msg.chat_id));
                        if let Err(e) = self
                            .channel
                            .send_text(msg.chat_id, pack.get(MessageKey::Help))
                            .await
                        {
                            error!("chat {}: failed to send hint: {e}", msg.chat_id);
                        }
                    }
                }
            }
            IncomingEvent::Callback(cb) => {
                let ctx = self.command_context();
                if let Err(e) = commands::handle_language_callback(&ctx, &cb).await {
                    error!("chat {}: callback failed: {e}", cb.chat_id);
                }
            }
        }
    }
}
