mod commands;
mod gateway;
mod i18n;
mod report;

use clap::{Parser, Subcommand};
use skycast_channels::TelegramChannel;
use skycast_core::{config, state::Registry, traits::Commentator};
use skycast_providers::{GeminiCommentator, OpenWeatherClient};
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "skycast",
    version,
    about = "Daily weather reports with AI commentary, delivered over Telegram"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Check configuration and provider availability.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let cfg = config::load(&cli.config)?;

            if cfg.telegram.bot_token.is_empty() {
                anyhow::bail!(
                    "Telegram bot_token is empty. Set it under [telegram] in {}.",
                    cli.config
                );
            }
            if cfg.weather.api_key.is_empty() {
                anyhow::bail!(
                    "Weather api_key is empty. Set it under [weather] in {}.",
                    cli.config
                );
            }
            if cfg.gemini.api_key.is_empty() {
                anyhow::bail!(
                    "Gemini api_key is empty. Set it under [gemini] in {}.",
                    cli.config
                );
            }
            if cfg.scheduler.hour > 23 || cfg.scheduler.minute > 59 {
                anyhow::bail!(
                    "scheduler time {:02}:{:02} is not a valid wall-clock time",
                    cfg.scheduler.hour,
                    cfg.scheduler.minute
                );
            }

            // Every handler string must exist in every pack; refuse to
            // start with a broken translation rather than fail mid-chat.
            let translations = i18n::Store::load(Path::new(&cfg.skycast.languages_dir))?;

            let commentator = Arc::new(GeminiCommentator::from_config(&cfg.gemini));
            if !commentator.is_available().await {
                anyhow::bail!("commentary provider '{}' is not available", commentator.name());
            }

            let forecaster = Arc::new(OpenWeatherClient::from_config(&cfg.weather));
            let reporter = report::ReportBuilder::new(forecaster, commentator);
            let channel = Arc::new(TelegramChannel::new(&cfg.telegram));

            println!("skycast — starting bot...");
            let gw = Arc::new(gateway::Gateway::new(
                channel,
                Registry::in_memory(),
                translations,
                reporter,
                cfg.scheduler.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            println!("skycast — Status Check\n");
            println!("Config: {}", cli.config);

            println!(
                "  telegram: {}",
                if cfg.telegram.bot_token.is_empty() {
                    "missing bot_token"
                } else {
                    "configured"
                }
            );
            println!(
                "  weather: {}",
                if cfg.weather.api_key.is_empty() {
                    "missing api_key"
                } else {
                    "configured"
                }
            );

            let commentator = GeminiCommentator::from_config(&cfg.gemini);
            println!(
                "  gemini ({}): {}",
                cfg.gemini.model,
                if commentator.is_available().await {
                    "available"
                } else {
                    "not available"
                }
            );

            match i18n::Store::load(Path::new(&cfg.skycast.languages_dir)) {
                Ok(_) => println!("  languages: complete ({})", cfg.skycast.languages_dir),
                Err(e) => println!("  languages: {e}"),
            }

            println!(
                "  daily report: {}",
                if cfg.scheduler.enabled {
                    format!("{:02}:{:02}", cfg.scheduler.hour, cfg.scheduler.minute)
                } else {
                    "disabled".to_string()
                }
            );
        }
    }

    Ok(())
}
