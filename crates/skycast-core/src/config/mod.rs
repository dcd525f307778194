mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SkycastError;
use defaults::*;

/// Top-level skycast configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub skycast: AppConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory holding one translation pack per supported language.
    #[serde(default = "default_languages_dir")]
    pub languages_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            languages_dir: default_languages_dir(),
        }
    }
}

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
}

/// Weather provider config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
        }
    }
}

/// Gemini commentary provider config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
        }
    }
}

/// Daily report scheduler config. The trigger fires once per day at the
/// given wall-clock time in the host's local timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_scheduler_hour")]
    pub hour: u32,
    #[serde(default = "default_scheduler_minute")]
    pub minute: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: default_scheduler_hour(),
            minute: default_scheduler_minute(),
        }
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, SkycastError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| SkycastError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| SkycastError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
