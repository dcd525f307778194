//! Serde default helpers for the config structs.

pub(super) fn default_name() -> String {
    "skycast".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_languages_dir() -> String {
    "languages".to_string()
}

pub(super) fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

pub(super) fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_scheduler_hour() -> u32 {
    5
}

pub(super) fn default_scheduler_minute() -> u32 {
    30
}
