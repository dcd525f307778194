//! Localized UI strings, loaded from per-language TOML packs.
//!
//! Every string a handler can reference is a [`MessageKey`] variant, and
//! pack loading verifies completeness up front: a missing translation
//! aborts startup with the offending keys listed, instead of surfacing as
//! a broken reply mid-conversation.


use skycast_core::error::SkycastError;
use skycast_core::language::Language;
use std::collections::HashMap;
use std::path::Path;

/// Every message key the handlers reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Display prefix prepended to replies (empty for LTR languages, a
    /// direction mark for RTL ones).
    Ecode,
    /// Name of the language the AI should answer in.
    AiLanguage,
    WeatherReport,
    AiResponse,
    WeatherUnavailable,
    AiError,
    LanguageSelected,
    Subscribed,
    Unsubscribed,
    NotSubscribed,
    SpecifyCity,
    SpecifyCityRemove,
    CityAdded,
    CityRemoved,
    CityNotFound,
    NoCities,
    YourCities,
    SelectLanguageFirst,
    PreparingReport,
    ProcessingComplete,
    Help,
}

impl MessageKey {
    pub const ALL: [MessageKey; 21] = [
        Self::Ecode,
        Self::AiLanguage,
        Self::WeatherReport,
        Self::AiResponse,
        Self::WeatherUnavailable,
        Self::AiError,
        Self::LanguageSelected,
        Self::Subscribed,
        Self::Unsubscribed,
        Self::NotSubscribed,
        Self::SpecifyCity,
        Self::SpecifyCityRemove,
        Self::CityAdded,
        Self::CityRemoved,
        Self::CityNotFound,
        Self::NoCities,
        Self::YourCities,
        Self::SelectLanguageFirst,
        Self::PreparingReport,
        Self::ProcessingComplete,
        Self::Help,
    ];

    /// The key string used in the TOML packs.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ecode => "ecode",
            Self::AiLanguage => "ai_language",
            Self::WeatherReport => "weather_report",
            Self::AiResponse => "ai_response",
            Self::WeatherUnavailable => "weather_unavailable",
            Self::AiError => "ai_error",
            Self::LanguageSelected => "language_selected",
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::NotSubscribed => "not_subscribed",
            Self::SpecifyCity => "specify_city",
            Self::SpecifyCityRemove => "specify_city_remove",
            Self::CityAdded => "city_added",
            Self::CityRemoved => "city_removed",
            Self::CityNotFound => "city_not_found",
            Self::NoCities => "no_cities",
            Self::YourCities => "your_cities",
            Self::SelectLanguageFirst => "select_language_first",
            Self::PreparingReport => "preparing_report",
            Self::ProcessingComplete => "processing_complete",
            Self::Help => "help",
        }
    }
}

/// The translated strings for one language.
#[derive(Debug, Clone)]
pub struct Pack {
    strings: HashMap<String, String>,
}

impl Pack {
    /// Parse a flat string-to-string TOML table and verify every
    /// [`MessageKey`] is present. Extra keys are ignored.
    pub fn from_toml(content: &str) -> Result<Self, SkycastError> {
        let strings: HashMap<String, String> = toml::from_str(content)
            .map_err(|e| SkycastError::Language(format!("failed to parse pack: {e}")))?;

        let missing: Vec<&str> = MessageKey::ALL
            .iter()
            .map(|k| k.key())
            .filter(|k| !strings.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            return Err(SkycastError::Language(format!(
                "pack is missing keys: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { strings })
    }

    /// Look up a message. Completeness is checked at load time, so this
    /// cannot miss for a pack that made it through `from_toml`.
    pub fn get(&self, key: MessageKey) -> &str {
        self.strings.get(key.key()).map_or("", String::as_str)
    }

    /// Look up a message and substitute the `{city}` placeholder.
    pub fn city(&self, key: MessageKey, city: &str) -> String {
        self.get(key).replace("{city}", city)
    }
}

/// All translation packs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Store {
    english: Pack,
    persian: Pack,
}

impl Store {
    pub fn new(english: Pack, persian: Pack) -> Self {
        Self { english, persian }
    }

    /// Load every supported language's pack from `dir`. Any parse or
    /// completeness failure aborts the load.
    pub fn load(dir: &Path) -> Result<Self, SkycastError> {
        let load_one = |language: Language| -> Result<Pack, SkycastError> {
            let path = dir.join(format!("{}.toml", language.file_stem()));
            let content = std::fs::read_to_string(&path).map_err(|e| {
                SkycastError::Language(format!("failed to read {}: {e}", path.display()))
            })?;
            Pack::from_toml(&content).map_err(|e| {
                SkycastError::Language(format!("{}: {e}", path.display()))
            })
        };

        Ok(Self {
            english: load_one(Language::English)?,
            persian: load_one(Language::Persian)?,
        })
    }

    /// The pack for a user's selected language. Users who have not chosen
    /// yet get the English pack as the generic fallback.
    pub fn pack(&self, language: Option<Language>) -> &Pack {
        match language.unwrap_or(Language::English) {
            Language::English => &self.english,
            Language::Persian => &self.persian,
        }
    }
}
