//! The closed set of languages the bot speaks.

use serde::{Deserialize, Serialize};

/// A supported bot language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Persian,
}

impl Language {
    /// Every supported language, in the order shown to users.
    pub const ALL: [Language; 2] = [Language::Persian, Language::English];

    /// Resolve a two-letter code from a language-selection callback.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::English),
            "fa" => Some(Self::Persian),
            _ => None,
        }
    }

    /// The two-letter code carried in callback data.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Persian => "fa",
        }
    }

    /// File stem of the translation pack under the languages directory.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Persian => "persian",
        }
    }

    /// Label for the language-selection keyboard button.
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::English => "English 🇬🇧",
            Self::Persian => "🇮🇷 فارسی",
        }
    }
}
