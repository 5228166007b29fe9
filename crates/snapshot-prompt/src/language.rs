//! Prompt languages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of a prompt variant
///
/// Serialized as its lowercase ISO 639-1 code, so `"ru"` in JSON or an env var
/// reads back as [`Language::Russian`].
///
/// ```
/// use snapshot_prompt::Language;
///
/// assert_eq!(Language::from_code("RU"), Language::Russian);
/// assert_eq!(Language::from_code("de").code(), "de");
/// assert!(!Language::from_code("de").is_known());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Russian,
    /// Any other code; templates fall back to English for it
    Other(String),
}

impl Language {
    pub fn code(&self) -> &str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
            Self::Other(code) => code,
        }
    }

    /// Accepts codes, regional tags (`en-GB`, `ru-RU`) and the language's own name
    pub fn from_code(s: &str) -> Self {
        let normalized = s.trim().to_lowercase();
        let primary = normalized.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" | "english" => Self::English,
            "ru" | "russian" | "русский" => Self::Russian,
            _ => Self::Other(normalized),
        }
    }

    /// Whether bundled templates carry a variant for this language
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Self::from_code(&s)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}
