use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Language utilities for the two catalog locales
///
/// This module maps ISO 639-1 and ISO 639-3 codes onto the locales the
/// catalog is authored in, and provides the locale-keyed text container used
/// by every catalog entity.
/// Locales the catalog is authored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, the fallback locale for all entities
    #[default]
    En,
    /// Arabic
    Ar,
}

impl Locale {
    /// All supported locales, fallback locale first
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    /// Parse an ISO 639-1 or ISO 639-3 code into a supported locale
    pub fn from_code(code: &str) -> Result<Self> {
        let normalized_code = code.trim().to_lowercase();

        let language = match normalized_code.len() {
            2 => Language::from_639_1(&normalized_code),
            3 => Language::from_639_3(&normalized_code),
            _ => None,
        };

        match language {
            Some(Language::Eng) => Ok(Locale::En),
            Some(Language::Ara) => Ok(Locale::Ar),
            Some(other) => Err(anyhow!("Unsupported locale: {} ({})", code, other.to_name())),
            None => Err(anyhow!("Invalid language code: {}", code)),
        }
    }

    /// Recognize a route segment as a locale prefix
    ///
    /// Only the exact two-letter lowercase codes count, so `/AR/...` or
    /// `/ara/...` are ordinary paths.
    pub fn from_prefix(segment: &str) -> Option<Self> {
        match segment {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }

    // @returns: ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// English name of the language, e.g. "Arabic"
    pub fn english_name(&self) -> &'static str {
        self.language().to_name()
    }

    /// Name of the language in the language itself, e.g. "العربية"
    pub fn native_name(&self) -> &'static str {
        self.language()
            .to_autonym()
            .unwrap_or_else(|| self.english_name())
    }

    /// Whether text in this locale is laid out right-to-left
    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }

    fn language(&self) -> Language {
        match self {
            Self::En => Language::Eng,
            Self::Ar => Language::Ara,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// Display text keyed by locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: String,

    #[serde(default)]
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Raw value for a locale, possibly empty
    pub fn raw(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => &self.ar,
        }
    }

    /// Value for a locale, falling back to English and then to any
    /// non-empty value
    pub fn get(&self, locale: Locale) -> &str {
        let preferred = self.raw(locale);
        if !preferred.trim().is_empty() {
            return preferred;
        }
        if !self.en.trim().is_empty() {
            return &self.en;
        }
        &self.ar
    }

    /// True when at least one locale carries a non-empty value
    pub fn has_any(&self) -> bool {
        Locale::ALL.iter().any(|l| !self.raw(*l).trim().is_empty())
    }
}

/// Check whether a character falls in one of the Arabic Unicode blocks
pub fn is_arabic_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'   // Arabic
        | '\u{0750}'..='\u{077F}' // Arabic Supplement
        | '\u{08A0}'..='\u{08FF}' // Arabic Extended-A
        | '\u{FB50}'..='\u{FDFF}' // Presentation Forms-A
        | '\u{FE70}'..='\u{FEFF}' // Presentation Forms-B
    )
}

/// Check whether text contains any Arabic-range character
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}
