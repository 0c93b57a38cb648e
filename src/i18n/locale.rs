//! Supported locale type.
//!
//! `SupportedLocale` is a closed enum: only the codes the app ships
//! translations for can be represented, so every downstream consumer can
//! rely on having a valid locale.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::i18n::{LocaleConfig, LocaleRegistry};

/// Errors raised when turning free-form text into a [`SupportedLocale`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unsupported locale code: '{0}'")]
    Unsupported(String),
}

/// A locale the app can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLocale {
    Fr,
    En,
}

impl SupportedLocale {
    /// Every supported locale, in registry order.
    pub const ALL: [SupportedLocale; 2] = [SupportedLocale::Fr, SupportedLocale::En];

    /// Look up a locale by its exact two-letter code.
    ///
    /// Returns `None` for anything else, including differently cased codes.
    pub fn from_code(code: &str) -> Option<SupportedLocale> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }

    /// The ISO 639-1 code used as the first path segment.
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLocale::Fr => "fr",
            SupportedLocale::En => "en",
        }
    }

    /// Registry metadata for this locale.
    ///
    /// # Panics
    /// Panics if the registry is missing an entry for a variant, which would
    /// be a programming error in the registry defaults.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code())
            .expect("every SupportedLocale variant has a registry entry")
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for SupportedLocale {
    fn default() -> Self {
        LocaleRegistry::get().default_entry().locale
    }
}

impl fmt::Display for SupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SupportedLocale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SupportedLocale::from_code(s).ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        assert_eq!(SupportedLocale::from_code("fr"), Some(SupportedLocale::Fr));
        assert_eq!(SupportedLocale::from_code("en"), Some(SupportedLocale::En));
    }

    #[test]
    fn test_from_code_rejects_other_codes() {
        assert_eq!(SupportedLocale::from_code("de"), None);
        assert_eq!(SupportedLocale::from_code("FR"), None);
        assert_eq!(SupportedLocale::from_code(""), None);
        assert_eq!(SupportedLocale::from_code("en-US"), None);
    }

    // ==================== FromStr Tests ====================

    #[test]
    fn test_parse_error_names_the_code() {
        let err = "xx".parse::<SupportedLocale>().unwrap_err();
        assert_eq!(err, LocaleError::Unsupported("xx".to_string()));
        assert!(err.to_string().contains("'xx'"));
    }

    #[test]
    fn test_parse_and_display_agree() {
        for locale in SupportedLocale::ALL {
            assert_eq!(locale.to_string().parse::<SupportedLocale>(), Ok(locale));
        }
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_is_french() {
        assert_eq!(SupportedLocale::default(), SupportedLocale::Fr);
        assert!(SupportedLocale::Fr.is_default());
        assert!(!SupportedLocale::En.is_default());
    }

    #[test]
    fn test_native_names() {
        assert_eq!(SupportedLocale::Fr.native_name(), "Français");
        assert_eq!(SupportedLocale::En.native_name(), "English");
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&SupportedLocale::En).unwrap();
        assert_eq!(json, "\"en\"");
    }
}
