//! Locale registry: Single source of truth for the supported locales.
//!
//! The set is fixed at compile time and ordered. The first entry flagged as
//! default is the locale every negotiation falls back to.

use std::sync::OnceLock;

use crate::i18n::SupportedLocale;

/// Metadata for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// The locale this entry describes
    pub locale: SupportedLocale,

    /// Native name of the language (e.g., "Français", "English")
    pub native_name: &'static str,

    /// Whether this is the system default (exactly one entry)
    pub is_default: bool,
}

/// Global locale registry singleton.
///
/// Initialized once on first access and immutable thereafter; there is no
/// runtime registration of new locales.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Look up a locale entry by its exact two-letter code.
    ///
    /// Matching is case-sensitive: `"EN"` is not a supported code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|entry| entry.locale.code() == code)
    }

    /// All supported locales in registry order.
    pub fn list(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// The default locale entry.
    ///
    /// # Panics
    /// Panics if the registry does not flag exactly one default, which is a
    /// programming error in `default_locales`.
    pub fn default_entry(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self.locales.iter().filter(|entry| entry.is_default).collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            locale: SupportedLocale::Fr,
            native_name: "Français",
            is_default: true,
        },
        LocaleConfig {
            locale: SupportedLocale::En,
            native_name: "English",
            is_default: false,
        },
    ]
}
