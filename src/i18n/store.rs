//! Active locale ownership.
//!
//! The translation layer owns the one authoritative "active locale" value.
//! Routing reads and writes it only through [`LocaleStore`]; pages receive the
//! resolved value explicitly instead of reading any global.

use tracing::info;

use crate::i18n::SupportedLocale;

/// Accessor pair for the active locale.
pub trait LocaleStore {
    /// The active locale, or `None` before the first resolution.
    fn active_locale(&self) -> Option<SupportedLocale>;

    fn set_active_locale(&mut self, locale: SupportedLocale);
}

/// Translation state: which locale's resources are currently in use.
#[derive(Debug, Clone, Default)]
pub struct Translation {
    active: Option<SupportedLocale>,
    changes: usize,
}

impl Translation {
    /// A translation layer that has not resolved any locale yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A translation layer already running in `locale`.
    pub fn with_locale(locale: SupportedLocale) -> Self {
        Self {
            active: Some(locale),
            changes: 0,
        }
    }

    /// The UI-reported locale preference, usable as a negotiation hint.
    pub fn ui_preference(&self) -> Option<&'static str> {
        self.active.map(|locale| locale.code())
    }

    /// How many times the active locale has actually changed.
    pub fn changes(&self) -> usize {
        self.changes
    }
}

impl LocaleStore for Translation {
    fn active_locale(&self) -> Option<SupportedLocale> {
        self.active
    }

    fn set_active_locale(&mut self, locale: SupportedLocale) {
        if self.active == Some(locale) {
            return;
        }

        info!(
            "Active locale changed: {} -> {}",
            self.active.map(|l| l.code()).unwrap_or("unset"),
            locale
        );
        self.active = Some(locale);
        self.changes += 1;
    }
}
