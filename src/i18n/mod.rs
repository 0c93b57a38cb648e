//! Internationalization (i18n) module.
//!
//! Everything the router needs to know about languages lives here: which
//! locales exist, how to pick one from browser signals, and who owns the
//! currently active one.
//!
//! # Architecture
//!
//! - `registry`: The fixed, ordered set of supported locales and their metadata
//! - `locale`: Closed `SupportedLocale` type (`fr` default, `en`)
//! - `negotiate`: Picks a supported locale from ranked hints
//! - `store`: The active locale accessor pair
//! - `metrics`: Resolver counters
//!
//! # Example
//!
//! ```rust
//! use fare_locale_router::i18n::{negotiate, SupportedLocale};
//!
//! assert_eq!(negotiate(["de-DE", "en-US"]), SupportedLocale::En);
//! assert_eq!(negotiate(["de-DE"]), SupportedLocale::Fr);
//! ```

mod locale;
mod metrics;
mod negotiate;
mod registry;
mod store;

pub use locale::{LocaleError, SupportedLocale};
pub use metrics::{MetricsReport, ResolverMetrics};
pub use negotiate::{negotiate, negotiate_with_source, normalize_tag, HintSource, LocaleHints};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use store::{LocaleStore, Translation};
