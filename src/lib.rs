//! Locale-aware routing resolver for the fare estimator web app.
//!
//! Every navigable URL carries a two-letter locale segment (`/fr/...` or
//! `/en/...`), kept in step with the active translation locale. Malformed
//! locations are corrected with a single replace navigation before any page
//! renders; explicit language switches push a new entry and keep query and
//! fragment state intact.

pub mod config;
pub mod i18n;
pub mod routing;
pub mod server;
