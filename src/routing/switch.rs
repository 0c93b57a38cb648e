//! User-triggered locale switching.

use tracing::info;

use crate::i18n::{LocaleStore, SupportedLocale};
use crate::routing::{canonicalize, Navigator, RoutePath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Target was already active; nothing happened.
    Unchanged,
    /// Active locale changed and a push to this path was issued.
    Navigated(RoutePath),
}

/// Switch to `target` in response to an explicit user action.
///
/// Rewrites the locale segment of `current`, commits `target` as the active
/// locale, then pushes the new path so the previous language stays reachable
/// through the back button. Query and fragment survive untouched.
pub fn switch_locale<N, S>(
    target: SupportedLocale,
    current: &RoutePath,
    navigator: &mut N,
    store: &mut S,
) -> SwitchOutcome
where
    N: Navigator,
    S: LocaleStore,
{
    if store.active_locale() == Some(target) {
        return SwitchOutcome::Unchanged;
    }

    let next = canonicalize(current, target);
    store.set_active_locale(target);
    info!("Switching locale to {}: {} -> {}", target, current, next);
    navigator.push(next.clone());

    SwitchOutcome::Navigated(next)
}
