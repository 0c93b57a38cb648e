//! Redirect guard: the per-navigation gate in front of every page.
//!
//! On each navigation the guard either accepts the URL's locale (the URL wins
//! over whatever was active before) or computes the canonical path and asks
//! the host for a replace. Nothing renders until a navigation resolves.

use tracing::debug;

use crate::i18n::{negotiate_with_source, HintSource, LocaleHints, LocaleStore, SupportedLocale};
use crate::routing::{canonicalize, LocaleSegment, Navigator, RoutePath};

/// Default query parameter consulted as the highest-priority locale hint.
pub const DEFAULT_QUERY_PARAM: &str = "lng";

/// Where the guard stands for the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    /// Navigation seen, not yet evaluated.
    Unresolved,
    /// A corrective replace to the contained path is pending.
    Redirecting(RoutePath),
    /// The location carries this locale and it is active.
    Resolved(SupportedLocale),
}

impl ResolutionState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionState::Resolved(_))
    }
}

/// Outcome of evaluating one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Location is valid; `changed` when the active locale had to follow the URL.
    Resolve {
        locale: SupportedLocale,
        changed: bool,
    },
    /// Location needs correcting. `source` is the hint that chose `locale`,
    /// `None` when the default was used.
    Redirect {
        to: RoutePath,
        locale: SupportedLocale,
        source: Option<HintSource>,
    },
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    state: ResolutionState,
    query_param: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::with_query_param(DEFAULT_QUERY_PARAM)
    }

    /// A guard reading the explicit locale hint from query parameter `name`.
    pub fn with_query_param(name: impl Into<String>) -> Self {
        Self {
            state: ResolutionState::Unresolved,
            query_param: name.into(),
        }
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Complete the environment hints with what the location itself says:
    /// the query parameter and the raw first segment. Explicit values in
    /// `env` are kept.
    pub fn hints_for(&self, path: &RoutePath, env: &LocaleHints) -> LocaleHints {
        let mut hints = env.clone();
        if hints.query_param.is_none() {
            hints.query_param = query_value(path.search(), &self.query_param).map(str::to_string);
        }
        if hints.path_segment.is_none() {
            hints.path_segment = path.first_segment().map(str::to_string);
        }
        hints
    }

    /// Decide what a navigation to `path` requires. Pure: touches neither the
    /// store nor the host.
    pub fn evaluate(
        &self,
        path: &RoutePath,
        active: Option<SupportedLocale>,
        env: &LocaleHints,
    ) -> Transition {
        match path.locale_segment() {
            LocaleSegment::Valid(locale) => Transition::Resolve {
                locale,
                changed: active != Some(locale),
            },
            LocaleSegment::InvalidTwoLetter | LocaleSegment::Absent => {
                let (locale, source) = negotiate_with_source(&self.hints_for(path, env));
                Transition::Redirect {
                    to: canonicalize(path, locale),
                    locale,
                    source,
                }
            }
        }
    }

    /// Run the transition rule for the navigator's current location.
    ///
    /// A valid location updates the store when needed and resolves. Anything
    /// else issues a replace and leaves the guard redirecting until the next
    /// navigation event is evaluated.
    pub fn on_navigation<N, S>(
        &mut self,
        navigator: &mut N,
        store: &mut S,
        env: &LocaleHints,
    ) -> Transition
    where
        N: Navigator,
        S: LocaleStore,
    {
        self.state = ResolutionState::Unresolved;
        let path = navigator.location();
        let transition = self.evaluate(&path, store.active_locale(), env);

        match &transition {
            Transition::Resolve { locale, changed } => {
                if *changed {
                    store.set_active_locale(*locale);
                }
                self.state = ResolutionState::Resolved(*locale);
            }
            Transition::Redirect { to, locale, source } => {
                debug!(
                    "Redirecting {} -> {} (locale {} from {:?})",
                    path, to, locale, source
                );
                self.state = ResolutionState::Redirecting(to.clone());
                navigator.replace(to.clone());
            }
        }

        transition
    }

    /// Render `page` only once resolved; otherwise nothing at all.
    pub fn render<T>(&self, page: impl FnOnce(SupportedLocale) -> T) -> Option<T> {
        match self.state {
            ResolutionState::Resolved(locale) => Some(page(locale)),
            ResolutionState::Unresolved | ResolutionState::Redirecting(_) => None,
        }
    }
}

/// First value of query parameter `key` in a `?a=1&b=2` search string.
pub fn query_value<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Translation;
    use crate::routing::MemoryHistory;
    use proptest::prelude::*;

    fn hints(languages: &[&str]) -> LocaleHints {
        LocaleHints::from_navigator(languages.iter().copied())
    }

    // ==================== query_value Tests ====================

    #[test]
    fn test_query_value() {
        assert_eq!(query_value("?lng=en&x=1", "lng"), Some("en"));
        assert_eq!(query_value("?x=1&lng=fr", "lng"), Some("fr"));
        assert_eq!(query_value("?lng", "lng"), Some(""));
        assert_eq!(query_value("?x=1", "lng"), None);
        assert_eq!(query_value("", "lng"), None);
    }

    // ==================== evaluate Tests ====================

    #[test]
    fn test_valid_segment_resolves_without_change() {
        let guard = RouteGuard::new();
        let transition = guard.evaluate(
            &RoutePath::parse("/en/pricing"),
            Some(SupportedLocale::En),
            &LocaleHints::default(),
        );
        assert_eq!(
            transition,
            Transition::Resolve {
                locale: SupportedLocale::En,
                changed: false
            }
        );
    }

    #[test]
    fn test_url_locale_wins_over_active() {
        let guard = RouteGuard::new();
        let transition = guard.evaluate(
            &RoutePath::parse("/fr/estimate"),
            Some(SupportedLocale::En),
            &hints(&["en"]),
        );
        assert_eq!(
            transition,
            Transition::Resolve {
                locale: SupportedLocale::Fr,
                changed: true
            }
        );
    }

    #[test]
    fn test_root_redirects_to_negotiated_locale() {
        let guard = RouteGuard::new();
        let transition = guard.evaluate(&RoutePath::parse("/"), None, &hints(&["en-US"]));
        assert_eq!(
            transition,
            Transition::Redirect {
                to: RoutePath::parse("/en"),
                locale: SupportedLocale::En,
                source: Some(HintSource::Navigator),
            }
        );
    }

    #[test]
    fn test_query_param_is_read_from_location() {
        let guard = RouteGuard::new();
        let transition = guard.evaluate(&RoutePath::parse("/estimate?lng=en"), None, &hints(&["fr"]));
        assert_eq!(
            transition,
            Transition::Redirect {
                to: RoutePath::parse("/en/estimate?lng=en"),
                locale: SupportedLocale::En,
                source: Some(HintSource::QueryParam),
            }
        );
    }

    #[test]
    fn test_custom_query_param() {
        let guard = RouteGuard::with_query_param("lang");
        let path = RoutePath::parse("/?lang=en&lng=fr");
        let hints = guard.hints_for(&path, &LocaleHints::default());
        assert_eq!(hints.query_param.as_deref(), Some("en"));
    }

    #[test]
    fn test_unknown_hints_fall_back_to_default() {
        let guard = RouteGuard::new();
        let transition = guard.evaluate(&RoutePath::parse("/xx/estimate?x=1#top"), None, &hints(&["de"]));
        assert_eq!(
            transition,
            Transition::Redirect {
                to: RoutePath::parse("/fr/estimate?x=1#top"),
                locale: SupportedLocale::Fr,
                source: None,
            }
        );
    }

    // ==================== on_navigation Tests ====================

    #[test]
    fn test_redirect_replaces_and_suppresses_render() {
        let mut guard = RouteGuard::new();
        let mut history = MemoryHistory::new("/");
        let mut store = Translation::new();

        guard.on_navigation(&mut history, &mut store, &hints(&["en"]));

        assert_eq!(guard.state(), &ResolutionState::Redirecting(RoutePath::parse("/en")));
        assert_eq!(guard.render(|_| "page"), None);
        assert_eq!(history.len(), 1);
        assert_eq!(history.location().to_string(), "/en");
        // Store is only written once the corrected location resolves.
        assert_eq!(store.active_locale(), None);
    }

    #[test]
    fn test_resolve_updates_store_and_renders() {
        let mut guard = RouteGuard::new();
        let mut history = MemoryHistory::new("/en/pricing");
        let mut store = Translation::with_locale(SupportedLocale::Fr);

        guard.on_navigation(&mut history, &mut store, &LocaleHints::default());

        assert_eq!(guard.state(), &ResolutionState::Resolved(SupportedLocale::En));
        assert_eq!(store.active_locale(), Some(SupportedLocale::En));
        assert_eq!(guard.render(|locale| locale.code()), Some("en"));
        assert!(history.navigations().is_empty());
    }

    #[test]
    fn test_new_guard_renders_nothing() {
        let guard = RouteGuard::new();
        assert_eq!(guard.state(), &ResolutionState::Unresolved);
        assert_eq!(guard.render(|_| ()), None);
    }

    // ==================== Property Tests ====================

    fn any_locale() -> impl Strategy<Value = SupportedLocale> {
        prop_oneof![Just(SupportedLocale::Fr), Just(SupportedLocale::En)]
    }

    proptest! {
        #[test]
        fn prop_at_most_one_redirect(
            raw in "(/[a-zA-Z-]{0,4}){0,4}/{0,2}(\\?[a-z=]{0,6})?(#[a-z]{0,4})?",
            hint in "[a-zA-Z-]{0,5}",
            active in proptest::option::of(any_locale()),
        ) {
            let mut guard = RouteGuard::new();
            let mut history = MemoryHistory::new(raw.as_str());
            let mut store = match active {
                Some(locale) => Translation::with_locale(locale),
                None => Translation::new(),
            };
            let env = LocaleHints::from_navigator([hint]);

            guard.on_navigation(&mut history, &mut store, &env);
            let second = guard.on_navigation(&mut history, &mut store, &env);

            let resolved = matches!(second, Transition::Resolve { .. });
            prop_assert!(resolved);
            prop_assert!(guard.state().is_resolved());
            prop_assert!(history.navigations().len() <= 1);
            prop_assert_eq!(history.len(), 1);
        }
    }
}
