//! Route wrapper session: guard, active locale and host history wired together.
//!
//! Pages mount only through [`LocaleRouter::render`], which hands them the
//! resolved locale and the current location, and renders nothing while a
//! correction is in flight.

use tracing::warn;

use crate::i18n::{LocaleHints, LocaleStore, SupportedLocale};
use crate::routing::{
    switch_locale, Navigator, ResolutionState, RouteGuard, RoutePath, SwitchOutcome, Transition,
};

/// Redirects allowed back to back before the session gives up on an event.
const MAX_REDIRECT_CHAIN: usize = 2;

pub struct LocaleRouter<N, S> {
    guard: RouteGuard,
    navigator: N,
    store: S,
    env: LocaleHints,
}

impl<N, S> LocaleRouter<N, S>
where
    N: Navigator,
    S: LocaleStore,
{
    /// `env` carries the browser-side hints (cookie, storage, language list,
    /// document language); query and path hints come from each location.
    pub fn new(navigator: N, store: S, env: LocaleHints) -> Self {
        Self {
            guard: RouteGuard::new(),
            navigator,
            store,
            env,
        }
    }

    pub fn with_guard(mut self, guard: RouteGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn state(&self) -> &ResolutionState {
        self.guard.state()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn active_locale(&self) -> Option<SupportedLocale> {
        self.store.active_locale()
    }

    /// Initial evaluation of the current location, then any follow-up events.
    pub fn mount(&mut self) -> &ResolutionState {
        let transition = self.evaluate();
        let chain = usize::from(matches!(transition, Transition::Redirect { .. }));
        self.drain(chain)
    }

    /// In-app navigation (link click).
    pub fn navigate(&mut self, path: impl Into<RoutePath>) -> &ResolutionState {
        self.navigator.push(path.into());
        self.sync()
    }

    /// Process every navigation event the host has queued.
    pub fn sync(&mut self) -> &ResolutionState {
        self.drain(0)
    }

    /// Explicit user locale switch from the current location.
    pub fn switch_locale(&mut self, target: SupportedLocale) -> SwitchOutcome {
        let current = self.navigator.location();
        let outcome = switch_locale(target, &current, &mut self.navigator, &mut self.store);
        self.sync();
        outcome
    }

    /// Render a page with the resolved locale; `None` unless resolved.
    pub fn render<T>(&self, page: impl FnOnce(&RoutePath, SupportedLocale) -> T) -> Option<T> {
        let location = self.navigator.location();
        self.guard.render(|locale| page(&location, locale))
    }

    fn evaluate(&mut self) -> Transition {
        let env = self.hints();
        self.guard.on_navigation(&mut self.navigator, &mut self.store, &env)
    }

    /// Environment hints, with the active locale standing in as the stored
    /// preference when the environment has none.
    fn hints(&self) -> LocaleHints {
        let mut env = self.env.clone();
        if env.local_storage.is_none() {
            env.local_storage = self.store.active_locale().map(|locale| locale.code().to_string());
        }
        env
    }

    fn drain(&mut self, mut chain: usize) -> &ResolutionState {
        while self.navigator.next_event().is_some() {
            match self.evaluate() {
                Transition::Redirect { to, .. } => {
                    chain += 1;
                    if chain > MAX_REDIRECT_CHAIN {
                        warn!("Redirect chain exceeded at {}, leaving location unresolved", to);
                        // Events queued by the abandoned chain are dropped so
                        // the next sync starts from a clean queue.
                        while self.navigator.next_event().is_some() {}
                        break;
                    }
                }
                Transition::Resolve { .. } => chain = 0,
            }
        }

        if let ResolutionState::Redirecting(target) = self.guard.state() {
            warn!(
                "Resolution stalled: host has not navigated to {} (still at {})",
                target,
                self.navigator.location()
            );
        }

        self.guard.state()
    }
}
