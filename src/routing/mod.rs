//! Locale-aware routing.
//!
//! Guarantees that every navigable URL starts with a supported locale segment
//! and that this segment and the active locale agree before anything renders.
//!
//! - `path`: `RoutePath` and the `canonicalize` rewrite
//! - `history`: the host navigation contract and an in-memory history
//! - `guard`: the per-navigation state machine
//! - `switch`: explicit, user-triggered locale changes
//! - `session`: the route wrapper tying the above to an active locale store

mod guard;
mod history;
mod path;
mod session;
mod switch;

pub use guard::{query_value, ResolutionState, RouteGuard, Transition, DEFAULT_QUERY_PARAM};
pub use history::{MemoryHistory, NavigationKind, Navigator};
pub use path::{canonicalize, classify_segment, LocaleSegment, RoutePath};
pub use session::LocaleRouter;
pub use switch::{switch_locale, SwitchOutcome};
