//! HTTP host for the locale resolver.
//!
//! Each request is one navigation event. Application routes sit behind the
//! guard middleware: a valid locale segment passes through with the resolved
//! locale attached, anything else is answered with a temporary redirect to
//! the canonical path. `/switch/{target}` performs user-initiated switches.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::i18n::{LocaleHints, LocaleRegistry, ResolverMetrics, SupportedLocale, Translation};
use crate::routing::{
    switch_locale, LocaleSegment, NavigationKind, Navigator, RouteGuard, RoutePath, SwitchOutcome,
    Transition,
};

/// Bytes escaped in a `Location` header; non-ASCII is always escaped and
/// existing `%XX` escapes pass through untouched.
const LOCATION_ESCAPES: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>');

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metrics: Arc<ResolverMetrics>,
    guard: RouteGuard,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let guard = RouteGuard::with_query_param(config.locale_query_param.clone());
        Self {
            config: Arc::new(config),
            metrics: Arc::new(ResolverMetrics::new()),
            guard,
        }
    }
}

/// The locale a guarded request resolved to, available to page handlers as
/// a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub SupportedLocale);

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let pages: Router = Router::new()
        .fallback_service(ServeFile::new(state.config.index_file()))
        .layer(middleware::from_fn_with_state(state.clone(), locale_guard));

    Router::new()
        .route("/healthz", get(health))
        .route("/metrics", get(metrics))
        .route("/switch/:target", get(switch))
        .nest_service("/assets", ServeDir::new(state.config.assets_dir()))
        .fallback_service(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Navigator for a single HTTP exchange: the location is the request target
/// and a navigation request becomes the redirect response.
#[derive(Debug)]
struct ResponseNavigator {
    location: RoutePath,
    issued: Option<(NavigationKind, RoutePath)>,
}

impl ResponseNavigator {
    fn new(location: RoutePath) -> Self {
        Self {
            location,
            issued: None,
        }
    }

    /// Replace maps to 307 (no history entry for the malformed URL), push to
    /// 303 (a fresh, user-initiated page load).
    fn redirect(&self) -> Option<Response> {
        self.issued.as_ref().map(|(kind, path)| {
            let status = match kind {
                NavigationKind::Replace => StatusCode::TEMPORARY_REDIRECT,
                NavigationKind::Push | NavigationKind::Pop => StatusCode::SEE_OTHER,
            };
            redirect_response(status, path)
        })
    }
}

/// Redirect to `path` with a percent-encoded `Location`. A target that still
/// cannot form a header value is answered with `400 Bad Request`.
fn redirect_response(status: StatusCode, path: &RoutePath) -> Response {
    let encoded = utf8_percent_encode(&path.to_string(), LOCATION_ESCAPES).to_string();

    match HeaderValue::try_from(encoded) {
        Ok(location) => (status, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            warn!("Cannot redirect to {:?}: {}", path.to_string(), e);
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

impl Navigator for ResponseNavigator {
    fn location(&self) -> RoutePath {
        self.location.clone()
    }

    fn replace(&mut self, path: RoutePath) {
        self.issued = Some((NavigationKind::Replace, path));
    }

    fn push(&mut self, path: RoutePath) {
        self.issued = Some((NavigationKind::Push, path));
    }

    fn next_event(&mut self) -> Option<NavigationKind> {
        None
    }
}

async fn locale_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let location = req
        .uri()
        .path_and_query()
        .map(|pq| RoutePath::parse(pq.as_str()))
        .unwrap_or_else(|| RoutePath::parse("/"));
    let env = request_hints(req.headers(), &state.config.locale_cookie);

    let mut guard = state.guard.clone();
    let mut navigator = ResponseNavigator::new(location);
    let mut store = Translation::new();

    match guard.on_navigation(&mut navigator, &mut store, &env) {
        Transition::Resolve { locale, .. } => {
            state.metrics.record_resolved();
            req.extensions_mut().insert(ResolvedLocale(locale));

            let mut response = next.run(req).await;
            response
                .headers_mut()
                .insert(header::CONTENT_LANGUAGE, HeaderValue::from_static(locale.code()));
            response
        }
        Transition::Redirect { to, locale, source } => {
            state.metrics.record_redirect();
            if source.is_none() {
                state.metrics.record_default_fallback();
            }
            debug!("Guard redirect to {} ({}, source {:?})", to, locale, source);

            navigator
                .redirect()
                .unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
struct SwitchParams {
    from: Option<String>,
}

async fn switch(
    State(state): State<AppState>,
    Path(target): Path<String>,
    Query(params): Query<SwitchParams>,
) -> Response {
    let target: SupportedLocale = match target.parse() {
        Ok(locale) => locale,
        Err(e) => {
            warn!("Rejected locale switch: {}", e);
            let available: Vec<_> = LocaleRegistry::get()
                .list()
                .iter()
                .map(|entry| entry.locale.code())
                .collect();
            let message = format!("{} (available: {})", e, available.join(", "));
            return (StatusCode::NOT_FOUND, message).into_response();
        }
    };

    let from = params.from.as_deref().unwrap_or("/");
    if from.chars().any(char::is_control) {
        warn!("Rejected locale switch: control character in {:?}", from);
        return (StatusCode::BAD_REQUEST, "Invalid 'from' path").into_response();
    }

    let current = RoutePath::parse(from);
    // The page the user is on defines which locale is active.
    let mut store = match current.locale_segment() {
        LocaleSegment::Valid(locale) => Translation::with_locale(locale),
        LocaleSegment::InvalidTwoLetter | LocaleSegment::Absent => Translation::new(),
    };
    let mut navigator = ResponseNavigator::new(current.clone());

    match switch_locale(target, &current, &mut navigator, &mut store) {
        SwitchOutcome::Unchanged => {
            state.metrics.record_switch_noop();
            StatusCode::NO_CONTENT.into_response()
        }
        SwitchOutcome::Navigated(path) => {
            state.metrics.record_switch();
            info!("Locale switch to {} from {}", target, current);
            navigator
                .redirect()
                .unwrap_or_else(|| redirect_response(StatusCode::SEE_OTHER, &path))
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.report())
}

/// Locale hints carried by a request: the locale cookie and the ranked
/// `Accept-Language` list. Query and path hints are read by the guard.
pub fn request_hints(headers: &HeaderMap, cookie_name: &str) -> LocaleHints {
    let cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| cookie_value(value, cookie_name))
        .map(str::to_string);

    let navigator = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default();

    LocaleHints {
        cookie,
        navigator,
        ..LocaleHints::default()
    }
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// Language tags from an `Accept-Language` header, most preferred first.
///
/// Entries are ordered by q-value, keeping header order among equal weights.
/// Wildcards, `q=0` and entries with an unparsable weight are dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut ranked: Vec<(f32, &str)> = header
        .split(',')
        .filter_map(|item| {
            let mut parts = item.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let weight = match parts.find_map(|param| param.trim().strip_prefix("q=")) {
                Some(q) => q.trim().parse::<f32>().ok()?,
                None => 1.0,
            };
            (weight > 0.0).then_some((weight, tag))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, tag)| tag.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Accept-Language Tests ====================

    #[test]
    fn test_accept_language_sorted_by_weight() {
        assert_eq!(
            parse_accept_language("de;q=0.5, en-US;q=0.9, fr"),
            vec!["fr", "en-US", "de"]
        );
    }

    #[test]
    fn test_accept_language_keeps_order_for_equal_weights() {
        assert_eq!(parse_accept_language("en-GB, fr-FR, de"), vec!["en-GB", "fr-FR", "de"]);
    }

    #[test]
    fn test_accept_language_drops_wildcards_zero_and_malformed() {
        assert_eq!(
            parse_accept_language("*, en;q=0, fr;q=abc, de;q=0.1,,"),
            vec!["de"]
        );
        assert!(parse_accept_language("").is_empty());
    }

    // ==================== Cookie Tests ====================

    #[test]
    fn test_cookie_value() {
        assert_eq!(cookie_value("a=1; i18next=en; b=2", "i18next"), Some("en"));
        assert_eq!(cookie_value("i18next=\"fr\"", "i18next"), Some("fr"));
        assert_eq!(cookie_value("a=1", "i18next"), None);
        assert_eq!(cookie_value("xi18next=en", "i18next"), None);
    }

    #[test]
    fn test_request_hints() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; lang=en"));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("fr-CA,en;q=0.8"));

        let hints = request_hints(&headers, "lang");
        assert_eq!(hints.cookie.as_deref(), Some("en"));
        assert_eq!(hints.navigator, vec!["fr-CA", "en"]);
        assert_eq!(hints.query_param, None);
    }

    // ==================== ResponseNavigator Tests ====================

    #[test]
    fn test_replace_becomes_temporary_redirect() {
        let mut navigator = ResponseNavigator::new(RoutePath::parse("/"));
        navigator.replace(RoutePath::parse("/fr?x=1"));

        let response = navigator.redirect().unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/fr?x=1");
    }

    #[test]
    fn test_push_becomes_see_other() {
        let mut navigator = ResponseNavigator::new(RoutePath::parse("/fr"));
        navigator.push(RoutePath::parse("/en"));

        let response = navigator.redirect().unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[test]
    fn test_redirect_location_escapes_non_ascii() {
        let mut navigator = ResponseNavigator::new(RoutePath::parse("/fr/café"));
        navigator.push(RoutePath::parse("/en/café?q=a b"));

        let response = navigator.redirect().unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/en/caf%C3%A9?q=a%20b");
    }

    #[test]
    fn test_redirect_location_keeps_existing_escapes() {
        let response = redirect_response(
            StatusCode::TEMPORARY_REDIRECT,
            &RoutePath::parse("/fr/a%20b?x=%2F"),
        );
        assert_eq!(response.headers()[header::LOCATION], "/fr/a%20b?x=%2F");
    }

    #[test]
    fn test_redirect_location_escapes_control_characters() {
        let response = redirect_response(StatusCode::SEE_OTHER, &RoutePath::parse("/en/a\nb"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/en/a%0Ab");
    }

    #[test]
    fn test_no_navigation_no_redirect() {
        let navigator = ResponseNavigator::new(RoutePath::parse("/fr"));
        assert!(navigator.redirect().is_none());
    }
}
