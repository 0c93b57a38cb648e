//! Locale negotiation.
//!
//! Picks one supported locale out of several ranked hints. Hints are
//! free-form language tags; each is reduced to its primary subtag before
//! matching, and anything empty, malformed or unsupported is skipped.

use serde::Serialize;

use crate::i18n::SupportedLocale;

/// Where a locale hint came from, in negotiation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintSource {
    QueryParam,
    PathSegment,
    Cookie,
    LocalStorage,
    Navigator,
    HtmlTag,
}

/// The raw hints available for one navigation.
///
/// Every source is optional. `navigator` holds the browser's ranked language
/// list, most preferred first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleHints {
    pub query_param: Option<String>,
    pub path_segment: Option<String>,
    pub cookie: Option<String>,
    pub local_storage: Option<String>,
    pub navigator: Vec<String>,
    pub html_tag: Option<String>,
}

impl LocaleHints {
    /// Hints consisting only of a browser language list.
    pub fn from_navigator<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            navigator: languages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// All present hints in fixed priority order, tagged with their source.
    pub fn candidates(&self) -> impl Iterator<Item = (HintSource, &str)> + '_ {
        tagged(HintSource::QueryParam, &self.query_param)
            .into_iter()
            .chain(tagged(HintSource::PathSegment, &self.path_segment))
            .chain(tagged(HintSource::Cookie, &self.cookie))
            .chain(tagged(HintSource::LocalStorage, &self.local_storage))
            .chain(
                self.navigator
                    .iter()
                    .map(|value| (HintSource::Navigator, value.as_str())),
            )
            .chain(tagged(HintSource::HtmlTag, &self.html_tag))
    }
}

fn tagged(source: HintSource, hint: &Option<String>) -> Option<(HintSource, &str)> {
    hint.as_deref().map(|value| (source, value))
}

/// Reduce a language tag to its lower-cased primary subtag.
///
/// `"en-US"` and `"EN_gb"` both become `"en"`. Returns `None` for empty
/// input or a primary subtag containing anything but ASCII letters.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let primary = raw.trim().split(['-', '_']).next().unwrap_or_default();

    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some(primary.to_ascii_lowercase())
}

/// Pick the first hint that normalizes to a supported locale.
///
/// Falls back to the default locale when none qualifies; never fails.
pub fn negotiate<'a, I>(candidates: I) -> SupportedLocale
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .find_map(supported_from_hint)
        .unwrap_or_default()
}

/// Like [`negotiate`] over a full [`LocaleHints`], also reporting which
/// source won. The source is `None` when the default was applied.
pub fn negotiate_with_source(hints: &LocaleHints) -> (SupportedLocale, Option<HintSource>) {
    hints
        .candidates()
        .find_map(|(source, hint)| supported_from_hint(hint).map(|locale| (locale, Some(source))))
        .unwrap_or_else(|| (SupportedLocale::default(), None))
}

fn supported_from_hint(hint: &str) -> Option<SupportedLocale> {
    normalize_tag(hint).and_then(|code| SupportedLocale::from_code(&code))
}
