//! Route paths and locale canonicalization.
//!
//! A [`RoutePath`] keeps `pathname`, `search` and `hash` apart so the locale
//! segment can be rewritten without ever touching query or fragment state.

use std::fmt;

use crate::i18n::SupportedLocale;

/// A navigable location: `pathname + search + hash`.
///
/// `search` keeps its leading `?` and `hash` its leading `#`; either may be
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePath {
    pathname: String,
    search: String,
    hash: String,
}

/// Classification of the first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSegment {
    /// A supported locale code.
    Valid(SupportedLocale),
    /// Two characters long, but not a supported code (e.g. `xx`, `us`, `EN`).
    InvalidTwoLetter,
    /// No segments at all, or a first segment that is not two characters long.
    Absent,
}

impl RoutePath {
    /// Split a raw location into its three parts.
    ///
    /// The fragment starts at the first `#`; the query at the first `?`
    /// before it. A missing leading `/` is added so every pathname is absolute.
    pub fn parse(raw: &str) -> Self {
        let (before_hash, hash) = match raw.find('#') {
            Some(idx) => raw.split_at(idx),
            None => (raw, ""),
        };
        let (pathname, search) = match before_hash.find('?') {
            Some(idx) => before_hash.split_at(idx),
            None => (before_hash, ""),
        };

        let pathname = if pathname.starts_with('/') {
            pathname.to_string()
        } else {
            format!("/{pathname}")
        };

        Self {
            pathname,
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    fn from_segments<'a>(
        segments: impl IntoIterator<Item = &'a str>,
        search: &str,
        hash: &str,
    ) -> Self {
        let joined: Vec<&str> = segments.into_iter().collect();

        Self {
            pathname: format!("/{}", joined.join("/")),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Pathname components with empty ones (doubled or trailing slashes) removed.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.pathname.split('/').filter(|segment| !segment.is_empty())
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }

    pub fn locale_segment(&self) -> LocaleSegment {
        classify_segment(self.first_segment())
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl From<&str> for RoutePath {
    fn from(raw: &str) -> Self {
        RoutePath::parse(raw)
    }
}

/// Classify a first path segment.
///
/// Length is counted in Unicode scalar values, not bytes or UTF-16 units:
/// `é1` and `😀x` are both two characters and locale-shaped. The segment is
/// taken as given, without percent-decoding, so an encoded slug such as
/// `%C3%A9x` from a raw request target is longer than two and left alone.
pub fn classify_segment(segment: Option<&str>) -> LocaleSegment {
    let Some(segment) = segment else {
        return LocaleSegment::Absent;
    };

    if let Some(locale) = SupportedLocale::from_code(segment) {
        return LocaleSegment::Valid(locale);
    }

    if segment.chars().count() == 2 {
        LocaleSegment::InvalidTwoLetter
    } else {
        LocaleSegment::Absent
    }
}

/// Rewrite `path` so its first segment is `locale`.
///
/// - already `locale`: returned unchanged
/// - another supported locale, or any other two-character segment: replaced
/// - anything else (root, `estimate`, `en-US`): `locale` is prepended
///
/// Query and fragment are carried over verbatim. Total and deterministic.
///
/// Any two-character first segment counts as a stale locale and is dropped,
/// so a two-letter content slug at the root (e.g. `/us/...`) does not survive
/// canonicalization.
pub fn canonicalize(path: &RoutePath, locale: SupportedLocale) -> RoutePath {
    let mut segments: Vec<&str> = path.segments().collect();

    match path.locale_segment() {
        LocaleSegment::Valid(current) if current == locale => return path.clone(),
        LocaleSegment::Valid(_) | LocaleSegment::InvalidTwoLetter => segments[0] = locale.code(),
        LocaleSegment::Absent => segments.insert(0, locale.code()),
    }

    RoutePath::from_segments(segments, &path.search, &path.hash)
}
