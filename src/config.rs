use std::path::PathBuf;

use anyhow::Result;

use crate::routing::DEFAULT_QUERY_PARAM;

/// Default name of the cookie holding a previously chosen locale.
pub const DEFAULT_LOCALE_COOKIE: &str = "i18next";

#[derive(Debug, Clone)]
pub struct Config {
    // HTTP
    pub port: u16,

    // Directory holding the built SPA (index.html + assets/)
    pub static_dir: PathBuf,

    // Locale hint sources
    pub locale_query_param: String,
    pub locale_cookie: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist")),

            locale_query_param: std::env::var("LOCALE_QUERY_PARAM")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_QUERY_PARAM.to_string()),
            locale_cookie: std::env::var("LOCALE_COOKIE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCALE_COOKIE.to_string()),
        })
    }

    /// Path of the SPA shell served for every resolved page.
    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.static_dir.join("assets")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            static_dir: PathBuf::from("dist"),
            locale_query_param: DEFAULT_QUERY_PARAM.to_string(),
            locale_cookie: DEFAULT_LOCALE_COOKIE.to_string(),
        }
    }
}
