use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Include error messages in failed responses (default: false)
    pub debug: bool,
    /// Absolute base URL used for calendar links (default: "http://localhost:3000")
    pub base_url: String,
    /// Backend used for calendars created without a calendarURI (default: "local")
    pub default_backend: String,
    /// User assumed when a request carries no `X-Remote-User` header (default: "admin")
    pub default_user: String,
    /// Report missing calendars as 404 instead of 400 (default: false)
    pub not_found_as_404: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CALBRIDGE_DEBUG` - Expose error messages (default: false)
    /// - `CALBRIDGE_BASE_URL` - Base URL for links (default: "http://localhost:3000")
    /// - `CALBRIDGE_DEFAULT_BACKEND` - Default backend id (default: "local")
    /// - `CALBRIDGE_DEFAULT_USER` - Fallback user id (default: "admin")
    /// - `CALBRIDGE_NOT_FOUND_AS_404` - Map missing calendars to 404 (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            debug: lookup("CALBRIDGE_DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            base_url: lookup("CALBRIDGE_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            default_backend: lookup("CALBRIDGE_DEFAULT_BACKEND")
                .map(|v| v.to_lowercase())
                .unwrap_or_else(|| "local".to_string()),
            default_user: lookup("CALBRIDGE_DEFAULT_USER").unwrap_or_else(|| "admin".to_string()),
            not_found_as_404: lookup("CALBRIDGE_NOT_FOUND_AS_404")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Returns a copy with debug output switched on or off.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
