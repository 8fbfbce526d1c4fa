//! Gateway configuration
//!
//! Built once at startup and handed to the store constructor. Missing
//! values are a startup failure, never a per-request one.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Environment variable holding the data service base URL
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the data service credential
pub const KEY_VAR: &str = "SUPABASE_KEY";

/// Optional per-request timeout (seconds) for upstream calls
pub const TIMEOUT_VAR: &str = "ADMISSIONS_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be set (environment or .env file)")]
    Missing { var: &'static str },

    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Connection settings for the external data service
#[derive(Clone)]
pub struct GatewayConfig {
    /// Service root, e.g. `https://xyz.supabase.co` (without `/rest/v1`)
    pub base_url: Url,
    /// Sent as both `apikey` and bearer token
    pub api_key: String,
    /// None keeps the transport default
    pub timeout: Option<Duration>,
}

// Hand-written so the credential never reaches logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Validate raw values into a config.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Missing { var: URL_VAR });
        }
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing { var: KEY_VAR });
        }

        let parsed = Url::parse(base_url).map_err(|_| ConfigError::InvalidUrl {
            var: URL_VAR,
            value: base_url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                var: URL_VAR,
                value: base_url.to_string(),
            });
        }

        Ok(Self {
            base_url: parsed,
            api_key: api_key.to_string(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `SUPABASE_URL`, `SUPABASE_KEY` and the optional timeout from the
    /// process environment. Callers load `.env` files beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_VAR).ok_or(ConfigError::Missing { var: URL_VAR })?;
        let key = lookup(KEY_VAR).ok_or(ConfigError::Missing { var: KEY_VAR })?;

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self::new(&url, &key)?.with_timeout(timeout))
    }

    /// `{base_url}/rest/v1`, tolerant of a trailing slash on the base.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn missing_url_is_fatal() {
        let err = GatewayConfig::from_lookup(lookup_from(&[(KEY_VAR, "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: URL_VAR }));
    }

    #[test]
    fn missing_key_is_fatal() {
        let err =
            GatewayConfig::from_lookup(lookup_from(&[(URL_VAR, "https://x.supabase.co")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: KEY_VAR }));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let err = GatewayConfig::new("https://x.supabase.co", "  ").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: KEY_VAR }));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = GatewayConfig::new("ftp://x.supabase.co", "k").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn rest_url_strips_trailing_slash() {
        let config = GatewayConfig::new("https://x.supabase.co/", "k").unwrap();
        assert_eq!(config.rest_url(), "https://x.supabase.co/rest/v1");
    }

    #[test]
    fn timeout_is_optional() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://x.supabase.co"),
            (KEY_VAR, "k"),
        ]))
        .unwrap();
        assert!(config.timeout.is_none());

        let config = GatewayConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://x.supabase.co"),
            (KEY_VAR, "k"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = GatewayConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://x.supabase.co"),
            (KEY_VAR, "k"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn debug_redacts_key() {
        let config = GatewayConfig::new("https://x.supabase.co", "super-secret").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
    }
}
