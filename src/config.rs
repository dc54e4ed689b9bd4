//! Runtime configuration read from the environment (and `.env` via dotenv).

use std::time::Duration;

use thiserror::Error;

use crate::api::TransactionsClient;

pub const API_URL_VAR: &str = "TRANSACTIONS_API_URL";
pub const TIMEOUT_VAR: &str = "TRANSACTIONS_API_TIMEOUT_SECS";

#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),
    #[error("{0} must be a whole number of seconds greater than zero, got '{1}'")]
    InvalidTimeout(&'static str, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the backend serving the `transactions` resource
    pub api_url: String,
    /// Per-request timeout. `None` waits as long as the connection stays open.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = match lookup(API_URL_VAR) {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::EmptyValue(API_URL_VAR)),
            Some(url) => url.trim().to_string(),
            None => TransactionsClient::DEFAULT_BASE_URL.to_string(),
        };

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout(TIMEOUT_VAR, raw)),
            },
            None => None,
        };

        Ok(Config {
            api_url,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.api_url, "http://localhost:3333");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (API_URL_VAR, " https://finance.example.com/api "),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://finance.example.com/api");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[(API_URL_VAR, "  ")])),
            Err(ConfigError::EmptyValue(API_URL_VAR))
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[(TIMEOUT_VAR, "0")])),
            Err(ConfigError::InvalidTimeout(TIMEOUT_VAR, "0".to_string()))
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[(TIMEOUT_VAR, "soon")])),
            Err(ConfigError::InvalidTimeout(TIMEOUT_VAR, "soon".to_string()))
        );
    }
}
