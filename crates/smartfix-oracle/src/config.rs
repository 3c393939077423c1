//! Oracle client configuration.

use smartfix_core::error::{Result, SmartfixError};
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENDPOINT_ENV: &str = "SMARTFIX_ORACLE_URL";
const TIMEOUT_ENV: &str = "SMARTFIX_ORACLE_TIMEOUT_SECS";

/// Where and how to reach the diagnosis oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Full URL of the diagnose endpoint.
    pub endpoint: String,
    /// Whole-request timeout. A timeout is surfaced as a transport error
    /// like any other; there is no retry.
    pub timeout: Duration,
}

impl OracleConfig {
    /// Creates a configuration with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// `SMARTFIX_ORACLE_URL` is required; `SMARTFIX_ORACLE_TIMEOUT_SECS` is
    /// optional and defaults to 30.
    ///
    /// # Errors
    ///
    /// `Config` if the endpoint is unset or the timeout is not a number.
    pub fn try_from_env() -> Result<Self> {
        let endpoint = env::var(ENDPOINT_ENV)
            .map_err(|_| SmartfixError::config(format!("{ENDPOINT_ENV} is not set")))?;

        let mut config = Self::new(endpoint);
        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            let secs: u64 = raw.parse().map_err(|_| {
                SmartfixError::config(format!("{TIMEOUT_ENV} must be a whole number of seconds"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_thirty_seconds() {
        let config = OracleConfig::new("http://localhost:3000/api/diagnose");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn with_timeout_overrides() {
        let config = OracleConfig::new("http://localhost:3000/api/diagnose")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
