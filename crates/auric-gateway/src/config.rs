//! Gateway connection configuration.
//!
//! Defaults suit a local development ledger. Override via environment
//! variables or explicit construction for staging and tests.

use url::Url;

/// Configuration for connecting to the ledger gateway.
///
/// Custom `Debug` implementation redacts the `session_token` field to
/// prevent credential leakage in log output.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the ledger gateway service.
    pub endpoint: Url,
    /// Bearer token authenticating this session to the gateway.
    pub session_token: String,
    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,
    /// Bound on the whole Submitting step, in seconds. Exceeding it yields
    /// a `Timeout` failure with unknown-outcome semantics.
    pub submit_timeout_secs: u64,
    /// Delay before the post-settlement balance refresh, in milliseconds.
    /// Tolerates eventual consistency of the read path relative to the
    /// write path.
    pub balance_refresh_delay_ms: u64,
    /// Upper bound on trade-order durations, in seconds.
    pub max_order_duration_secs: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("session_token", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("submit_timeout_secs", &self.submit_timeout_secs)
            .field("balance_refresh_delay_ms", &self.balance_refresh_delay_ms)
            .field("max_order_duration_secs", &self.max_order_duration_secs)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `AURIC_LEDGER_URL` (default: `http://127.0.0.1:8545`)
    /// - `AURIC_SESSION_TOKEN` (required)
    /// - `AURIC_TIMEOUT_SECS` (default: 30)
    /// - `AURIC_SUBMIT_TIMEOUT_SECS` (default: 30)
    /// - `AURIC_BALANCE_REFRESH_DELAY_MS` (default: 2000)
    /// - `AURIC_MAX_ORDER_DURATION_SECS` (default: 86400)
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_token =
            std::env::var("AURIC_SESSION_TOKEN").map_err(|_| ConfigError::MissingToken)?;
        let raw_url =
            std::env::var("AURIC_LEDGER_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".into());
        let endpoint = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("AURIC_LEDGER_URL".into(), e.to_string()))?;

        Ok(Self {
            endpoint,
            session_token,
            request_timeout_secs: env_u64("AURIC_TIMEOUT_SECS", 30),
            submit_timeout_secs: env_u64("AURIC_SUBMIT_TIMEOUT_SECS", 30),
            balance_refresh_delay_ms: env_u64("AURIC_BALANCE_REFRESH_DELAY_MS", 2000),
            max_order_duration_secs: env_u64("AURIC_MAX_ORDER_DURATION_SECS", 86_400),
        })
    }

    /// Configuration pointing at a local mock server (tests).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be
    /// parsed.
    pub fn local_mock(port: u16, token: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".into(), e.to_string()))?;
        Ok(Self {
            endpoint,
            session_token: token.to_string(),
            request_timeout_secs: 5,
            submit_timeout_secs: 5,
            balance_refresh_delay_ms: 50,
            max_order_duration_secs: 86_400,
        })
    }
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `AURIC_SESSION_TOKEN` was not set.
    #[error("AURIC_SESSION_TOKEN environment variable is required")]
    MissingToken,
    /// A URL variable failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let config = GatewayConfig::local_mock(9999, "super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn local_mock_defaults() {
        let config = GatewayConfig::local_mock(8545, "t").unwrap();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:8545/");
        assert_eq!(config.max_order_duration_secs, 86_400);
    }
}
