//! Outbound HTTP configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Default timeout of a single ticker request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client settings shared by all exchange adapters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Timeout of each outbound request (default: 5s).
    #[serde(default, with = "duration")]
    pub timeout: Duration,
    /// Retry behaviour for transient failures.
    pub retry: Option<RetryConfig>,
}

impl HttpConfig {
    /// Request timeout, falling back to the default when unset.
    pub fn timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_REQUEST_TIMEOUT
        } else {
            self.timeout
        }
    }
}

/// Retry settings for failed requests.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one.
    pub max_attempts: Option<u32>,
    /// Delay before the first retry.
    #[serde(default, with = "duration")]
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    #[serde(default, with = "duration")]
    pub max_delay: Duration,
    /// Factor by which delay increases after each retry.
    pub multiplier: Option<f64>,
}
