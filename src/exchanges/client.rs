//! Shared HTTP client for public ticker endpoints.

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use tracing::{debug, warn};

use super::{QuoteError, Result};
use crate::config::{HttpConfig, RetryConfig};

/// Default total attempts: the first request plus one retry.
const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default delay before the first retry.
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(250);

/// Default ceiling of the retry delay.
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(2);

/// Default backoff multiplier.
const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Maximum number of body bytes kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// RetryPolicy describes how transient failures are retried.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Builds a policy from config, filling unset fields with defaults.
    pub fn from_config(config: Option<&RetryConfig>) -> Self {
        let Some(config) = config else {
            return Self::default();
        };

        Self {
            max_attempts: config.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1),
            initial_delay: if config.initial_delay.is_zero() {
                DEFAULT_INITIAL_DELAY
            } else {
                config.initial_delay
            },
            max_delay: if config.max_delay.is_zero() {
                DEFAULT_MAX_DELAY
            } else {
                config.max_delay
            },
            multiplier: config
                .multiplier
                .filter(|m| *m >= 1.0)
                .unwrap_or(DEFAULT_MULTIPLIER),
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt.saturating_sub(1) as i32);
        let nanos = (self.initial_delay.as_nanos() as f64 * factor).round() as u64;
        Duration::from_nanos(nanos).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

/// HTTP client used by every quote source.
/// Applies the request timeout and retries transient failures.
pub struct HttpClient {
    http: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Creates a client with the given per-request timeout and retry policy.
    pub fn new(timeout: Duration, retry: RetryPolicy) -> std::result::Result<Self, reqwest::Error> {
        let http = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, retry })
    }

    /// Creates a client from the `http` config section.
    pub fn from_config(config: &HttpConfig) -> std::result::Result<Self, reqwest::Error> {
        Self::new(config.timeout(), RetryPolicy::from_config(config.retry.as_ref()))
    }

    /// Sends a GET request and returns the response body.
    pub async fn get(&self, base_url: &str, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        let url = build_url(base_url, endpoint, params);

        let mut attempt = 1;
        loop {
            match self.get_once(&url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_after(attempt);
                    debug!(
                        url = %url,
                        attempt = attempt,
                        delay = ?delay,
                        error = %e,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = %url, "sending request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            let text = String::from_utf8_lossy(&body);
            let body: String = text.chars().take(MAX_ERROR_BODY).collect();
            warn!(url = %url, status = status.as_u16(), "ticker request failed");
            return Err(QuoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }
}

/// Joins base URL, endpoint and percent-encoded query parameters.
pub(crate) fn build_url(base_url: &str, endpoint: &str, params: &[(&str, &str)]) -> String {
    let base = base_url.trim_end_matches('/');
    if params.is_empty() {
        return format!("{}{}", base, endpoint);
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{}?{}", base, endpoint, query)
}
