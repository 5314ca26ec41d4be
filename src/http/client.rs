//! Signed provider caller with a flat retry policy
//!
//! `call(endpoint, params)` returns the raw response body or nothing.
//! Transport errors, timeouts and non-2xx statuses are logged and retried
//! according to the `RetryPolicy`; once retries are exhausted the failure
//! turns into `None` so callers can treat "no data" uniformly.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{encode_query, OAuthSigner};
use crate::config::ApiSettings;
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

// ============================================================================
// Retry Policy
// ============================================================================

/// How many times, and how patiently, a failed call is repeated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = max_retries + 1)
    pub max_retries: u32,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_retry()
    }
}

impl RetryPolicy {
    /// Retry exactly once, immediately
    pub fn single_retry() -> Self {
        Self {
            max_retries: 1,
            backoff_type: BackoffType::Constant,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::from_secs(5),
        }
    }

    /// Never retry
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::single_retry()
        }
    }

    /// Bounded retries with backoff
    pub fn with_backoff(
        max_retries: u32,
        backoff_type: BackoffType,
        initial: Duration,
        max: Duration,
    ) -> Self {
        Self {
            max_retries,
            backoff_type,
            initial_backoff: initial,
            max_backoff: max,
        }
    }

    /// Total number of attempts this policy allows
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retry policy
    pub retry: RetryPolicy,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiSettings::default())
    }
}

impl From<&ApiSettings> for ApiClientConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            retry: RetryPolicy::with_backoff(
                settings.max_retries,
                settings.backoff,
                Duration::from_millis(settings.initial_backoff_ms),
                Duration::from_millis(settings.max_backoff_ms),
            ),
            rate_limit: settings
                .requests_per_second
                .map(|rps| RateLimiterConfig::new(rps, rps)),
            user_agent: format!("tweety/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiClientConfig {
    /// Config for a given base URL with default settings otherwise
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Replace the retry policy
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Client
// ============================================================================

/// Credentialed caller for the provider's REST endpoints
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    signer: OAuthSigner,
    rate_limiter: Option<RateLimiter>,
}

impl ApiClient {
    /// Create a client that signs with `signer`
    pub fn new(config: ApiClientConfig, signer: OAuthSigner) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            signer,
            rate_limiter,
        })
    }

    /// Call an endpoint, returning the raw body or `None` on failure
    pub async fn call(&self, endpoint: &str, params: &[(String, String)]) -> Option<String> {
        match self.try_call(endpoint, params).await {
            Ok(body) => Some(body),
            Err(e) => {
                info!("error connecting to Twitter API on retry: {e}");
                None
            }
        }
    }

    /// Call an endpoint with retries, returning the last error on failure
    pub async fn try_call(&self, endpoint: &str, params: &[(String, String)]) -> Result<String> {
        let url = self.endpoint_url(endpoint);
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            match self.attempt(&url, params).await {
                Ok(body) => {
                    debug!("Request succeeded: GET {url}");
                    return Ok(body);
                }
                Err(e) if e.is_retryable() && attempt < retry.max_retries => {
                    let delay = retry.delay(attempt);
                    info!(
                        "error connecting to Twitter API (retrying, attempt {}/{}): {e}",
                        attempt + 1,
                        retry.attempts()
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Full URL for an endpoint name such as `statuses/show`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        format!("{base}/{endpoint}.json")
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    async fn attempt(&self, url: &str, params: &[(String, String)]) -> Result<String> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let authorization = self.signer.authorization("GET", url, params)?;
        let full_url = if params.is_empty() {
            url.to_string()
        } else {
            format!("{url}?{}", encode_query(params))
        };

        let response = self
            .client
            .get(&full_url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(e)
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
