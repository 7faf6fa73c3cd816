//! Client configuration options.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default base URL for the Pluvo API.
pub const DEFAULT_API_URL: &str = "https://api.pluvo.co/api/";

/// Default number of items requested per page for list endpoints.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Configuration for the Pluvo client.
///
/// # Example
///
/// ```
/// use pluvo_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_page_size(50);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for API requests. Must end with a trailing slash so that
    /// relative endpoint paths join correctly.
    pub base_url: Url,
    /// Page size used by list endpoints unless overridden per query.
    pub page_size: u64,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Retry configuration
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            user_agent: format!("pluvo-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or cannot serve as a
    /// base for relative paths.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL cannot be used as a base: {}",
                base_url
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Set the default page size for list endpoints.
    ///
    /// Values below 1 are clamped to 1.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Configuration for automatic retries.
///
/// Idempotent requests (GET) are retried on transient errors with
/// exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial backoff duration
    pub initial_backoff: Duration,
    /// Maximum backoff duration
    pub max_backoff: Duration,
    /// HTTP status codes to retry on
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Create a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the initial backoff duration.
    pub fn with_initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set the maximum backoff duration.
    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Calculate the backoff duration for a given attempt.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let backoff_millis = self.initial_backoff.as_millis() as u64 * 2u64.pow(attempt);
        let max_millis = self.max_backoff.as_millis() as u64;
        Duration::from_millis(backoff_millis.min(max_millis))
    }

    /// Check if a status code should be retried.
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }
}
