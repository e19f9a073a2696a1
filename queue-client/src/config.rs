//! Client configuration

use std::time::Duration;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Default snapshot poll interval (seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

const MIN_POLL_INTERVAL_SECS: u64 = 1;
const MAX_POLL_INTERVAL_SECS: u64 = 300;

/// Client configuration for connecting to the queue backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | QUEUE_BASE_URL | http://localhost:8081 | backend base URL |
/// | QUEUE_TOKEN | - | bearer token |
/// | QUEUE_TIMEOUT_SECS | 30 | request timeout |
/// | QUEUE_POLL_INTERVAL_SECS | 10 | snapshot poll interval, clamped to 1..=300 |
/// | LOG_LEVEL | info | logger level |
/// | LOG_DIR | - | daily rolling log files when set |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8081")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Snapshot poll interval in seconds
    pub poll_interval: u64,

    pub log_level: String,

    /// Log directory; stdout only when `None`
    pub log_dir: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            poll_interval: DEFAULT_POLL_INTERVAL_SECS,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            base_url: lookup("QUEUE_BASE_URL").unwrap_or(defaults.base_url),
            token: lookup("QUEUE_TOKEN").filter(|t| !t.is_empty()),
            timeout: parse_u64("QUEUE_TIMEOUT_SECS").unwrap_or(defaults.timeout),
            poll_interval: parse_u64("QUEUE_POLL_INTERVAL_SECS")
                .unwrap_or(defaults.poll_interval)
                .clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the poll interval, clamped to the accepted range
    pub fn with_poll_interval(mut self, seconds: u64) -> Self {
        self.poll_interval = seconds.clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS);
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<String>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::QueueHttpClient> {
        crate::QueueHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
