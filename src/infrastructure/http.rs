use crate::domain::error::DomainError;
use std::time::Duration;

/// Desktop Chrome. The chart API throttles obvious library clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

pub const APP_USER_AGENT: &str = concat!("marketbrief/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    /// Applied to every outbound call, connect through body.
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// The one client shared by every adapter. Adapters that need another user
/// agent override the header per request.
pub fn client(user_agent: &str, settings: &HttpSettings) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(settings.timeout)
        .build()
        .map_err(|e| DomainError::Config(format!("cannot build HTTP client: {e}")))
}
