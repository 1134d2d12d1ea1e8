//! Client configuration.

use sync_core::{ApiBase, ConfigError, DEFAULT_PAGE_SIZE};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Origin plus prefix every endpoint hangs off.
    pub base_url: String,
    /// Recipes per browse page.
    pub page_size: u32,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl SyncConfig {
    /// Configuration for the API at `base_url`, with defaults elsewhere.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Set the browse page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Validate and normalize the base URL.
    pub fn api_base(&self) -> Result<ApiBase, ConfigError> {
        ApiBase::parse(&self.base_url)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("recipe-sync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
