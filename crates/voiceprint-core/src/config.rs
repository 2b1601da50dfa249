//! Client configuration.

use std::time::Duration;

use crate::Result;
use crate::auth::ApiKey;
use crate::types::{BaseUrl, DEFAULT_BASE_URL};

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which client implementation the factory builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Thread-per-call client over blocking I/O.
    #[default]
    Blocking,
    /// Future-based client for async runtimes.
    Async,
}

/// What `logout` does when the server does not answer 200.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogoutPolicy {
    /// Fail with [`AuthError::LogoutFailed`](crate::error::AuthError::LogoutFailed).
    #[default]
    Strict,
    /// Return `None` and keep the tokens.
    Lenient,
}

/// What a logical call does with a non-200 response it cannot recover from.
///
/// This never affects token-expiry or banned-account errors, which always
/// propagate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnHttpError {
    /// Fail with an [`HttpError`](crate::error::HttpError).
    #[default]
    Raise,
    /// Return `None`.
    ReturnNone,
}

/// Configuration shared by both client implementations.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use voiceprint_core::{ClientConfig, ExecutionMode};
///
/// let config = ClientConfig::new("vp_key")
///     .auto_refresh(true)
///     .timeout(Duration::from_secs(5))
///     .mode(ExecutionMode::Async);
/// assert!(config.auto_refresh_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    auto_refresh: bool,
    timeout: Duration,
    logout_policy: LogoutPolicy,
    mode: ExecutionMode,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            auto_refresh: false,
            timeout: DEFAULT_TIMEOUT,
            logout_policy: LogoutPolicy::default(),
            mode: ExecutionMode::default(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Recover from 403 responses by refreshing or logging in again.
    pub fn auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn logout_policy(mut self, policy: LogoutPolicy) -> Self {
        self.logout_policy = policy;
        self
    }

    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Validate the configuration.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        Ok(ResolvedConfig {
            api_key: ApiKey::new(self.api_key.clone())?,
            base_url: BaseUrl::new(&self.base_url)?,
            auto_refresh: self.auto_refresh,
            timeout: self.timeout,
            logout_policy: self.logout_policy,
        })
    }
}

/// A validated configuration, ready for a client.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: ApiKey,
    pub base_url: BaseUrl,
    pub auto_refresh: bool,
    pub timeout: Duration,
    pub logout_policy: LogoutPolicy,
}
