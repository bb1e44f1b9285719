pub mod cache;
pub mod client;
pub mod error;
pub mod mock;
pub mod status;

use std::time::Duration;

pub use client::ApiClient;
pub use error::ApiError;
pub use status::{check_backend_status, BackendStatus};

/// Production backend; override with `ESTATE_COPILOT_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://data-417505.uc.r.appspot.com";

/// Client construction parameters.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            cache_ttl: cache::CACHE_TTL,
            cache_capacity: cache::CACHE_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("ESTATE_COPILOT_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Outcome of a fallback-eligible operation.
///
/// Instead of intercepting thrown values, callers branch on this: the data
/// is always present and always the same shape, and `Fallback` additionally
/// names the error that forced the substitution.
#[derive(Debug)]
pub enum Sourced<T> {
    /// The backend answered.
    Remote(T),
    /// The backend was unreachable or errored; `data` comes from the
    /// sample catalog.
    Fallback { data: T, reason: ApiError },
}

impl<T> Sourced<T> {
    pub fn data(&self) -> &T {
        match self {
            Self::Remote(data) => data,
            Self::Fallback { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Self::Remote(data) => data,
            Self::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The error that triggered the substitution, if any.
    pub fn fallback_reason(&self) -> Option<&ApiError> {
        match self {
            Self::Remote(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}
