//! Tunables for the inbox service and its fetch cache.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration for inbox behaviour.
///
/// Missing fields fall back to [`InboxConfig::default`] when deserialising.
/// A complete document looks like:
///
/// ```json
/// {
///   "max_content_chars": 5000,
///   "cache_ttl_secs": 30,
///   "cache_capacity": 256
/// }
/// ```
///
/// # Examples
///
/// ```
/// use rental_inbox::inbox::config::InboxConfig;
/// use std::time::Duration;
///
/// let config = InboxConfig::default();
/// assert_eq!(config.max_content_chars, 5_000);
///
/// let parsed = InboxConfig::from_json(r#"{ "cache_ttl_secs": 90 }"#).expect("valid config");
/// assert_eq!(parsed.cache_ttl(), Duration::from_secs(90));
/// assert_eq!(parsed.cache_capacity, config.cache_capacity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxConfig {
    /// Maximum number of characters in an outgoing message.
    pub max_content_chars: usize,
    /// How long a cached message fetch stays fresh, in whole seconds.
    pub cache_ttl_secs: u64,
    /// Maximum number of users whose messages are cached at once.
    pub cache_capacity: usize,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 5_000,
            cache_ttl_secs: 30,
            cache_capacity: 256,
        }
    }
}

impl InboxConfig {
    /// Creates a configuration with tighter limits and a short cache window.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_content_chars: 1_000,
            cache_ttl_secs: 5,
            cache_capacity: 64,
        }
    }

    /// Returns the cache freshness window.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`InboxConfigError::Parse`] for malformed JSON and the
    /// validation errors of [`InboxConfig::validate`] otherwise.
    pub fn from_json(document: &str) -> Result<Self, InboxConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns [`InboxConfigError::ZeroContentLimit`] or
    /// [`InboxConfigError::ZeroCacheCapacity`] when a limit is zero.
    pub const fn validate(&self) -> Result<(), InboxConfigError> {
        if self.max_content_chars == 0 {
            return Err(InboxConfigError::ZeroContentLimit);
        }
        if self.cache_capacity == 0 {
            return Err(InboxConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }
}

/// Errors returned while loading an [`InboxConfig`].
#[derive(Debug, Error)]
pub enum InboxConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid inbox configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// `max_content_chars` is zero.
    #[error("max_content_chars must be greater than zero")]
    ZeroContentLimit,

    /// `cache_capacity` is zero.
    #[error("cache_capacity must be greater than zero")]
    ZeroCacheCapacity,
}
