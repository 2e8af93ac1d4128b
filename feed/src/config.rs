//! Feed configuration.
//!
//! Loaded from environment variables with defaults matching the discovery
//! views: twelve results per page and a 300ms search debounce.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `FEED_PAGE_SIZE` | `12` |
//! | `FEED_SEARCH_DEBOUNCE_MS` | `300` |

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Nominal page size of the discovery feeds
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Default quiet period before a typed search is issued
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Environment variable holds a value that does not parse
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        /// Variable name
        var: String,
        /// Offending value
        value: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Paging behaviour of a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// A page shorter than this ends pagination for the active query
    pub page_size: usize,
    /// Quiet period before search-box input becomes a query
    pub search_debounce: Duration,
}

impl FeedConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable values and
    /// [`ConfigError::ValidationError`] if the result fails [`FeedConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            page_size: parse_var("FEED_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            search_debounce: parse_var("FEED_SEARCH_DEBOUNCE_MS")?
                .map_or(defaults.search_debounce, Duration::from_millis),
        };

        config.validate()?;
        Ok(config)
    }

    /// Set the page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the search debounce
    #[must_use]
    pub const fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if `page_size` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "page_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// Reads an optional environment variable and parses it
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if the variable is set but does not parse.
pub fn parse_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
