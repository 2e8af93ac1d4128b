//! TMDB client configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TMDB_API_KEY` | required |
//! | `TMDB_API_URL` | `https://api.themoviedb.org/3` |
//! | `TMDB_IMAGE_URL` | `https://image.tmdb.org/t/p` |
//! | `TMDB_REGION` | `IN` |
//! | `TMDB_SORT_BY` | `release_date.desc` |
//! | `TMDB_TIMEOUT_SECS` | `30` |

use marquee_feed::config::{ConfigError, parse_var};
use std::time::Duration;

/// Default TMDB v3 API base URL
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Default image CDN base URL
pub const DEFAULT_IMAGE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key, sent as the `api_key` query parameter
    pub api_key: String,
    /// API base URL (no trailing slash)
    pub api_url: String,
    /// Image CDN base URL (no trailing slash)
    pub image_url: String,
    /// Release region for discover queries
    pub region: String,
    /// Discover sort order
    pub sort_by: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("image_url", &self.image_url)
            .field("region", &self.region)
            .field("sort_by", &self.sort_by)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TmdbConfig {
    /// Configuration with defaults for everything but the key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            region: "IN".to_string(),
            sort_by: "release_date.desc".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EnvVarNotSet`] if `TMDB_API_KEY` is missing
    /// - [`ConfigError::InvalidValue`] if `TMDB_TIMEOUT_SECS` is not a number
    /// - [`ConfigError::ValidationError`] if the result fails [`TmdbConfig::validate`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = parse_var::<String>("TMDB_API_KEY")?
            .ok_or_else(|| ConfigError::EnvVarNotSet("TMDB_API_KEY".to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(api_url) = parse_var::<String>("TMDB_API_URL")? {
            config.api_url = api_url;
        }
        if let Some(image_url) = parse_var::<String>("TMDB_IMAGE_URL")? {
            config.image_url = image_url;
        }
        if let Some(region) = parse_var("TMDB_REGION")? {
            config.region = region;
        }
        if let Some(sort_by) = parse_var("TMDB_SORT_BY")? {
            config.sort_by = sort_by;
        }
        if let Some(secs) = parse_var("TMDB_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config.normalized())
    }

    /// Point the client at another API base URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.normalized()
    }

    /// Set the discover region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if the key is blank, a URL is not http(s), or the
    /// timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api_key must not be empty".to_string(),
            ));
        }

        for (name, url) in [("api_url", &self.api_url), ("image_url", &self.image_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be an http(s) URL, got {url}"
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    fn normalized(mut self) -> Self {
        let api_len = self.api_url.trim_end_matches('/').len();
        self.api_url.truncate(api_len);
        let image_len = self.image_url.trim_end_matches('/').len();
        self.image_url.truncate(image_len);
        self
    }
}
