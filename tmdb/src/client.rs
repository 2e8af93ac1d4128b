//! TMDB API client implementation

use crate::config::TmdbConfig;
use crate::error::TmdbError;
use crate::images::ImageUrl;
use crate::types::PagedResponse;
use marquee_feed::config::ConfigError;
use marquee_feed::{FeedPage, FeedQuery, FeedRequest, ResultSource, TransportError};
use reqwest::{Client, StatusCode};
use std::future::Future;

/// TMDB v3 client.
///
/// Serves a [`FeedQuery`] with `/search/movie` when it carries free text and
/// with `/discover/movie` otherwise.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
    images: ImageUrl,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    /// Create a new client with configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::MissingApiKey`] if `TMDB_API_KEY` is not set and
    /// [`TmdbError::Config`] for any other configuration problem
    pub fn from_env() -> Result<Self, TmdbError> {
        let config = TmdbConfig::from_env().map_err(|error| match error {
            ConfigError::EnvVarNotSet(_) => TmdbError::MissingApiKey,
            other => TmdbError::Config(other),
        })?;

        Self::new(config)
    }

    /// Create a new client with explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::Config`] if the configuration is invalid and
    /// [`TmdbError::RequestFailed`] if the HTTP client cannot be built
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TmdbError::RequestFailed(e.to_string()))?;

        Ok(Self {
            images: ImageUrl::new(config.image_url.clone()),
            client,
            config,
        })
    }

    /// Image URL builder for this client's CDN
    #[must_use]
    pub const fn images(&self) -> &ImageUrl {
        &self.images
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Fetch `page` of movies matching the language and genre filters of
    /// `query`, newest release first
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn discover(&self, query: &FeedQuery, page: u32) -> Result<PagedResponse, TmdbError> {
        let mut params = vec![
            ("sort_by", self.config.sort_by.clone()),
            ("page", page.to_string()),
            ("region", self.config.region.clone()),
        ];
        if let Some(language) = query.language_code.as_deref().filter(|l| !l.is_empty()) {
            params.push(("with_original_language", language.to_string()));
        }
        if let Some(genre) = query.tag_id {
            params.push(("with_genres", genre.to_string()));
        }

        self.get("discover/movie", &params).await
    }

    /// Search movies by title
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn search_titles(&self, text: &str) -> Result<PagedResponse, TmdbError> {
        self.get("search/movie", &[("query", text.trim().to_string())])
            .await
    }

    /// Fetch the page a feed asked for
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn fetch_page(&self, request: &FeedRequest) -> Result<FeedPage, TmdbError> {
        let response = match request.query.free_text.as_deref() {
            Some(text) if request.query.is_text_search() => self.search_titles(text).await?,
            _ => self.discover(&request.query, request.page).await?,
        };

        let page = response.into_page();
        tracing::debug!(
            page = page.page_number,
            results = page.items.len(),
            "TMDB page received"
        );
        Ok(page)
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<PagedResponse, TmdbError> {
        tracing::debug!(path, ?params, "TMDB request");

        let response = self
            .client
            .get(format!("{}/{path}", self.config.api_url))
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| TmdbError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<PagedResponse>()
                .await
                .map_err(|e| TmdbError::ResponseParseFailed(e.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(TmdbError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(TmdbError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TmdbError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }
}

impl ResultSource for TmdbClient {
    fn search(
        &self,
        request: FeedRequest,
    ) -> impl Future<Output = Result<FeedPage, TransportError>> + Send {
        async move {
            self.fetch_page(&request).await.map_err(|error| {
                tracing::warn!(error = %error, page = request.page, "TMDB request failed");
                TransportError::from(error)
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TmdbClient::new(TmdbConfig::new("test-key")).unwrap();
        assert_eq!(client.config().api_url, "https://api.themoviedb.org/3");
        assert_eq!(
            client.images().poster("/p.jpg", crate::images::PosterSize::W500),
            "https://image.tmdb.org/t/p/w500/p.jpg"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = TmdbClient::new(TmdbConfig::new(""));
        assert!(matches!(result, Err(TmdbError::Config(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = TmdbClient::new(TmdbConfig::new("secret-key")).unwrap();
        assert!(!format!("{client:?}").contains("secret-key"));
    }
}
