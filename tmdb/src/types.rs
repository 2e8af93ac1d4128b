//! TMDB response types

use marquee_feed::{FeedItem, FeedPage};
use serde::{Deserialize, Serialize};

/// One movie in a discover or search result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie id
    pub id: u64,
    /// Localized title
    pub title: String,
    /// Poster path relative to the image CDN (e.g. `/abc.jpg`)
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop path relative to the image CDN
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Genre ids
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// ISO-639-1 original language
    #[serde(default)]
    pub original_language: String,
    /// Release date as `YYYY-MM-DD`, empty when unknown
    #[serde(default)]
    pub release_date: Option<String>,
    /// Synopsis
    #[serde(default)]
    pub overview: Option<String>,
}

impl From<MovieSummary> for FeedItem {
    fn from(movie: MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            poster_ref: movie.poster_path.filter(|path| !path.is_empty()),
            tag_ids: movie.genre_ids,
            language_code: movie.original_language,
        }
    }
}

/// Paged result envelope shared by `/discover/movie` and `/search/movie`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse {
    /// 1-based page number
    pub page: u32,
    /// Results on this page
    pub results: Vec<MovieSummary>,
    /// Total pages available
    #[serde(default)]
    pub total_pages: u32,
    /// Total results available
    #[serde(default)]
    pub total_results: u64,
}

impl PagedResponse {
    /// Convert into a feed page
    #[must_use]
    pub fn into_page(self) -> FeedPage {
        FeedPage {
            page_number: self.page,
            items: self.results.into_iter().map(FeedItem::from).collect(),
        }
    }
}
