//! # Marquee TMDB
//!
//! [`ResultSource`](marquee_feed::ResultSource) backed by The Movie Database
//! v3 API, plus the image URL and display-name helpers a movie feed needs to
//! render its cards.
//!
//! ## Example
//!
//! ```no_run
//! use marquee_tmdb::TmdbClient;
//! use marquee_feed::FeedQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from TMDB_API_KEY environment variable
//!     let client = TmdbClient::from_env()?;
//!
//!     let query = FeedQuery::filtered(Some("ml".to_string()), Some(18));
//!     let response = client.discover(&query, 1).await?;
//!
//!     for movie in response.results {
//!         println!("{}", movie.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod images;
pub mod types;

pub use catalog::{genre_name, genre_names, language_name};
pub use client::TmdbClient;
pub use config::TmdbConfig;
pub use error::TmdbError;
pub use images::{ImageUrl, PosterSize};
pub use types::{MovieSummary, PagedResponse};
