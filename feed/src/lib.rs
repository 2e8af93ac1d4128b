//! # Marquee Feed
//!
//! Infinite-scroll feed over a paginated result source.
//!
//! A feed shows the results of one [`FeedQuery`] (language, category, or a
//! free-text title search), loading page 1 when the view mounts or the query
//! changes and appending the next page when the user scrolls near the end.
//!
//! ## Guarantees
//!
//! - Items are unique by id; a repeated id overwrites the earlier copy in place
//! - At most one fetch per feed is awaited at a time
//! - The page counter only advances when a page is applied
//! - A page shorter than the configured page size ends pagination
//! - A free-text search is a single page
//! - Results of fetches dispatched for a superseded query are discarded
//!
//! ## Example
//!
//! ```ignore
//! use marquee_feed::{FeedConfig, FeedEnvironment, FeedQuery, PagedFeedController};
//! use marquee_core::SystemClock;
//!
//! let env = FeedEnvironment::new(client, FeedConfig::from_env()?, SystemClock);
//! let feed = PagedFeedController::new(env, FeedQuery::filtered(Some("ta".into()), Some(28)));
//!
//! feed.mount().await?.wait().await;
//! feed.on_scrolled_near_bottom().await?.wait().await;
//!
//! for item in feed.snapshot().await.renderable_items() {
//!     println!("{}", item.title);
//! }
//! ```

pub mod action;
pub mod config;
pub mod controller;
pub mod environment;
pub mod mocks;
pub mod reducer;
pub mod source;
pub mod types;

pub use action::FeedAction;
pub use config::{ConfigError, FeedConfig};
pub use controller::{FeedStore, PagedFeedController};
pub use environment::FeedEnvironment;
pub use reducer::PagedFeedReducer;
pub use source::{ResultSource, TransportError};
pub use types::{
    FeedItem, FeedPage, FeedQuery, FeedRequest, FeedState, FetchCause, ItemId, PendingFetch,
};
