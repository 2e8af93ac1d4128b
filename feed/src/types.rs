//! Domain types for the paged feed.

use crate::source::TransportError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of a feed item, unique per result source
pub type ItemId = u64;

/// A single result record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Unique identifier (per source)
    pub id: ItemId,
    /// Display title
    pub title: String,
    /// Opaque poster image reference, if the source has one
    pub poster_ref: Option<String>,
    /// Category references, in source order
    pub tag_ids: Vec<u32>,
    /// Original language (ISO-639-1)
    pub language_code: String,
}

impl FeedItem {
    /// Creates an item with no poster, no tags and an empty language code
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_ref: None,
            tag_ids: Vec::new(),
            language_code: String::new(),
        }
    }

    /// Sets the poster reference
    #[must_use]
    pub fn with_poster(mut self, poster_ref: impl Into<String>) -> Self {
        self.poster_ref = Some(poster_ref.into());
        self
    }

    /// Sets the category references
    #[must_use]
    pub fn with_tags(mut self, tag_ids: impl Into<Vec<u32>>) -> Self {
        self.tag_ids = tag_ids.into();
        self
    }

    /// Sets the language code
    #[must_use]
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }
}

/// Filter applied to a feed.
///
/// Two queries are equivalent iff every field matches, absence included.
/// An equivalence change restarts the feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Original-language filter
    pub language_code: Option<String>,
    /// Category filter
    pub tag_id: Option<u32>,
    /// Free-text title search
    pub free_text: Option<String>,
}

impl FeedQuery {
    /// Query filtered by language and category
    #[must_use]
    pub fn filtered(language_code: Option<String>, tag_id: Option<u32>) -> Self {
        Self {
            language_code,
            tag_id,
            free_text: None,
        }
    }

    /// Query for a free-text title search
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            free_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Same query with a different language filter
    #[must_use]
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    /// Same query with a different category filter
    #[must_use]
    pub const fn with_tag(mut self, tag_id: u32) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    /// Whether this query is served as a single-page text search
    #[must_use]
    pub fn is_text_search(&self) -> bool {
        self.free_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// The filter part of this query, with any free text removed
    #[must_use]
    pub fn without_text(&self) -> Self {
        Self {
            free_text: None,
            ..self.clone()
        }
    }
}

/// One page handed back by a result source
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    /// Items in source order
    pub items: Vec<FeedItem>,
    /// 1-based page number this page answers
    pub page_number: u32,
}

/// Arguments of one `ResultSource::search` call
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedRequest {
    /// Active query at dispatch time
    pub query: FeedQuery,
    /// 1-based page to fetch
    pub page: u32,
}

impl FeedRequest {
    /// Creates a request for `page` of `query`
    #[must_use]
    pub const fn new(query: FeedQuery, page: u32) -> Self {
        Self { query, page }
    }
}

/// Why a fetch was dispatched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchCause {
    /// Query changed (or the feed mounted): the result replaces the feed
    Reset,
    /// Scroll pagination: the result extends the feed
    Append,
}

impl FetchCause {
    /// Metric / log label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Append => "append",
        }
    }
}

/// The fetch currently awaited by the feed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFetch {
    /// Epoch captured at dispatch
    pub epoch: u64,
    /// Page requested
    pub page: u32,
    /// Reset or append
    pub cause: FetchCause,
}

/// State of one feed view.
///
/// Owned by the feed reducer; renderers read snapshots of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedState {
    /// Accumulated items, insertion order, unique by id
    pub items: Vec<FeedItem>,
    /// Last page applied for the active query (starts at 1)
    pub page_number: u32,
    /// Whether scrolling may fetch another page
    pub has_more: bool,
    /// Whether a fetch for the current epoch is outstanding
    pub is_loading: bool,
    /// Query the feed currently shows (or is loading)
    pub active_query: FeedQuery,
    /// Request generation; bumped on every reset
    pub epoch: u64,
    /// Fetch the feed is waiting on
    pub pending: Option<PendingFetch>,
    /// Set while the items on screen belong to an older query whose reset
    /// fetch has not succeeded yet
    pub awaiting_reset: bool,
    /// Failure of the most recent fetch, cleared by the next success or reset
    pub last_error: Option<TransportError>,
    /// When the last page was applied
    pub loaded_at: Option<DateTime<Utc>>,
    /// Search box contents as typed, settled or not
    pub search_text: String,
    /// Debounce generation of `search_text`
    pub search_generation: u64,
}

impl FeedState {
    /// Fresh state for a view that mounts with `query`
    #[must_use]
    pub fn new(query: FeedQuery) -> Self {
        Self {
            items: Vec::new(),
            page_number: 1,
            has_more: true,
            is_loading: false,
            search_text: query.free_text.clone().unwrap_or_default(),
            active_query: query,
            epoch: 0,
            pending: None,
            awaiting_reset: false,
            last_error: None,
            loaded_at: None,
            search_generation: 0,
        }
    }

    /// Items that can be drawn as poster cards.
    ///
    /// Items without a poster still count towards paging.
    pub fn renderable_items(&self) -> impl Iterator<Item = &FeedItem> {
        self.items.iter().filter(|item| item.poster_ref.is_some())
    }

    /// Whether the feed has reached the end for the active query
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        !self.has_more && !self.is_loading
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(FeedQuery::default())
    }
}

/// Merges `incoming` into `items`, keeping ids unique.
///
/// A new id is appended. An id already present keeps its position and takes
/// the fields of the incoming item, so the last occurrence wins.
pub fn merge_items(items: &mut Vec<FeedItem>, incoming: Vec<FeedItem>) {
    let mut index: HashMap<ItemId, usize> = items
        .iter()
        .enumerate()
        .map(|(position, item)| (item.id, position))
        .collect();

    for item in incoming {
        if let Some(&position) = index.get(&item.id) {
            items[position] = item;
        } else {
            index.insert(item.id, items.len());
            items.push(item);
        }
    }
}

/// Removes duplicate ids from a single page (same rules as [`merge_items`])
#[must_use]
pub fn dedup_items(page: Vec<FeedItem>) -> Vec<FeedItem> {
    let mut items = Vec::with_capacity(page.len());
    merge_items(&mut items, page);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[FeedItem]) -> Vec<ItemId> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_query_equivalence_includes_absence() {
        let query = FeedQuery::default().with_tag(28);
        assert_eq!(query, FeedQuery::filtered(None, Some(28)));
        assert_ne!(query, FeedQuery::default().with_tag(28).with_language("hi"));
        assert_ne!(FeedQuery::default(), FeedQuery::text(""));
    }

    #[test]
    fn test_blank_text_is_not_a_search() {
        assert!(FeedQuery::text("dune").is_text_search());
        assert!(!FeedQuery::text("   ").is_text_search());
        assert!(!FeedQuery::default().is_text_search());
    }

    #[test]
    fn test_without_text_keeps_filters() {
        let query = FeedQuery::text("dune").with_language("en").with_tag(878);
        assert_eq!(
            query.without_text(),
            FeedQuery::filtered(Some("en".to_string()), Some(878))
        );
    }

    #[test]
    fn test_merge_appends_new_ids() {
        let mut items = vec![FeedItem::new(1, "a"), FeedItem::new(2, "b")];
        merge_items(&mut items, vec![FeedItem::new(3, "c")]);
        assert_eq!(ids(&items), vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_overwrites_in_place() {
        let mut items = vec![FeedItem::new(1, "a"), FeedItem::new(2, "b")];
        merge_items(
            &mut items,
            vec![FeedItem::new(4, "d"), FeedItem::new(1, "a (restored)")],
        );

        assert_eq!(ids(&items), vec![1, 2, 4]);
        assert_eq!(items[0].title, "a (restored)");
    }

    #[test]
    fn test_dedup_within_page_last_write_wins() {
        let page = vec![
            FeedItem::new(7, "first"),
            FeedItem::new(8, "other"),
            FeedItem::new(7, "second"),
        ];

        let items = dedup_items(page);
        assert_eq!(ids(&items), vec![7, 8]);
        assert_eq!(items[0].title, "second");
    }

    #[test]
    fn test_renderable_items_skip_missing_posters() {
        let mut state = FeedState::default();
        state.items = vec![
            FeedItem::new(1, "with").with_poster("/a.jpg"),
            FeedItem::new(2, "without"),
        ];

        let visible: Vec<_> = state.renderable_items().map(|item| item.id).collect();
        assert_eq!(visible, vec![1]);
    }

    #[test]
    fn test_new_state_defaults() {
        let state = FeedState::new(FeedQuery::text("jawan"));
        assert_eq!(state.page_number, 1);
        assert!(state.has_more);
        assert!(!state.is_loading);
        assert_eq!(state.search_text, "jawan");
        assert_eq!(state.epoch, 0);
    }
}
