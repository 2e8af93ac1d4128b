//! Inputs to the feed reducer.

use crate::source::TransportError;
use crate::types::{FeedPage, FeedQuery, FetchCause};
use serde::{Deserialize, Serialize};

/// Everything that can happen to a feed.
///
/// The first group comes from the presentation layer; the second group is
/// produced by the feed's own effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedAction {
    // ─── Presentation inputs ──────────────────────────────────────────────
    /// The view mounted: load page 1 of the active query
    Mounted,

    /// The externally owned filter changed
    QueryChanged {
        /// New filter value
        query: FeedQuery,
    },

    /// The viewport came close to the end of the feed
    ScrolledNearBottom,

    /// The search box changed; applied after the debounce settles
    SearchTextChanged {
        /// Search box contents
        text: String,
    },

    // ─── Effect results ───────────────────────────────────────────────────
    /// The search box has been quiet for the debounce interval
    SearchTextSettled {
        /// Text at the time the debounce was scheduled
        text: String,
        /// Debounce generation it belongs to
        generation: u64,
    },

    /// A fetch succeeded
    PageLoaded {
        /// Epoch captured when the fetch was dispatched
        epoch: u64,
        /// Why the fetch was dispatched
        cause: FetchCause,
        /// The returned page
        page: FeedPage,
    },

    /// A fetch failed
    PageFailed {
        /// Epoch captured when the fetch was dispatched
        epoch: u64,
        /// Why the fetch was dispatched
        cause: FetchCause,
        /// Page that was requested
        page_number: u32,
        /// Transport failure
        error: TransportError,
    },
}

impl FeedAction {
    /// Whether this action finishes a fetch (successfully or not)
    #[must_use]
    pub const fn is_fetch_result(&self) -> bool {
        matches!(self, Self::PageLoaded { .. } | Self::PageFailed { .. })
    }
}
