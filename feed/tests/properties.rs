//! Property tests for feed accumulation and paging
//!
//! Feeds arbitrary page sequences through the reducer and checks the
//! invariants every rendered feed relies on.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use marquee_core::reducer::Reducer;
use marquee_feed::mocks::MockResultSource;
use marquee_feed::types::merge_items;
use marquee_feed::{
    FeedAction, FeedConfig, FeedEnvironment, FeedItem, FeedPage, FeedQuery, FeedState,
    PagedFeedReducer,
};
use marquee_testing::{FixedClock, test_clock};
use proptest::prelude::*;
use std::collections::HashSet;

type Env = FeedEnvironment<MockResultSource, FixedClock>;

fn env() -> Env {
    FeedEnvironment::new(MockResultSource::new(), FeedConfig::default(), test_clock())
}

fn page_of(ids: &[u64]) -> Vec<FeedItem> {
    ids.iter()
        .map(|&id| FeedItem::new(id, format!("Movie {id}")))
        .collect()
}

fn ids(items: &[FeedItem]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}

/// Pages drawn from a small id space so that repeats are common
fn pages() -> impl Strategy<Value = Vec<Vec<u64>>> {
    prop::collection::vec(prop::collection::vec(0u64..40, 0..16), 1..8)
}

/// Deliver `page` for the fetch the feed is currently waiting on
fn deliver(
    reducer: &PagedFeedReducer<MockResultSource, FixedClock>,
    state: &mut FeedState,
    page: &[u64],
) {
    let pending = state.pending.expect("a fetch should be pending");
    let _ = reducer.reduce(
        state,
        FeedAction::PageLoaded {
            epoch: pending.epoch,
            cause: pending.cause,
            page: FeedPage {
                items: page_of(page),
                page_number: pending.page,
            },
        },
        &env(),
    );
}

proptest! {
    #[test]
    fn merged_ids_are_unique(pages in pages()) {
        let mut items = Vec::new();
        for page in &pages {
            merge_items(&mut items, page_of(page));
        }

        let unique: HashSet<_> = items.iter().map(|item| item.id).collect();
        prop_assert_eq!(unique.len(), items.len());

        let seen: HashSet<_> = pages.iter().flatten().copied().collect();
        prop_assert_eq!(unique, seen);
    }

    #[test]
    fn merging_preserves_existing_order(
        first in prop::collection::vec(0u64..40, 0..16),
        rest in pages(),
    ) {
        let mut items = Vec::new();
        merge_items(&mut items, page_of(&first));
        let before = ids(&items);

        for page in &rest {
            merge_items(&mut items, page_of(page));
        }

        let after = ids(&items);
        prop_assert_eq!(&after[..before.len()], &before[..]);
    }

    #[test]
    fn feed_stops_exactly_at_first_short_page(pages in pages()) {
        let reducer = PagedFeedReducer::new();
        let env = env();
        let mut state = FeedState::new(FeedQuery::default().with_tag(28));

        let _ = reducer.reduce(&mut state, FeedAction::Mounted, &env);

        let mut applied = 0u32;
        for page in &pages {
            if state.pending.is_none() {
                break;
            }
            deliver(&reducer, &mut state, page);
            applied += 1;

            prop_assert_eq!(state.page_number, applied);
            prop_assert_eq!(state.has_more, page.len() >= env.config.page_size);

            let _ = reducer.reduce(&mut state, FeedAction::ScrolledNearBottom, &env);
            prop_assert_eq!(state.pending.is_some(), state.has_more);
        }

        let unique: HashSet<_> = state.items.iter().map(|item| item.id).collect();
        prop_assert_eq!(unique.len(), state.items.len());
    }

    #[test]
    fn stale_pages_never_change_items(
        pages in pages(),
        stale in prop::collection::vec(100u64..140, 1..16),
    ) {
        let reducer = PagedFeedReducer::new();
        let env = env();
        let mut state = FeedState::new(FeedQuery::default());

        let first = FeedQuery::default().with_tag(1);
        let second = FeedQuery::default().with_tag(2);

        let _ = reducer.reduce(&mut state, FeedAction::QueryChanged { query: first }, &env);
        let superseded = state.pending.expect("reset fetch pending");
        let _ = reducer.reduce(&mut state, FeedAction::QueryChanged { query: second }, &env);
        deliver(&reducer, &mut state, &pages[0]);

        let before = state.clone();
        let _ = reducer.reduce(
            &mut state,
            FeedAction::PageLoaded {
                epoch: superseded.epoch,
                cause: superseded.cause,
                page: FeedPage { items: page_of(&stale), page_number: superseded.page },
            },
            &env,
        );

        prop_assert_eq!(state, before);
    }
}
