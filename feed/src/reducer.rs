//! Paged feed reducer.
//!
//! Decides when to call the result source, how to merge what comes back, and
//! when paging stops.
//!
//! # Flow
//!
//! 1. `Mounted` / `QueryChanged` reset the feed: new epoch, page 1, fetch
//! 2. `ScrolledNearBottom` asks for the next page unless a fetch is
//!    outstanding or the query is exhausted
//! 3. The fetch effect resolves to `PageLoaded` / `PageFailed` carrying the
//!    epoch it was dispatched under
//! 4. Results from an older epoch are discarded, so a slow response for a
//!    previous query can never overwrite a freshly reset feed
//!
//! # Example
//!
//! ```ignore
//! let env = FeedEnvironment::new(source, FeedConfig::default(), SystemClock);
//! let store = Store::new(FeedState::new(query), PagedFeedReducer::new(), env);
//!
//! store.send(FeedAction::Mounted).await?;
//! store.send(FeedAction::ScrolledNearBottom).await?;
//! ```

use crate::action::FeedAction;
use crate::environment::FeedEnvironment;
use crate::source::{ResultSource, TransportError};
use crate::types::{
    FeedPage, FeedQuery, FeedRequest, FeedState, FetchCause, PendingFetch, dedup_items,
    merge_items,
};
use marquee_core::effect::Effect;
use marquee_core::environment::Clock;
use marquee_core::reducer::Reducer;
use marquee_core::{SmallVec, async_effect, delay, smallvec};

/// Paged feed reducer.
#[derive(Debug, Clone)]
pub struct PagedFeedReducer<S, C> {
    _phantom: std::marker::PhantomData<(S, C)>,
}

impl<S, C> PagedFeedReducer<S, C> {
    /// Create a new feed reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, C> Default for PagedFeedReducer<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> PagedFeedReducer<S, C>
where
    S: ResultSource + Clone + 'static,
    C: Clock + Clone,
{
    /// Restart the feed for `query` and fetch its first page
    fn reset(
        state: &mut FeedState,
        query: FeedQuery,
        env: &FeedEnvironment<S, C>,
    ) -> Effect<FeedAction> {
        // A query set from outside the search box replaces what it shows
        // and supersedes any typing still being debounced.
        let text = query.free_text.as_deref().unwrap_or_default();
        if state.search_text.trim() != text.trim() {
            state.search_text = text.to_string();
            state.search_generation += 1;
        }

        state.epoch += 1;
        state.active_query = query;
        state.page_number = 1;
        state.has_more = true;
        state.awaiting_reset = true;
        state.last_error = None;

        tracing::debug!(
            epoch = state.epoch,
            query = ?state.active_query,
            "Feed reset"
        );

        Self::fetch(state, FetchCause::Reset, 1, env)
    }

    /// Dispatch a fetch for `page` under the current epoch
    fn fetch(
        state: &mut FeedState,
        cause: FetchCause,
        page: u32,
        env: &FeedEnvironment<S, C>,
    ) -> Effect<FeedAction> {
        let epoch = state.epoch;
        state.is_loading = true;
        state.pending = Some(PendingFetch { epoch, page, cause });

        metrics::counter!("feed.fetch.dispatched", "cause" => cause.as_str()).increment(1);
        tracing::debug!(epoch, page, cause = cause.as_str(), "Dispatching fetch");

        let source = env.source.clone();
        let request = FeedRequest::new(state.active_query.clone(), page);

        async_effect! {
            match source.search(request).await {
                Ok(page) => Some(FeedAction::PageLoaded { epoch, cause, page }),
                Err(error) => Some(FeedAction::PageFailed {
                    epoch,
                    cause,
                    page_number: page,
                    error,
                }),
            }
        }
    }

    /// Take the pending fetch if a result for `epoch` is still wanted
    fn accept(state: &mut FeedState, epoch: u64) -> Option<PendingFetch> {
        if epoch != state.epoch {
            metrics::counter!("feed.fetch.discarded_stale").increment(1);
            tracing::debug!(
                epoch,
                current_epoch = state.epoch,
                "Discarding result of superseded fetch"
            );
            return None;
        }

        let pending = state.pending.take().filter(|pending| pending.epoch == epoch);
        if pending.is_none() {
            tracing::warn!(epoch, "Fetch result arrived with no fetch pending");
        }
        pending
    }

    fn apply_page(
        state: &mut FeedState,
        pending: PendingFetch,
        page: FeedPage,
        env: &FeedEnvironment<S, C>,
    ) {
        let received = page.items.len();

        match pending.cause {
            FetchCause::Reset => {
                state.items = dedup_items(page.items);
                state.awaiting_reset = false;
            },
            FetchCause::Append => merge_items(&mut state.items, page.items),
        }

        state.is_loading = false;
        state.page_number = pending.page;
        // Text results are a single page regardless of length.
        state.has_more =
            !state.active_query.is_text_search() && received >= env.config.page_size;
        state.last_error = None;
        state.loaded_at = Some(env.clock.now());

        tracing::debug!(
            page = pending.page,
            received,
            total = state.items.len(),
            has_more = state.has_more,
            "Page applied"
        );
    }

    fn record_failure(state: &mut FeedState, pending: PendingFetch, error: TransportError) {
        metrics::counter!("feed.fetch.failed", "cause" => pending.cause.as_str()).increment(1);
        tracing::warn!(
            page = pending.page,
            cause = pending.cause.as_str(),
            error = %error,
            "Feed fetch failed"
        );

        state.is_loading = false;
        state.last_error = Some(error);
    }

    /// Query the search box text resolves to, given the current filters
    fn search_query(state: &FeedState, text: &str) -> FeedQuery {
        let text = text.trim();
        if text.is_empty() {
            state.active_query.without_text()
        } else {
            FeedQuery {
                free_text: Some(text.to_string()),
                ..state.active_query.clone()
            }
        }
    }

    fn change_query(
        state: &mut FeedState,
        query: FeedQuery,
        env: &FeedEnvironment<S, C>,
    ) -> SmallVec<[Effect<FeedAction>; 4]> {
        if query == state.active_query {
            tracing::trace!("Query unchanged, ignoring");
            return smallvec![Effect::None];
        }
        smallvec![Self::reset(state, query, env)]
    }
}

impl<S, C> Reducer for PagedFeedReducer<S, C>
where
    S: ResultSource + Clone + 'static,
    C: Clock + Clone,
{
    type State = FeedState;
    type Action = FeedAction;
    type Environment = FeedEnvironment<S, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FeedAction::Mounted => {
                let query = state.active_query.clone();
                smallvec![Self::reset(state, query, env)]
            },

            FeedAction::QueryChanged { query } => Self::change_query(state, query, env),

            FeedAction::ScrolledNearBottom => {
                if state.is_loading || !state.has_more {
                    tracing::trace!(
                        is_loading = state.is_loading,
                        has_more = state.has_more,
                        "Scroll ignored"
                    );
                    return smallvec![Effect::None];
                }

                // The last reset failed: what is on screen belongs to an
                // older query, so retry page 1 instead of appending to it.
                if state.awaiting_reset {
                    return smallvec![Self::fetch(state, FetchCause::Reset, 1, env)];
                }

                let next = state.page_number + 1;
                smallvec![Self::fetch(state, FetchCause::Append, next, env)]
            },

            FeedAction::SearchTextChanged { text } => {
                state.search_text.clone_from(&text);
                state.search_generation += 1;
                let generation = state.search_generation;

                if env.config.search_debounce.is_zero() {
                    let query = Self::search_query(state, &text);
                    return Self::change_query(state, query, env);
                }

                smallvec![delay! {
                    duration: env.config.search_debounce,
                    action: FeedAction::SearchTextSettled { text, generation }
                }]
            },

            FeedAction::SearchTextSettled { text, generation } => {
                if generation != state.search_generation {
                    tracing::trace!(generation, "Search text superseded while debouncing");
                    return smallvec![Effect::None];
                }
                let query = Self::search_query(state, &text);
                Self::change_query(state, query, env)
            },

            FeedAction::PageLoaded { epoch, page, .. } => {
                if let Some(pending) = Self::accept(state, epoch) {
                    Self::apply_page(state, pending, page, env);
                }
                smallvec![Effect::None]
            },

            FeedAction::PageFailed { epoch, error, .. } => {
                if let Some(pending) = Self::accept(state, epoch) {
                    Self::record_failure(state, pending, error);
                }
                smallvec![Effect::None]
            },
        }
    }
}
