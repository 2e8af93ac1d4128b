//! Presentation-facing facade over the feed store.
//!
//! A view owns one [`PagedFeedController`]. It forwards lifecycle, filter,
//! scroll and search-box events, and reads [`FeedState`] snapshots to render.
//! Fetches run on the store's effect tasks; their results are reduced in
//! the store, so the view never mutates feed state itself.

use crate::action::FeedAction;
use crate::environment::FeedEnvironment;
use crate::reducer::PagedFeedReducer;
use crate::source::ResultSource;
use crate::types::{FeedQuery, FeedState};
use marquee_core::environment::Clock;
use marquee_runtime::{EffectHandle, Store, StoreConfig, StoreError};
use std::time::Duration;
use tokio::sync::broadcast;

/// Store type driving a feed
pub type FeedStore<S, C> =
    Store<FeedState, FeedAction, FeedEnvironment<S, C>, PagedFeedReducer<S, C>>;

/// Controller for one infinite-scroll feed view.
///
/// Cheap to clone; clones drive the same feed.
///
/// # Example
///
/// ```ignore
/// let controller = PagedFeedController::new(env, FeedQuery::filtered(Some("hi".into()), Some(28)));
///
/// controller.mount().await?.wait().await;
/// controller.on_scrolled_near_bottom().await?;
///
/// let titles = controller.state(|s| s.items.len()).await;
/// ```
#[derive(Clone)]
pub struct PagedFeedController<S, C>
where
    S: ResultSource + Clone + 'static,
    C: Clock + Clone + 'static,
{
    store: FeedStore<S, C>,
}

impl<S, C> PagedFeedController<S, C>
where
    S: ResultSource + Clone + 'static,
    C: Clock + Clone + 'static,
{
    /// Create a controller whose feed will show `initial_query` once mounted
    #[must_use]
    pub fn new(env: FeedEnvironment<S, C>, initial_query: FeedQuery) -> Self {
        Self::with_config(env, initial_query, StoreConfig::default())
    }

    /// Create a controller with custom store settings
    #[must_use]
    pub fn with_config(
        env: FeedEnvironment<S, C>,
        initial_query: FeedQuery,
        config: StoreConfig,
    ) -> Self {
        let store = Store::with_config(
            FeedState::new(initial_query),
            PagedFeedReducer::new(),
            env,
            config,
        );
        Self { store }
    }

    /// The view appeared: load page 1 of the active query
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`unmount`](Self::unmount).
    pub async fn mount(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(FeedAction::Mounted).await
    }

    /// The filter owned by the surrounding screen changed.
    ///
    /// An equivalent query is ignored; anything else restarts the feed and
    /// invalidates fetches still in flight.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`unmount`](Self::unmount).
    pub async fn on_query_changed(&self, query: FeedQuery) -> Result<EffectHandle, StoreError> {
        self.store.send(FeedAction::QueryChanged { query }).await
    }

    /// The viewport is close to the end of the rendered items
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`unmount`](Self::unmount).
    pub async fn on_scrolled_near_bottom(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(FeedAction::ScrolledNearBottom).await
    }

    /// The search box changed.
    ///
    /// The handle completes once the debounce has settled and the resulting
    /// action has been reduced. It does not cover the fetch that follows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`unmount`](Self::unmount).
    pub async fn on_search_text_changed(
        &self,
        text: impl Into<String>,
    ) -> Result<EffectHandle, StoreError> {
        self.store
            .send(FeedAction::SearchTextChanged { text: text.into() })
            .await
    }

    /// Copy of the current feed state
    pub async fn snapshot(&self) -> FeedState {
        self.store.state(FeedState::clone).await
    }

    /// Read part of the current feed state
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&FeedState) -> T,
    {
        self.store.state(f).await
    }

    /// Observe actions produced by the feed's effects (page results and
    /// settled search text)
    ///
    /// Each action is delivered after it has been reduced, so a
    /// [`snapshot`](Self::snapshot) taken on receipt already reflects it.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FeedAction> {
        self.store.subscribe_actions()
    }

    /// Send a fetch-triggering event and wait until the resulting page
    /// has been applied or has failed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: no fetch result arrived in time (including
    ///   when the event triggered no fetch)
    /// - [`StoreError::ShutdownInProgress`]: the controller was unmounted
    pub async fn send_and_wait_for_page(
        &self,
        action: FeedAction,
        timeout: Duration,
    ) -> Result<FeedAction, StoreError> {
        self.store
            .send_and_wait_for(action, FeedAction::is_fetch_result, timeout)
            .await
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &FeedStore<S, C> {
        &self.store
    }

    /// The view went away.
    ///
    /// New events are rejected. Fetches still in flight may finish, but
    /// their results are no longer applied. In-flight fetches are awaited
    /// for the store's configured `default_shutdown_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if in-flight fetches outlast
    /// the timeout.
    pub async fn unmount(self) -> Result<(), StoreError> {
        let timeout = self.store.config().default_shutdown_timeout;
        self.unmount_within(timeout).await
    }

    /// [`unmount`](Self::unmount) with an explicit timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if in-flight fetches outlast
    /// `timeout`.
    pub async fn unmount_within(self, timeout: Duration) -> Result<(), StoreError> {
        tracing::debug!(?timeout, "Unmounting feed");
        self.store.shutdown(timeout).await
    }
}
