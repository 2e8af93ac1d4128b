//! Scripted result source for tests.
//!
//! Responses are keyed by the request they answer, so the order in which
//! spawned fetches reach the source does not matter. A gated response is
//! held back until its [`Gate`] is opened, which lets a test decide the
//! order in which responses arrive.

use crate::source::{ResultSource, TransportError};
use crate::types::{FeedItem, FeedPage, FeedQuery, FeedRequest, ItemId};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

enum Scripted {
    Page(Vec<FeedItem>),
    Gated(Vec<FeedItem>, oneshot::Receiver<()>),
    Fail(TransportError),
}

/// Releases a gated response
#[derive(Debug)]
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    /// Let the held response complete
    pub fn open(self) {
        let _ = self.0.send(());
    }
}

/// In-memory [`ResultSource`] answering from scripted responses.
///
/// Requests without a scripted response fail with
/// [`TransportError::Request`].
#[derive(Clone, Default)]
pub struct MockResultSource {
    scripts: Arc<Mutex<HashMap<FeedRequest, VecDeque<Scripted>>>>,
    requests: Arc<Mutex<Vec<FeedRequest>>>,
}

impl std::fmt::Debug for MockResultSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockResultSource")
            .field("remaining", &self.remaining())
            .field("requests", &self.requests().len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockResultSource {
    /// Create a source with no scripted responses
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self, query: FeedQuery, page: u32, response: Scripted) {
        lock(&self.scripts)
            .entry(FeedRequest::new(query, page))
            .or_default()
            .push_back(response);
    }

    /// Answer the next request for `page` of `query` with `items`
    pub fn respond(&self, query: FeedQuery, page: u32, items: Vec<FeedItem>) {
        self.script(query, page, Scripted::Page(items));
    }

    /// Like [`respond`](Self::respond), but the answer is held until the
    /// returned gate is opened
    #[must_use]
    pub fn respond_gated(&self, query: FeedQuery, page: u32, items: Vec<FeedItem>) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.script(query, page, Scripted::Gated(items, rx));
        Gate(tx)
    }

    /// Fail the next request for `page` of `query`
    pub fn fail(&self, query: FeedQuery, page: u32, error: TransportError) {
        self.script(query, page, Scripted::Fail(error));
    }

    /// Every request received so far, in arrival order
    #[must_use]
    pub fn requests(&self) -> Vec<FeedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of scripted responses not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        lock(&self.scripts).values().map(VecDeque::len).sum()
    }

    fn take(&self, request: &FeedRequest) -> Option<Scripted> {
        lock(&self.requests).push(request.clone());
        lock(&self.scripts)
            .get_mut(request)
            .and_then(VecDeque::pop_front)
    }
}

impl ResultSource for MockResultSource {
    fn search(
        &self,
        request: FeedRequest,
    ) -> impl Future<Output = Result<FeedPage, TransportError>> + Send {
        let scripted = self.take(&request);
        let page_number = request.page;

        async move {
            match scripted {
                Some(Scripted::Page(items)) => Ok(FeedPage { items, page_number }),
                Some(Scripted::Gated(items, gate)) => {
                    // A dropped gate releases the response as well.
                    let _ = gate.await;
                    Ok(FeedPage { items, page_number })
                },
                Some(Scripted::Fail(error)) => Err(error),
                None => Err(TransportError::Request(format!(
                    "no scripted response for page {page_number} of {:?}",
                    request.query
                ))),
            }
        }
    }
}

/// Items with ids from `ids`, each with a poster
#[must_use]
pub fn numbered_items(ids: Range<ItemId>) -> Vec<FeedItem> {
    ids.map(|id| {
        FeedItem::new(id, format!("Movie {id}"))
            .with_poster(format!("/poster-{id}.jpg"))
            .with_language("hi")
    })
    .collect()
}
