//! Result source abstraction.
//!
//! The feed never talks to a metadata API directly. It asks a
//! [`ResultSource`] for one page at a time; production wires in an HTTP
//! client, tests use [`crate::mocks::MockResultSource`].

use crate::types::{FeedPage, FeedRequest};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// Failure to obtain a page from a [`ResultSource`].
///
/// This is the only failure kind the feed knows about. It is never retried
/// automatically; the user retries by scrolling again or changing the query.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TransportError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The source answered with a non-success status.
    #[error("source returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Body or reason reported by the source
        message: String,
    },

    /// The response body could not be decoded into a page.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Asynchronous page query capability.
///
/// Implementations own transport concerns (timeouts, authentication); the
/// feed only sees a page or a [`TransportError`].
///
/// # Query semantics
///
/// - When `request.query` carries free text, the source performs a title
///   search and the feed treats the answer as a single, unpaginated page.
/// - Otherwise the source returns page `request.page` (1-based) of results
///   matching the language and tag filters.
pub trait ResultSource: Send + Sync {
    /// Fetch one page of results.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the page could not be fetched or decoded.
    fn search(
        &self,
        request: FeedRequest,
    ) -> impl Future<Output = Result<FeedPage, TransportError>> + Send;
}
