//! Feed environment.
//!
//! Dependencies injected into the feed reducer.

use crate::config::FeedConfig;
use crate::source::ResultSource;
use marquee_core::environment::Clock;

/// Feed environment.
///
/// # Type Parameters
///
/// - `S`: Result source (HTTP client in production, mock in tests)
/// - `C`: Clock used to stamp applied pages
#[derive(Debug, Clone)]
pub struct FeedEnvironment<S, C>
where
    S: ResultSource + Clone,
    C: Clock + Clone,
{
    /// Page source
    pub source: S,
    /// Paging behaviour
    pub config: FeedConfig,
    /// Time source
    pub clock: C,
}

impl<S, C> FeedEnvironment<S, C>
where
    S: ResultSource + Clone,
    C: Clock + Clone,
{
    /// Create a new feed environment
    #[must_use]
    pub const fn new(source: S, config: FeedConfig, clock: C) -> Self {
        Self {
            source,
            config,
            clock,
        }
    }
}
