//! # Marquee Testing
//!
//! Testing utilities and helpers for the Marquee reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of core Environment traits
//! - The [`ReducerTest`] Given-When-Then builder
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use marquee_testing::test_clock;
//! use marquee_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_feed_mount() {
//!     let env = FeedEnvironment::new(source, FeedConfig::default(), test_clock());
//!     let store = Store::new(FeedState::new(query.clone()), PagedFeedReducer::new(), env);
//!
//!     store.send(FeedAction::Mounted).await?;
//! }
//! ```

use chrono::{DateTime, Utc};
use marquee_core::environment::Clock;

/// Ergonomic reducer testing
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of core Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee_testing::mocks::FixedClock;
    /// use marquee_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
