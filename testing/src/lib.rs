//! # Task List Testing
//!
//! Testing utilities and helpers for the reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{test_clock, ReducerTest, SequentialIdGenerator};
//!
//! ReducerTest::new(TaskListReducer::default())
//!     .with_env(TaskEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new())))
//!     .given_state(TaskListState::new())
//!     .when_action(TaskAction::AddTask { raw_text: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.counts().total, 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::{Clock, IdGenerator};
use uuid::Uuid;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc, Uuid};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
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
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }

    /// Predictable ids: `00000000-0000-0000-0000-000000000001`, `...02`, ...
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::SequentialIdGenerator;
    /// use tasklist_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start counting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Start counting at `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::SeqCst)))
        }
    }

    /// Id generator that always hands out the same id
    ///
    /// Useful for exercising collision handling.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedIdGenerator {
        id: Uuid,
    }

    impl FixedIdGenerator {
        /// Always return `id`
        #[must_use]
        pub const fn new(id: Uuid) -> Self {
            Self { id }
        }
    }

    impl IdGenerator for FixedIdGenerator {
        fn next_id(&self) -> Uuid {
            self.id
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, FixedIdGenerator, SequentialIdGenerator, test_clock};
