//! # Task List Runtime
//!
//! Runtime implementation for the reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Action Broadcast**: Lets observers (views) react to every processed action
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tasklist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// A task join error occurred during effect execution
        ///
        /// This typically means a spawned task panicked.
        #[error("Task failed during effect execution: {0}")]
        TaskJoinError(#[from] tokio::task::JoinError),

        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_poll_interval(Duration::from_millis(5));
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of actions buffered for slow observers
    pub broadcast_capacity: usize,
    /// How often `shutdown` re-checks the pending effect count
    pub shutdown_poll_interval: Duration,
}

impl StoreConfig {
    /// Set the action broadcast capacity
    ///
    /// A capacity of zero is bumped to one, the smallest channel tokio accepts.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Set the shutdown poll interval
    #[must_use]
    pub const fn with_shutdown_poll_interval(mut self, interval: Duration) -> Self {
        self.shutdown_poll_interval = interval;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            shutdown_poll_interval: Duration::from_millis(10),
        }
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
///
/// Keeps the pending effect count correct even if an effect panics.
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, BoxFuture, Duration, Effect, Ordering,
        Reducer, RwLock, StoreConfig, StoreError,
    };
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Every action processed by the reducer, in processing order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Broadcasts the action to observers
        /// 4. Starts executing returned effects asynchronously
        ///
        /// The reducer runs entirely under the write lock, so concurrent
        /// `send()` calls serialize and readers never observe a partially
        /// applied action.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.is_shutting_down() {
                return Err(Self::reject());
            }

            tracing::debug!("Processing action");

            let effects = {
                let mut state = self.state.write().await;

                // Shutdown may have started while this send waited for the lock.
                if self.is_shutting_down() {
                    return Err(Self::reject());
                }
                metrics::counter!("store.commands.total").increment(1);

                let start = std::time::Instant::now();
                let effects = self
                    .reducer
                    .reduce(&mut *state, action.clone(), &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                // Broadcast while still holding the lock so observers see
                // actions in the same order the reducer applied them.
                let _ = self.action_broadcast.send(action);

                effects
            };

            for effect in effects {
                self.execute_effect(effect);
            }

            Ok(())
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let total = store.state(|s| s.tasks().len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to every action processed by this store
        ///
        /// Observers receive actions in processing order. A receiver that
        /// falls more than `broadcast_capacity` actions behind gets
        /// `RecvError::Lagged` and should re-read state.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Number of effects currently running
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Returns true once [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new actions), waits for any
        /// action currently being reduced, then waits for pending effects to
        /// finish. Once this returns no further action changes the state.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            // Wait out any send already inside the reducer; later ones see the flag.
            drop(self.state.write().await);

            let start = std::time::Instant::now();

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(
                        pending_effects = pending,
                        "Shutdown timeout: {} effects still running", pending
                    );
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(self.config.shutdown_poll_interval).await;
            }
        }

        fn reject() -> StoreError {
            tracing::warn!("Rejected action: store is shutting down");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            StoreError::ShutdownInProgress
        }

        /// Execute an effect
        ///
        /// No-op effects are dropped immediately. Anything else runs in a
        /// spawned task counted in `pending_effects`; actions produced by
        /// `Effect::Future` are fed back through [`Store::send`].
        fn execute_effect(&self, effect: Effect<A>) {
            if effect.is_none() {
                tracing::trace!("Executing Effect::None (no-op)");
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                return;
            }

            self.pending_effects.fetch_add(1, Ordering::SeqCst);
            let guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));
            let store = self.clone();

            tokio::spawn(async move {
                let _guard = guard;
                store.run_effect(effect).await;
            });
        }

        fn run_effect(&self, effect: Effect<A>) -> BoxFuture<'static, ()> {
            let store = self.clone();

            Box::pin(async move {
                match effect {
                    Effect::None => {},
                    Effect::Future(fut) => {
                        metrics::counter!("store.effects.executed", "type" => "future")
                            .increment(1);
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            if let Err(error) = store.send(action).await {
                                tracing::warn!(%error, "Dropped feedback action");
                            }
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    },
                    Effect::Parallel(effects) => {
                        tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                        metrics::counter!("store.effects.executed", "type" => "parallel")
                            .increment(1);
                        let tasks: Vec<_> = effects
                            .into_iter()
                            .map(|effect| tokio::spawn(store.run_effect(effect)))
                            .collect();
                        for task in tasks {
                            if let Err(error) = task.await {
                                let error = StoreError::from(error);
                                tracing::error!(%error, "Parallel effect failed");
                            }
                        }
                    },
                    Effect::Sequential(effects) => {
                        tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                        metrics::counter!("store.effects.executed", "type" => "sequential")
                            .increment(1);
                        for effect in effects {
                            store.run_effect(effect).await;
                        }
                    },
                }
            })
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
