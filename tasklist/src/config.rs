//! Configuration for the task list binary
//!
//! Settings come from environment variables with sensible defaults:
//!
//! | Variable                    | Meaning                               | Default          |
//! |-----------------------------|---------------------------------------|------------------|
//! | `TASKLIST_INSERTION_ORDER`  | `newest-first` or `oldest-first`      | `newest-first`   |
//! | `TASKLIST_LOG`              | `tracing` filter directive            | `tasklist=info`  |
//!
//! `RUST_LOG`, when set, still wins over `TASKLIST_LOG` at subscriber setup.
//!
//! # Example
//!
//! ```
//! use tasklist::config::TaskListConfig;
//! use tasklist::InsertionOrder;
//!
//! let config = TaskListConfig::from_lookup(|key| match key {
//!     "TASKLIST_INSERTION_ORDER" => Some("oldest-first".to_string()),
//!     _ => None,
//! })?;
//! assert_eq!(config.insertion_order, InsertionOrder::OldestFirst);
//! # Ok::<(), tasklist::config::ConfigError>(())
//! ```

use crate::types::InsertionOrder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the insertion order
pub const INSERTION_ORDER_VAR: &str = "TASKLIST_INSERTION_ORDER";

/// Environment variable holding the log filter
pub const LOG_FILTER_VAR: &str = "TASKLIST_LOG";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Insertion order is not one of the known policies
    #[error("Invalid insertion order: {0} (expected newest-first or oldest-first)")]
    InvalidInsertionOrder(String),

    /// Log filter directive could not be parsed
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidLogFilter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },
}

/// Task list configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListConfig {
    /// Where new tasks are inserted
    pub insertion_order: InsertionOrder,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            insertion_order: InsertionOrder::default(),
            log_filter: "tasklist=info,tasklist_runtime=warn".to_string(),
        }
    }
}

impl TaskListConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(order) = present(INSERTION_ORDER_VAR) {
            config.insertion_order = order.parse()?;
        }

        if let Some(filter) = present(LOG_FILTER_VAR) {
            config.log_filter = filter.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if the log filter does not parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.env_filter().map(|_| ())
    }

    /// Builds the `tracing` filter described by `log_filter`
    ///
    /// # Errors
    ///
    /// Returns error if the log filter does not parse
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| ConfigError::InvalidLogFilter {
            filter: self.log_filter.clone(),
            reason: e.to_string(),
        })
    }
}
