//! In-memory task list built on the reducer architecture.
//!
//! The list supports three mutations: add (from raw text or the pending input
//! buffer), toggle completion, and delete. Counts are derived on demand.
//! Blank text and unknown ids are silent no-ops; there is no error path in
//! the domain.
//!
//! # Quick Start
//!
//! ```no_run
//! use tasklist::{TaskAction, TaskEnvironment, TaskListReducer, TaskListState};
//! use tasklist_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(
//!     TaskListState::new(),
//!     TaskListReducer::default(),
//!     TaskEnvironment::system(),
//! );
//!
//! store.send(TaskAction::AddTask { raw_text: "Buy milk".to_string() }).await?;
//!
//! let id = store.state(|s| s.tasks()[0].id()).await;
//! store.send(TaskAction::ToggleCompleted { id }).await?;
//!
//! let counts = store.state(|s| s.counts()).await;
//! println!("{} active, {} completed", counts.active, counts.completed);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{ConfigError, TaskListConfig};
pub use reducer::{TaskEnvironment, TaskListReducer};
pub use types::{
    InsertionOrder, Task, TaskAction, TaskCounts, TaskId, TaskListSnapshot, TaskListState,
};

/// Store specialised to the task list
pub type TaskListStore =
    tasklist_runtime::Store<TaskListState, TaskAction, TaskEnvironment, TaskListReducer>;
