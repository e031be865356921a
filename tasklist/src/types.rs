//! Domain types for the task list.
//!
//! A task list is an ordered sequence of tasks plus the text the user is
//! currently typing. Tasks are created, toggled and deleted only through
//! [`TaskAction`]s processed by the reducer, so the fields here are
//! read-only outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tasklist_macros::Action;
use uuid::Uuid;

/// Unique identifier for a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a `TaskId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Task {
    pub(crate) id: TaskId,
    pub(crate) text: String,
    pub(crate) completed: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub(crate) const fn new(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Unique identifier
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Trimmed, non-empty text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the task is completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// When the task was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the task was last marked completed, if it still is
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub(crate) fn toggle(&mut self, at: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(at);
    }
}

/// Aggregate counts over a task list
///
/// `active + completed == total` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    /// Tasks not yet completed
    pub active: usize,
    /// Completed tasks
    pub completed: usize,
    /// All tasks
    pub total: usize,
}

impl TaskCounts {
    /// Counts the given tasks
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            active: tasks.len() - completed,
            completed,
            total: tasks.len(),
        }
    }
}

/// Where newly added tasks go
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertionOrder {
    /// Newest task first (prepend)
    #[default]
    NewestFirst,
    /// Oldest task first (append)
    OldestFirst,
}

impl fmt::Display for InsertionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewestFirst => write!(f, "newest-first"),
            Self::OldestFirst => write!(f, "oldest-first"),
        }
    }
}

impl FromStr for InsertionOrder {
    type Err = crate::config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest-first" | "newest" | "prepend" => Ok(Self::NewestFirst),
            "oldest-first" | "oldest" | "append" => Ok(Self::OldestFirst),
            _ => Err(crate::config::ConfigError::InvalidInsertionOrder(s.to_string())),
        }
    }
}

/// State of the task list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskListState {
    pub(crate) tasks: Vec<Task>,
    pub(crate) pending_input: String,
}

impl TaskListState {
    /// Creates an empty task list with an empty input buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            pending_input: String::new(),
        }
    }

    /// Tasks in display order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Text the user is currently typing
    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Returns a task by ID
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Returns true when there are no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Recomputes active/completed/total from the current tasks
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    /// Tasks not yet completed, in display order
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Completed tasks, in display order
    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Returns true when no two tasks share an id
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        let mut ids: Vec<TaskId> = self.tasks.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.windows(2).all(|pair| pair[0] != pair[1])
    }

    /// Immutable copy of everything a view needs to render
    #[must_use]
    pub fn snapshot(&self) -> TaskListSnapshot {
        TaskListSnapshot {
            tasks: self.tasks.clone(),
            pending_input: self.pending_input.clone(),
            counts: self.counts(),
        }
    }
}

/// What a view renders after every mutation
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskListSnapshot {
    /// Tasks in display order
    pub tasks: Vec<Task>,
    /// Text the user is currently typing
    pub pending_input: String,
    /// Derived counts
    pub counts: TaskCounts,
}

/// Actions representing commands and events for the task list
///
/// Commands are user intents; the reducer turns accepted commands into
/// events and applies them. Commands that would change nothing (empty text,
/// unknown id) are dropped without producing an event.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TaskAction {
    // ========== Commands ==========
    /// Command: Replace the pending input buffer
    #[command]
    UpdatePendingInput {
        /// New buffer contents, stored verbatim
        text: String,
    },

    /// Command: Add a task from raw text
    #[command]
    AddTask {
        /// Untrimmed user text
        raw_text: String,
    },

    /// Command: Add a task from the pending input buffer
    #[command]
    SubmitPending,

    /// Command: Flip a task between active and completed
    #[command]
    ToggleCompleted {
        /// Task to toggle
        id: TaskId,
    },

    /// Command: Delete a task
    #[command]
    DeleteTask {
        /// Task to delete
        id: TaskId,
    },

    // ========== Events ==========
    /// Event: Task was added
    #[event]
    TaskAdded {
        /// Task identifier
        id: TaskId,
        /// Trimmed text
        text: String,
        /// When the task was created
        created_at: DateTime<Utc>,
    },

    /// Event: Task was toggled
    #[event]
    TaskToggled {
        /// Task identifier
        id: TaskId,
        /// When the toggle happened
        at: DateTime<Utc>,
    },

    /// Event: Task was deleted
    #[event]
    TaskDeleted {
        /// Task identifier
        id: TaskId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_testing::test_clock;
    use tasklist_core::environment::Clock;

    fn task(n: u128, completed: bool) -> Task {
        let mut task = Task::new(
            TaskId::from_uuid(Uuid::from_u128(n)),
            format!("Task {n}"),
            test_clock().now(),
        );
        if completed {
            task.toggle(test_clock().now());
        }
        task
    }

    #[test]
    fn task_new_is_active() {
        let item = task(1, false);
        assert_eq!(item.text(), "Task 1");
        assert!(!item.is_completed());
        assert_eq!(item.completed_at(), None);
    }

    #[test]
    fn task_toggle_twice_restores() {
        let original = task(1, false);
        let mut item = original.clone();

        item.toggle(test_clock().now());
        assert!(item.is_completed());
        assert_eq!(item.completed_at(), Some(test_clock().now()));

        item.toggle(test_clock().now());
        assert_eq!(item, original);
    }

    #[test]
    fn counts_partition_total() {
        let tasks = vec![task(1, false), task(2, true), task(3, true)];
        let counts = TaskCounts::of(&tasks);
        assert_eq!(
            counts,
            TaskCounts {
                active: 1,
                completed: 2,
                total: 3
            }
        );
    }

    #[test]
    fn empty_state_counts() {
        let state = TaskListState::new();
        assert!(state.is_empty());
        assert_eq!(state.counts(), TaskCounts::default());
        assert!(state.has_unique_ids());
    }

    #[test]
    fn duplicate_ids_detected() {
        let state = TaskListState {
            tasks: vec![task(1, false), task(2, false), task(1, true)],
            pending_input: String::new(),
        };
        assert!(!state.has_unique_ids());
    }

    #[test]
    fn partitions_keep_order() {
        let state = TaskListState {
            tasks: vec![task(1, true), task(2, false), task(3, true), task(4, false)],
            pending_input: String::new(),
        };
        let active: Vec<_> = state.active_tasks().map(Task::text).collect();
        let completed: Vec<_> = state.completed_tasks().map(Task::text).collect();
        assert_eq!(active, ["Task 2", "Task 4"]);
        assert_eq!(completed, ["Task 1", "Task 3"]);
    }

    #[test]
    fn insertion_order_parses() {
        assert_eq!("newest-first".parse::<InsertionOrder>().ok(), Some(InsertionOrder::NewestFirst));
        assert_eq!(" Append ".parse::<InsertionOrder>().ok(), Some(InsertionOrder::OldestFirst));
        assert!("sideways".parse::<InsertionOrder>().is_err());
        assert_eq!(InsertionOrder::OldestFirst.to_string(), "oldest-first");
    }

    #[test]
    fn action_classification() {
        let command = TaskAction::AddTask {
            raw_text: "Buy milk".to_string(),
        };
        let event = TaskAction::TaskDeleted {
            id: TaskId::from_uuid(Uuid::nil()),
        };
        assert!(command.is_command());
        assert!(event.is_event());
        assert_eq!(event.event_type(), "TaskDeleted.v1");
        assert_eq!(TaskAction::SubmitPending.action_name(), "SubmitPending");
    }

    #[test]
    fn snapshot_serializes_ids_as_strings() {
        let state = TaskListState {
            tasks: vec![task(1, false)],
            pending_input: "draft".to_string(),
        };
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["tasks"][0]["id"], "00000000-0000-0000-0000-000000000001");
        assert_eq!(json["pending_input"], "draft");
        assert_eq!(json["counts"]["total"], 1);
    }
}
