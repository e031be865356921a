//! Reducer logic for the task list.
//!
//! Commands are checked against the current state. Accepted commands become
//! events which are then applied; rejected ones (blank text, unknown id) are
//! dropped silently. Events sent directly, for example when replaying a
//! recorded session, go through the same guarded application so ids stay
//! unique and texts stay non-empty.

use crate::types::{InsertionOrder, Task, TaskAction, TaskId, TaskListState};
use std::sync::Arc;
use tasklist_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, RandomIdGenerator, SystemClock},
    reducer::Reducer,
};

/// How many fresh ids to try before giving up on an add
const MAX_ID_ATTEMPTS: usize = 8;

/// Environment dependencies for the task list reducer
#[derive(Clone)]
pub struct TaskEnvironment {
    /// Clock for creation and completion timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TaskEnvironment {
    /// Creates a new `TaskEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random UUIDs
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator))
    }
}

/// Reducer for the task list
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskListReducer {
    order: InsertionOrder,
}

impl TaskListReducer {
    /// Creates a reducer that inserts new tasks according to `order`
    #[must_use]
    pub const fn new(order: InsertionOrder) -> Self {
        Self { order }
    }

    /// The insertion policy in use
    #[must_use]
    pub const fn order(&self) -> InsertionOrder {
        self.order
    }

    /// Pure form of [`Reducer::reduce`]: returns the next state and leaves
    /// `state` untouched
    ///
    /// The task list reducer never returns effects, so the state is the
    /// whole result of the transition.
    #[must_use]
    pub fn next_state(
        &self,
        state: &TaskListState,
        action: TaskAction,
        env: &TaskEnvironment,
    ) -> TaskListState {
        let mut next = state.clone();
        let effects = self.reduce(&mut next, action, env);
        debug_assert!(
            effects.iter().all(Effect::is_none),
            "task list reducer produced effects"
        );
        next
    }

    /// Asks the environment for an id not yet present in `state`
    fn allocate_id(state: &TaskListState, env: &TaskEnvironment) -> Option<TaskId> {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| TaskId::from_uuid(env.ids.next_id()))
            .find(|id| !state.contains(id))
    }

    /// Handles `AddTask` and `SubmitPending`
    fn add(&self, state: &mut TaskListState, raw_text: &str, env: &TaskEnvironment) {
        let text = raw_text.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring blank task text");
            return;
        }

        let Some(id) = Self::allocate_id(state, env) else {
            tracing::warn!(attempts = MAX_ID_ATTEMPTS, "Could not allocate a unique task id");
            return;
        };

        let event = TaskAction::TaskAdded {
            id,
            text: text.to_string(),
            created_at: env.clock.now(),
        };
        self.apply_event(state, &event);
    }

    /// Applies an event to state
    fn apply_event(&self, state: &mut TaskListState, action: &TaskAction) {
        match action {
            TaskAction::TaskAdded {
                id,
                text,
                created_at,
            } => {
                let text = text.trim();
                if text.is_empty() || state.contains(id) {
                    tracing::debug!(%id, "Skipping TaskAdded that would break list invariants");
                    return;
                }

                let task = Task::new(*id, text.to_string(), *created_at);
                match self.order {
                    InsertionOrder::NewestFirst => state.tasks.insert(0, task),
                    InsertionOrder::OldestFirst => state.tasks.push(task),
                }
                state.pending_input.clear();
                tracing::debug!(%id, total = state.tasks.len(), "Task added");
            },
            TaskAction::TaskToggled { id, at } => {
                if let Some(task) = state.tasks.iter_mut().find(|t| t.id == *id) {
                    task.toggle(*at);
                    tracing::debug!(%id, completed = task.completed, "Task toggled");
                }
            },
            TaskAction::TaskDeleted { id } => {
                state.tasks.retain(|t| t.id != *id);
                tracing::debug!(%id, total = state.tasks.len(), "Task deleted");
            },
            // Commands are not applied to state
            TaskAction::UpdatePendingInput { .. }
            | TaskAction::AddTask { .. }
            | TaskAction::SubmitPending
            | TaskAction::ToggleCompleted { .. }
            | TaskAction::DeleteTask { .. } => {},
        }
    }
}

impl Reducer for TaskListReducer {
    type State = TaskListState;
    type Action = TaskAction;
    type Environment = TaskEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.action_name(), "Reducing task action");

        match action {
            // ========== Commands ==========
            TaskAction::UpdatePendingInput { text } => {
                state.pending_input = text;
            },

            TaskAction::AddTask { raw_text } => {
                self.add(state, &raw_text, env);
            },

            TaskAction::SubmitPending => {
                let raw_text = state.pending_input.clone();
                self.add(state, &raw_text, env);
            },

            TaskAction::ToggleCompleted { id } => {
                if state.contains(&id) {
                    let event = TaskAction::TaskToggled {
                        id,
                        at: env.clock.now(),
                    };
                    self.apply_event(state, &event);
                } else {
                    tracing::debug!(%id, "Ignoring toggle of unknown task");
                }
            },

            TaskAction::DeleteTask { id } => {
                if state.contains(&id) {
                    self.apply_event(state, &TaskAction::TaskDeleted { id });
                } else {
                    tracing::debug!(%id, "Ignoring delete of unknown task");
                }
            },

            // ========== Events ==========
            TaskAction::TaskAdded { .. }
            | TaskAction::TaskToggled { .. }
            | TaskAction::TaskDeleted { .. } => {
                self.apply_event(state, &action);
            },
        }

        SmallVec::new()
    }
}
