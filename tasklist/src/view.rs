//! Terminal view for the task list.
//!
//! The view owns no task state. It turns input lines into [`Intent`]s,
//! translates intents into [`TaskAction`]s against the latest snapshot, and
//! renders snapshots as text.

use crate::types::{Task, TaskAction, TaskListSnapshot};
use std::fmt;
use thiserror::Error;

/// Help text listing the view's commands
pub const HELP: &str = "\
Type text and press enter to add a task.
  :toggle N     mark task N done / not done
  :delete N     delete task N
  :all          show every task
  :active       show active tasks only
  :completed    show completed tasks only
  :json         print the current snapshot as JSON
  :help         show this help
  :quit         exit
Lines starting with an unknown :word are added as tasks.
Start a line with :: to add it with one leading colon, e.g. ::quit";

/// Errors from interpreting user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    /// Position argument missing or not a positive number
    #[error("Expected a task number after :{command}, got {given:?}")]
    InvalidPosition {
        /// Command that needed a position
        command: &'static str,
        /// What the user typed
        given: String,
    },

    /// Position is past the end of the list
    #[error("There is no task {0}")]
    NoSuchTask(usize),
}

/// Which tasks the screen lists
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
}

impl Filter {
    const fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }
}

/// A parsed line of user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Put the text in the input buffer and submit it
    Submit(String),
    /// Toggle the task at a 1-based position
    Toggle(usize),
    /// Delete the task at a 1-based position
    Delete(usize),
    /// Change which tasks are listed
    Show(Filter),
    /// Print the snapshot as JSON
    Json,
    /// Print help
    Help,
    /// Leave the program
    Quit,
}

impl Intent {
    /// Parses one input line
    ///
    /// Lines that do not name a known `:` command are task text. A leading
    /// `::` escapes a command name and submits the rest with one colon.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidPosition`] when `:toggle` or `:delete` lacks
    /// a usable position
    pub fn parse(line: &str) -> Result<Self, ViewError> {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("::") {
            return Ok(Self::Submit(format!(":{rest}")));
        }
        let Some(command) = trimmed.strip_prefix(':') else {
            return Ok(Self::Submit(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().unwrap_or_default();

        match name {
            "toggle" | "t" => Ok(Self::Toggle(parse_position("toggle", arg)?)),
            "delete" | "d" => Ok(Self::Delete(parse_position("delete", arg)?)),
            "all" => Ok(Self::Show(Filter::All)),
            "active" => Ok(Self::Show(Filter::Active)),
            "completed" | "done" => Ok(Self::Show(Filter::Completed)),
            "json" => Ok(Self::Json),
            "help" | "h" => Ok(Self::Help),
            "quit" | "q" => Ok(Self::Quit),
            _ => Ok(Self::Submit(line.to_string())),
        }
    }

    /// Translates the intent into store actions for the given snapshot
    ///
    /// View-only intents translate to no actions.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoSuchTask`] when a position is out of range
    pub fn into_actions(self, snapshot: &TaskListSnapshot) -> Result<Vec<TaskAction>, ViewError> {
        match self {
            Self::Submit(text) => Ok(vec![
                TaskAction::UpdatePendingInput { text },
                TaskAction::SubmitPending,
            ]),
            Self::Toggle(position) => {
                let id = task_at(snapshot, position)?.id();
                Ok(vec![TaskAction::ToggleCompleted { id }])
            },
            Self::Delete(position) => {
                let id = task_at(snapshot, position)?.id();
                Ok(vec![TaskAction::DeleteTask { id }])
            },
            Self::Show(_) | Self::Json | Self::Help | Self::Quit => Ok(Vec::new()),
        }
    }
}

fn parse_position(command: &'static str, arg: &str) -> Result<usize, ViewError> {
    match arg.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(ViewError::InvalidPosition {
            command,
            given: arg.to_string(),
        }),
    }
}

fn task_at(snapshot: &TaskListSnapshot, position: usize) -> Result<&Task, ViewError> {
    position
        .checked_sub(1)
        .and_then(|index| snapshot.tasks.get(index))
        .ok_or(ViewError::NoSuchTask(position))
}

/// Renders a snapshot: header with the active-count badge, the three count
/// cards, then the task list or the empty-state message
///
/// Task numbers always refer to positions in the full list, so they stay
/// valid for `:toggle` / `:delete` under any filter.
pub struct Screen<'a> {
    snapshot: &'a TaskListSnapshot,
    filter: Filter,
}

impl<'a> Screen<'a> {
    /// Screen listing tasks admitted by `filter`
    #[must_use]
    pub const fn new(snapshot: &'a TaskListSnapshot, filter: Filter) -> Self {
        Self { snapshot, filter }
    }
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.snapshot.counts;

        writeln!(f, "Let's organize your day                    ({})", counts.active)?;
        writeln!(
            f,
            "  Active: {}  |  Done: {}  |  Total: {}",
            counts.active, counts.completed, counts.total
        )?;
        writeln!(f)?;

        if self.snapshot.tasks.is_empty() {
            writeln!(f, "  The task list is empty")?;
            return writeln!(f, "  Add your first task to get started!");
        }

        let mut shown = 0;
        for (index, task) in self.snapshot.tasks.iter().enumerate() {
            if !self.filter.admits(task) {
                continue;
            }
            let mark = if task.is_completed() { 'x' } else { ' ' };
            writeln!(f, "  {:>2}. [{mark}] {}", index + 1, task.text())?;
            shown += 1;
        }

        if shown == 0 {
            writeln!(f, "  Nothing to show here")?;
        }

        Ok(())
    }
}
