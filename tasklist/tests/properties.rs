//! Property tests: list invariants hold after any sequence of operations.

use proptest::prelude::*;
use std::sync::Arc;
use tasklist::{InsertionOrder, Task, TaskAction, TaskEnvironment, TaskListReducer, TaskListState};
use tasklist_testing::{SequentialIdGenerator, test_clock};

/// An operation picked before the state exists; positions are resolved
/// against whatever the list holds when the step runs.
#[derive(Clone, Debug)]
enum Op {
    Type(String),
    Add(String),
    Submit,
    Toggle(usize),
    Delete(usize),
    ToggleMissing,
    DeleteMissing,
}

fn op() -> impl Strategy<Value = Op> {
    let text = prop_oneof![
        Just(String::new()),
        "[ \t]{1,4}",
        "[ ]{0,2}[a-z]{1,8}[ ]{0,2}",
    ];
    prop_oneof![
        text.clone().prop_map(Op::Type),
        text.prop_map(Op::Add),
        Just(Op::Submit),
        (0usize..8).prop_map(Op::Toggle),
        (0usize..8).prop_map(Op::Delete),
        Just(Op::ToggleMissing),
        Just(Op::DeleteMissing),
    ]
}

fn order() -> impl Strategy<Value = InsertionOrder> {
    prop_oneof![Just(InsertionOrder::NewestFirst), Just(InsertionOrder::OldestFirst)]
}

fn env() -> TaskEnvironment {
    // Ids start high so they never meet the ids used for missing tasks below.
    TaskEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::starting_at(1_000)),
    )
}

fn missing_id() -> tasklist::TaskId {
    tasklist::TaskId::from_uuid(uuid::Uuid::from_u128(1))
}

fn to_action(op: &Op, state: &TaskListState) -> Option<TaskAction> {
    let nth = |n: usize| state.tasks().get(n).map(Task::id);
    match op {
        Op::Type(text) => Some(TaskAction::UpdatePendingInput { text: text.clone() }),
        Op::Add(text) => Some(TaskAction::AddTask {
            raw_text: text.clone(),
        }),
        Op::Submit => Some(TaskAction::SubmitPending),
        Op::Toggle(n) => nth(*n).map(|id| TaskAction::ToggleCompleted { id }),
        Op::Delete(n) => nth(*n).map(|id| TaskAction::DeleteTask { id }),
        Op::ToggleMissing => Some(TaskAction::ToggleCompleted { id: missing_id() }),
        Op::DeleteMissing => Some(TaskAction::DeleteTask { id: missing_id() }),
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_any_sequence(order in order(), ops in prop::collection::vec(op(), 0..40)) {
        let reducer = TaskListReducer::new(order);
        let env = env();
        let mut state = TaskListState::new();

        for op in &ops {
            let Some(action) = to_action(op, &state) else { continue };
            state = reducer.next_state(&state, action, &env);

            let counts = state.counts();
            prop_assert_eq!(counts.active + counts.completed, counts.total);
            prop_assert_eq!(counts.total, state.tasks().len());
            prop_assert!(state.has_unique_ids());
            prop_assert!(state.tasks().iter().all(|t| !t.text().is_empty() && t.text() == t.text().trim()));
        }
    }

    #[test]
    fn add_grows_by_one_with_trimmed_text(order in order(), text in "[ ]{0,3}[a-zA-Z0-9]{1,12}[ ]{0,3}") {
        let reducer = TaskListReducer::new(order);
        let env = env();
        let seed = reducer.next_state(&TaskListState::new(), TaskAction::AddTask { raw_text: "seed".into() }, &env);

        let next = reducer.next_state(&seed, TaskAction::AddTask { raw_text: text.clone() }, &env);

        prop_assert_eq!(next.counts().total, seed.counts().total + 1);
        let newest = match order {
            InsertionOrder::NewestFirst => &next.tasks()[0],
            InsertionOrder::OldestFirst => &next.tasks()[next.tasks().len() - 1],
        };
        prop_assert_eq!(newest.text(), text.trim());
        prop_assert!(!newest.is_completed());
    }

    #[test]
    fn blank_add_changes_nothing(text in "[ \t\n]{0,6}", pending in "[a-z ]{0,6}") {
        let reducer = TaskListReducer::default();
        let env = env();
        let state = reducer.next_state(
            &TaskListState::new(),
            TaskAction::UpdatePendingInput { text: pending },
            &env,
        );

        let next = reducer.next_state(&state, TaskAction::AddTask { raw_text: text }, &env);

        prop_assert_eq!(next, state);
    }

    #[test]
    fn delete_keeps_relative_order(count in 1usize..8, victim in 0usize..8) {
        let reducer = TaskListReducer::new(InsertionOrder::OldestFirst);
        let env = env();
        let mut state = TaskListState::new();
        for n in 0..count {
            state = reducer.next_state(&state, TaskAction::AddTask { raw_text: format!("t{n}") }, &env);
        }
        let victim = victim % count;
        let id = state.tasks()[victim].id();

        let next = reducer.next_state(&state, TaskAction::DeleteTask { id }, &env);

        let mut expected: Vec<_> = state.tasks().iter().map(Task::text).collect();
        expected.remove(victim);
        let actual: Vec<_> = next.tasks().iter().map(Task::text).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(next.counts().total, count - 1);
    }
}
