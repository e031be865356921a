//! Integration tests for the task list running inside a Store
//!
//! These exercise the full path a view takes: send intents, observe the
//! processed actions, read snapshots.

use std::sync::Arc;
use tasklist::{
    InsertionOrder, TaskAction, TaskCounts, TaskEnvironment, TaskListReducer, TaskListState,
    TaskListStore,
};
use tasklist_testing::{SequentialIdGenerator, test_clock};

fn test_store(order: InsertionOrder) -> TaskListStore {
    let env = TaskEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new()));
    TaskListStore::new(TaskListState::new(), TaskListReducer::new(order), env)
}

fn add(text: &str) -> TaskAction {
    TaskAction::AddTask {
        raw_text: text.to_string(),
    }
}

#[tokio::test]
async fn test_buy_milk_scenario() {
    let store = test_store(InsertionOrder::NewestFirst);

    assert_eq!(store.state(TaskListState::counts).await, TaskCounts::default());

    store.send(add("Buy milk")).await.unwrap();
    let counts = store.state(TaskListState::counts).await;
    assert_eq!(
        counts,
        TaskCounts {
            active: 1,
            completed: 0,
            total: 1
        }
    );

    let id = store.state(|s| s.tasks()[0].id()).await;
    store.send(TaskAction::ToggleCompleted { id }).await.unwrap();
    let counts = store.state(TaskListState::counts).await;
    assert_eq!((counts.active, counts.completed), (0, 1));

    store.send(TaskAction::DeleteTask { id }).await.unwrap();
    assert_eq!(store.state(TaskListState::counts).await.total, 0);
    assert!(store.state(TaskListState::is_empty).await);
}

#[tokio::test]
async fn test_typing_then_submitting() {
    let store = test_store(InsertionOrder::NewestFirst);

    for partial in ["W", "Wa", "Wal", "Walk dog  "] {
        store
            .send(TaskAction::UpdatePendingInput {
                text: partial.to_string(),
            })
            .await
            .unwrap();
    }
    assert_eq!(store.state(|s| s.pending_input().to_string()).await, "Walk dog  ");

    store.send(TaskAction::SubmitPending).await.unwrap();

    let snapshot = store.state(TaskListState::snapshot).await;
    assert_eq!(snapshot.pending_input, "");
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.tasks[0].text(), "Walk dog");
}

#[tokio::test]
async fn test_view_observes_every_action() {
    let store = test_store(InsertionOrder::OldestFirst);
    let mut rx = store.subscribe_actions();

    store.send(add("a")).await.unwrap();
    store.send(add("   ")).await.unwrap();

    // Blank adds are still delivered; they simply change nothing.
    assert_eq!(rx.recv().await.unwrap(), add("a"));
    assert_eq!(rx.recv().await.unwrap(), add("   "));
    assert_eq!(store.state(TaskListState::counts).await.total, 1);
}

#[tokio::test]
async fn test_concurrent_adds_keep_invariants() {
    let store = test_store(InsertionOrder::OldestFirst);

    let handles: Vec<_> = (0..25)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move { store.send(add(&format!("task {n}"))).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let state = store.state(Clone::clone).await;
    assert_eq!(state.counts().total, 25);
    assert!(state.has_unique_ids());
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test]
async fn test_shutdown_stops_mutations() {
    let store = test_store(InsertionOrder::NewestFirst);
    store.send(add("keep me")).await.unwrap();

    store
        .shutdown(std::time::Duration::from_millis(100))
        .await
        .unwrap();

    assert!(store.send(add("too late")).await.is_err());
    assert_eq!(store.state(TaskListState::counts).await.total, 1);
}
