//! Terminal front end for the task list.
//!
//! Reads one line at a time from stdin, forwards the resulting actions to the
//! store and re-renders the list after every line.

use anyhow::Context;
use std::time::Duration;
use tasklist::view::{Filter, HELP, Intent, Screen};
use tasklist::{TaskEnvironment, TaskListConfig, TaskListReducer, TaskListState, TaskListStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TaskListConfig::from_env().context("loading configuration")?;

    // Initialize tracing on stderr so it never interleaves with the rendered list
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| config.env_filter())?,
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(insertion_order = %config.insertion_order, "Starting task list");

    let store: TaskListStore = TaskListStore::new(
        TaskListState::new(),
        TaskListReducer::new(config.insertion_order),
        TaskEnvironment::system(),
    );

    let mut filter = Filter::All;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    println!("{}", Screen::new(&store.state(TaskListState::snapshot).await, filter));

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let intent = match Intent::parse(&line) {
            Ok(intent) => intent,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        match &intent {
            Intent::Quit => break,
            Intent::Help => {
                println!("{HELP}");
                continue;
            },
            Intent::Json => {
                let snapshot = store.state(TaskListState::snapshot).await;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                continue;
            },
            Intent::Show(next) => filter = *next,
            Intent::Submit(_) | Intent::Toggle(_) | Intent::Delete(_) => {},
        }

        let snapshot = store.state(TaskListState::snapshot).await;
        match intent.into_actions(&snapshot) {
            Ok(actions) => {
                for action in actions {
                    store.send(action).await?;
                }
            },
            Err(error) => {
                println!("{error}");
                continue;
            },
        }

        println!("{}", Screen::new(&store.state(TaskListState::snapshot).await, filter));
    }

    store
        .shutdown(Duration::from_secs(1))
        .await
        .context("shutting down store")?;
    tracing::info!("Goodbye");

    Ok(())
}
