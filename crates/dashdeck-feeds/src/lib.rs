//! Timer-driven mock data for dashdeck.
//!
//! A [`Generator`] decides how long to wait and what to produce next; [`spawn`]
//! runs one on the ambient tokio runtime and forwards every record over an
//! unbounded channel. Generators never touch application state. The receiving
//! side (the TUI event loop) drains the channel and applies records itself.
//!
//! Dropping the returned [`FeedHandle`] cancels the task.

pub mod activity;
pub mod catalog;
pub mod notification;

pub use activity::ActivityGenerator;
pub use notification::{NewNotification, NotificationGenerator};

use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A source of periodically generated records.
pub trait Generator: Send + 'static {
    type Item: Send + 'static;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// How long to wait before the next record.
    fn next_delay(&mut self, rng: &mut StdRng) -> Duration;

    fn generate(&mut self, rng: &mut StdRng) -> Self::Item;
}

/// Owns a running generator task. Cancels it on drop.
#[derive(Debug)]
pub struct FeedHandle {
    name: &'static str,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ask the task to stop. It exits at its next await point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(feed = self.name, error = %e, "feed task ended abnormally");
            }
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Start `generator` on the current tokio runtime.
///
/// The task sleeps for `next_delay`, sends one record, and repeats until it is
/// cancelled or the receiver is dropped.
pub fn spawn<G: Generator>(
    mut generator: G,
    tx: mpsc::UnboundedSender<G::Item>,
    mut rng: StdRng,
) -> FeedHandle {
    let name = generator.name();
    let token = CancellationToken::new();
    let child = token.clone();

    let task = tokio::spawn(async move {
        tracing::info!(feed = name, "feed started");
        loop {
            let delay = generator.next_delay(&mut rng);
            tokio::select! {
                _ = child.cancelled() => break,
                _ = tokio::time::sleep(delay) => {
                    let item = generator.generate(&mut rng);
                    if tx.send(item).is_err() {
                        tracing::debug!(feed = name, "receiver dropped");
                        break;
                    }
                }
            }
        }
        tracing::info!(feed = name, "feed stopped");
    });

    FeedHandle { name, token, task: Some(task) }
}
