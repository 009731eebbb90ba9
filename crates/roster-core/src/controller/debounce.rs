//! Search input debouncing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::traits::{UserCache, UserSource};

use super::UserListController;

/// Quiet period after the last keystroke before a search runs.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(500);

/// Coalesces bursts of query input into a single search.
///
/// Each pushed query restarts the quiet period; when it elapses the most
/// recent query is handed to the callback. A settled query identical to the
/// last one the callback accepted is skipped, so a failed search can be
/// retried by submitting it again. Dropping the debouncer (or calling
/// [`finish`](Self::finish)) still delivers a pending query.
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Spawn a debouncer calling `on_settled` with each settled query.
    ///
    /// The callback returns whether the query was handled; rejected queries
    /// are not remembered for duplicate suppression. Must be called from
    /// within a Tokio runtime.
    pub fn spawn<F, Fut>(delay: Duration, on_settled: F) -> Self
    where
        F: Fn(String) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let (input, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, delay, on_settled));
        Self { input, task }
    }

    /// Spawn a debouncer that drives [`UserListController::search`].
    pub fn for_controller<C, S>(
        controller: Arc<UserListController<C, S>>,
        delay: Duration,
    ) -> Self
    where
        C: UserCache + 'static,
        S: UserSource + 'static,
    {
        Self::spawn(delay, move |query| {
            let controller = Arc::clone(&controller);
            async move {
                match controller.search(&query).await {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(error = %err, query, "Search failed");
                        false
                    }
                }
            }
        })
    }

    /// Record a new query; restarts the quiet period.
    pub fn push(&self, query: impl Into<String>) {
        if self.input.send(query.into()).is_err() {
            debug!("Debouncer task has stopped; dropping query");
        }
    }

    /// Stop accepting input and wait for any pending search to finish.
    pub async fn finish(self) {
        let Self { input, task } = self;
        drop(input);
        if let Err(err) = task.await {
            warn!(error = %err, "Debouncer task ended abnormally");
        }
    }
}

async fn run<F, Fut>(mut rx: mpsc::UnboundedReceiver<String>, delay: Duration, on_settled: F)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = bool>,
{
    let mut last: Option<String> = None;

    while let Some(mut query) = rx.recv().await {
        let mut closed = false;
        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(next) => query = next,
                    None => {
                        closed = true;
                        break;
                    }
                },
                _ = tokio::time::sleep(delay) => break,
            }
        }

        if last.as_deref() != Some(query.as_str()) {
            debug!(query, "Query settled");
            if on_settled(query.clone()).await {
                last = Some(query);
            }
        }

        if closed {
            break;
        }
    }
}
