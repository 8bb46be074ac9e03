use std::future::Future;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::backend::{ExtractedUnit, FacultyInsights, Session};
use crate::error::AppError;
use crate::state::questions::RegenTarget;
use crate::state::Route;

/// Result of one simulated backend call
#[derive(Debug)]
pub enum TaskOutcome {
    Auth(Result<Session, AppError>),
    Reply(Result<String, AppError>),
    Extraction(Result<Vec<ExtractedUnit>, AppError>),
    Regenerated {
        target: RegenTarget,
        result: Result<(), AppError>,
    },
    Insights(Result<FacultyInsights, AppError>),
}

/// A finished task, tagged with the page mount that started it
#[derive(Debug)]
pub struct Completion {
    pub id: u64,
    pub mount: u64,
    pub route: Route,
    pub outcome: TaskOutcome,
}

struct Running {
    id: u64,
    mount: u64,
    handle: JoinHandle<()>,
}

/// Spawns backend calls and hands their results back to the event loop.
///
/// Every task belongs to one page mount; leaving the page aborts them all.
pub struct TaskRunner {
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    running: Vec<Running>,
    next_id: u64,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            tx,
            rx,
            running: Vec::new(),
            next_id: 0,
        }
    }

    pub fn spawn<F>(&mut self, mount: u64, route: Route, task: F) -> u64
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = task.await;
            // the receiver lives as long as the runner
            let _ = tx.send(Completion {
                id,
                mount,
                route,
                outcome,
            });
        });
        tracing::debug!(id, mount, %route, "task spawned");
        self.running.push(Running { id, mount, handle });
        id
    }

    /// Abort everything a page mount started. Returns how many were running.
    pub fn cancel_mount(&mut self, mount: u64) -> usize {
        let before = self.running.len();
        self.running.retain(|task| {
            if task.mount == mount {
                task.handle.abort();
                false
            } else {
                true
            }
        });
        let cancelled = before - self.running.len();
        if cancelled > 0 {
            tracing::info!(mount, cancelled, "aborted tasks of a closed page");
        }
        cancelled
    }

    pub fn in_flight(&self) -> usize {
        self.running.len()
    }

    fn finished(&mut self, completion: &Completion) {
        self.running.retain(|task| task.id != completion.id);
    }

    /// A completion if one is ready, without waiting.
    pub fn try_next(&mut self) -> Option<Completion> {
        let completion = self.rx.try_recv().ok()?;
        self.finished(&completion);
        Some(completion)
    }

    /// Wait for the next completion. `None` once nothing is left in flight.
    #[cfg(test)]
    pub async fn next(&mut self) -> Option<Completion> {
        if self.running.is_empty() {
            return self.try_next();
        }
        let completion = self.rx.recv().await?;
        self.finished(&completion);
        Some(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completion_carries_mount() {
        let mut runner = TaskRunner::new();
        runner.spawn(7, Route::AiAssistant, async {
            TaskOutcome::Reply(Ok("hi".to_string()))
        });
        assert_eq!(runner.in_flight(), 1);

        let completion = runner.next().await.expect("completion");
        assert_eq!(completion.mount, 7);
        assert_eq!(completion.route, Route::AiAssistant);
        assert!(matches!(completion.outcome, TaskOutcome::Reply(Ok(ref s)) if s == "hi"));
        assert_eq!(runner.in_flight(), 0);
        assert!(runner.next().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_mount_aborts_only_that_page() {
        let mut runner = TaskRunner::new();
        runner.spawn(1, Route::SyllabusUpload, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            TaskOutcome::Extraction(Ok(Vec::new()))
        });
        runner.spawn(2, Route::Dashboard, async {
            TaskOutcome::Reply(Ok("kept".to_string()))
        });

        assert_eq!(runner.cancel_mount(1), 1);
        assert_eq!(runner.cancel_mount(1), 0);

        let completion = runner.next().await.expect("completion");
        assert_eq!(completion.mount, 2);
        assert!(runner.next().await.is_none());
    }
}
