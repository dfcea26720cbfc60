//! ConcurrentBatchExecutor: bounded parallel execution of one batch.
//!
//! Every task of the batch is spawned on the runtime and gated by a
//! semaphore, so at most `max_concurrency` remote calls are in flight.
//! `execute` returns only after every spawned task has finished; that join
//! is what a `wait` line means.

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::Instrument;

use crate::domain::{Batch, BatchReport, TaskExecutionResult, TaskOutcome, TaskState};
use crate::runner::TaskRunner;

pub struct ConcurrentBatchExecutor {
    max_concurrency: NonZeroUsize,
}

impl ConcurrentBatchExecutor {
    pub fn new(max_concurrency: NonZeroUsize) -> Self {
        Self { max_concurrency }
    }

    pub fn max_concurrency(&self) -> NonZeroUsize {
        self.max_concurrency
    }

    /// Run every task of `batch` and wait for all of them.
    ///
    /// Results come back in batch order. A task that panics is reported as
    /// a failure; its siblings are unaffected.
    pub async fn execute(&self, batch: &Batch, runner: &TaskRunner) -> BatchReport {
        let permits = Arc::new(Semaphore::new(self.max_concurrency.get()));
        let mut states = vec![TaskState::Pending; batch.len()];
        let mut handles = Vec::with_capacity(batch.len());

        // 1) spawn every task; each waits for a permit before calling out
        for (slot, task) in batch.tasks().iter().enumerate() {
            let permits = Arc::clone(&permits);
            let runner = runner.clone();
            let task = task.clone();
            let span = tracing::info_span!("task", batch = batch.index(), slot);

            handles.push(tokio::spawn(
                async move {
                    // the semaphore is never closed, so acquiring cannot fail
                    let _permit = permits.acquire_owned().await.ok();
                    runner.run(task).await
                }
                .instrument(span),
            ));
            states[slot] = advance(slot, states[slot], TaskState::Dispatched);
        }

        // 2) barrier: nothing is returned until every handle has joined
        let joined = join_all(handles).await;

        // 3) collect in batch order, a panicked task becomes a failure
        let mut results = Vec::with_capacity(batch.len());
        for ((slot, task), joined) in batch.tasks().iter().enumerate().zip(joined) {
            let result = joined.unwrap_or_else(|e| {
                let message = join_failure_message(e);
                tracing::error!(
                    batch = batch.index(),
                    slot,
                    instance = task.instance(),
                    process = task.process(),
                    error = %message,
                    "Execution failed"
                );
                TaskExecutionResult::new(task.clone(), TaskOutcome::failure(message))
            });
            states[slot] = advance(slot, states[slot], result.outcome.state());
            results.push(result);
        }

        debug_assert!(states.iter().all(|s| s.is_terminal()));

        BatchReport {
            index: batch.index(),
            results,
        }
    }
}

fn advance(slot: usize, from: TaskState, to: TaskState) -> TaskState {
    from.transition(to).unwrap_or_else(|e| {
        tracing::warn!(slot, error = %e, "Unexpected task state change");
        to
    })
}

fn join_failure_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "task was cancelled".to_string();
    }
    let payload = err.into_panic();
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    format!("task panicked: {detail}")
}
