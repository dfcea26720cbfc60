//! Outcome model: terminal results of tasks, batches and whole runs.

use std::time::Duration;

use super::state::TaskState;
use super::task::Task;
use crate::parse::RejectedLine;

/// How a single task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The remote call returned normally.
    Success { elapsed: Duration },

    /// The remote call (or the task itself) failed.
    Failure { message: String },

    /// No remote call was made.
    Skipped { reason: String },
}

impl TaskOutcome {
    pub fn success(elapsed: Duration) -> Self {
        Self::Success { elapsed }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    /// The terminal [`TaskState`] this outcome corresponds to.
    pub fn state(&self) -> TaskState {
        match self {
            TaskOutcome::Success { .. } => TaskState::Succeeded,
            TaskOutcome::Failure { .. } => TaskState::Failed,
            TaskOutcome::Skipped { .. } => TaskState::Skipped,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskExecutionResult {
    pub task: Task,
    pub outcome: TaskOutcome,
}

impl TaskExecutionResult {
    pub fn new(task: Task, outcome: TaskOutcome) -> Self {
        Self { task, outcome }
    }
}

/// Results of one batch, in the batch's task order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub index: usize,
    pub results: Vec<TaskExecutionResult>,
}

/// Everything that happened during one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub batches: Vec<BatchReport>,
    pub rejected: Vec<RejectedLine>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn results(&self) -> impl Iterator<Item = &TaskExecutionResult> {
        self.batches.iter().flat_map(|b| b.results.iter())
    }

    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts {
            rejected: self.rejected.len(),
            ..OutcomeCounts::default()
        };
        for result in self.results() {
            match result.outcome {
                TaskOutcome::Success { .. } => counts.succeeded += 1,
                TaskOutcome::Failure { .. } => counts.failed += 1,
                TaskOutcome::Skipped { .. } => counts.skipped += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Task lines dropped before execution.
    pub rejected: usize,
}
