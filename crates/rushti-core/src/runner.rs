//! TaskRunner: runs one task against its instance.

use std::sync::Arc;

use crate::domain::{Task, TaskExecutionResult, TaskOutcome};
use crate::registry::ServiceRegistry;

/// Reason recorded for tasks whose instance is not in the registry.
pub const INSTANCE_NOT_ACCESSIBLE: &str = "instance not accessible";

/// Runs tasks against a shared registry.
///
/// Cheap to clone; every worker of a batch holds its own copy.
#[derive(Clone)]
pub struct TaskRunner {
    registry: Arc<ServiceRegistry>,
}

impl TaskRunner {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Execute `task` to a terminal outcome.
    ///
    /// Emits exactly two events: one on dispatch and one with the outcome.
    pub async fn run(&self, task: Task) -> TaskExecutionResult {
        tracing::info!(
            instance = task.instance(),
            process = task.process(),
            parameters = ?task.parameters(),
            "Executing process"
        );

        let outcome = match self.registry.get(task.instance()) {
            None => TaskOutcome::skipped(INSTANCE_NOT_ACCESSIBLE),
            Some(client) => match client.invoke(task.process(), task.parameters()).await {
                Ok(elapsed) => TaskOutcome::success(elapsed),
                Err(e) => TaskOutcome::failure(e.to_string()),
            },
        };

        match &outcome {
            TaskOutcome::Success { elapsed } => tracing::info!(
                instance = task.instance(),
                process = task.process(),
                parameters = ?task.parameters(),
                elapsed = ?elapsed,
                "Execution successful"
            ),
            TaskOutcome::Failure { message } => tracing::error!(
                instance = task.instance(),
                process = task.process(),
                parameters = ?task.parameters(),
                error = %message,
                "Execution failed"
            ),
            TaskOutcome::Skipped { reason } => tracing::error!(
                instance = task.instance(),
                process = task.process(),
                "Process {} not executed on {}: {reason}",
                task.process(),
                task.instance()
            ),
        }

        TaskExecutionResult::new(task, outcome)
    }
}
