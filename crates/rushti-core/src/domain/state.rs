//! Per-task state machine.

use super::errors::InvalidTransition;

/// TaskState tracks one task through a batch.
///
/// State transitions:
/// - Pending -> Dispatched -> Succeeded
/// - Pending -> Dispatched -> Failed
/// - Pending -> Dispatched -> Skipped
///
/// Terminal states are final. There are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Parsed and part of a batch, not yet handed to the pool.
    Pending,

    /// Handed to the pool; may be waiting for a permit or running.
    Dispatched,

    Succeeded,

    Failed,

    /// Never reached the remote service (instance not in the registry).
    Skipped,
}

impl TaskState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Succeeded | TaskState::Failed | TaskState::Skipped
        )
    }

    /// Move to `next`, rejecting anything the machine does not allow.
    pub fn transition(self, next: TaskState) -> Result<TaskState, InvalidTransition> {
        let allowed = match (self, next) {
            (TaskState::Pending, TaskState::Dispatched) => true,
            (TaskState::Dispatched, to) => to.is_terminal(),
            _ => false,
        };
        if allowed {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}
