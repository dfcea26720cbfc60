//! Domain model (tasks, batches, outcomes, states, errors, ids).

pub mod errors;
pub mod ids;
pub mod outcome;
pub mod state;
pub mod task;

pub use self::errors::{
    ConfigError, ConnectError, InvalidTransition, ParseError, PlanError, RemoteError,
};
pub use self::ids::RunId;
pub use self::outcome::{BatchReport, OutcomeCounts, RunReport, TaskExecutionResult, TaskOutcome};
pub use self::state::TaskState;
pub use self::task::{Batch, Parameters, Task};
