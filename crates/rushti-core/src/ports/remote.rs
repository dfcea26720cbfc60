//! RemoteClient port - one connected service instance.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Parameters, RemoteError};

/// A connected session against one named instance.
///
/// Implementations must be safe to call from many tasks at once; the
/// registry hands out shared references to every worker of a batch.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Execute `process` with `parameters` and report how long the call took.
    ///
    /// Any timeout is the implementation's business; callers wait for as
    /// long as this future takes.
    async fn invoke(&self, process: &str, parameters: &Parameters)
    -> Result<Duration, RemoteError>;

    /// Close the session.
    async fn logout(&self) -> Result<(), RemoteError>;
}
