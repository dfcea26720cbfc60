//! Connector port - brings up a [`RemoteClient`] from configuration.

use std::sync::Arc;

use async_trait::async_trait;

use super::RemoteClient;
use crate::config::InstanceConfig;
use crate::domain::ConnectError;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a session to instance `name`.
    ///
    /// `password` is already decoded.
    async fn connect(
        &self,
        name: &str,
        config: &InstanceConfig,
        password: &str,
    ) -> Result<Arc<dyn RemoteClient>, ConnectError>;
}
