//! ServiceRegistry: instance name -> connected client.
//!
//! Built once before the first batch, read-only while batches run, shut
//! down once at the end of the run.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{AppConfig, decode_password};
use crate::ports::{Connector, RemoteClient};

#[derive(Default)]
pub struct ServiceRegistry {
    clients: HashMap<String, Arc<dyn RemoteClient>>,
}

impl ServiceRegistry {
    /// Build a registry from already connected clients.
    pub fn from_clients<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = (S, Arc<dyn RemoteClient>)>,
        S: Into<String>,
    {
        Self {
            clients: clients
                .into_iter()
                .map(|(name, client)| (name.into(), client))
                .collect(),
        }
    }

    /// Connect every configured instance.
    ///
    /// Instances whose password cannot be decoded or that refuse the
    /// connection are logged and left out; the run goes on without them.
    pub async fn connect(config: &AppConfig, connector: &dyn Connector) -> Self {
        let mut registry = Self::default();
        for (name, instance) in &config.instances {
            let password = match decode_password(name, &instance.password) {
                Ok(password) => password,
                Err(e) => {
                    tracing::error!(instance = %name, error = %e, "Instance {name} not accessible");
                    continue;
                }
            };
            match connector.connect(name, instance, &password).await {
                Ok(client) => {
                    tracing::info!(instance = %name, "Connected");
                    registry.clients.insert(name.clone(), client);
                }
                Err(e) => {
                    tracing::error!(instance = %name, error = %e, "Instance {name} not accessible");
                }
            }
        }
        registry
    }

    pub fn get(&self, instance: &str) -> Option<&Arc<dyn RemoteClient>> {
        self.clients.get(instance)
    }

    /// Connected instance names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clients.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Log out of every instance. Failures are logged, never returned.
    pub async fn shutdown(&self) {
        for name in self.names() {
            let Some(client) = self.clients.get(name) else {
                continue;
            };
            match client.logout().await {
                Ok(()) => tracing::info!(instance = %name, "Logged out"),
                Err(e) => tracing::warn!(instance = %name, error = %e, "Logout failed"),
            }
        }
    }
}
