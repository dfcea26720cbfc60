//! In-memory fakes shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::InstanceConfig;
use crate::domain::{ConnectError, Parameters, RemoteError};
use crate::ports::{Connector, RemoteClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Started(String),
    Finished(String),
}

#[derive(Default)]
pub(crate) struct FakeClient {
    delay: Duration,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    fail_logout: bool,
    events: Mutex<Vec<Event>>,
    calls: Mutex<Vec<(String, Parameters)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    logouts: AtomicUsize,
}

impl FakeClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn failing(mut self, process: &str) -> Self {
        self.failing.insert(process.to_string());
        self
    }

    pub(crate) fn panicking(mut self, process: &str) -> Self {
        self.panicking.insert(process.to_string());
        self
    }

    pub(crate) fn with_failing_logout(mut self) -> Self {
        self.fail_logout = true;
        self
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> Vec<(String, Parameters)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClient for FakeClient {
    async fn invoke(
        &self,
        process: &str,
        parameters: &Parameters,
    ) -> Result<Duration, RemoteError> {
        self.calls
            .lock()
            .unwrap()
            .push((process.to_string(), parameters.clone()));
        self.events
            .lock()
            .unwrap()
            .push(Event::Started(process.to_string()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.events
            .lock()
            .unwrap()
            .push(Event::Finished(process.to_string()));

        if self.panicking.contains(process) {
            panic!("remote library blew up in {process}");
        }
        if self.failing.contains(process) {
            return Err(RemoteError::new(format!("{process} aborted")));
        }
        Ok(self.delay)
    }

    async fn logout(&self) -> Result<(), RemoteError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout {
            return Err(RemoteError::new("session already closed"));
        }
        Ok(())
    }
}

/// Connects only the instances it was given; everything else is "down".
#[derive(Default)]
pub(crate) struct FakeConnector {
    clients: HashMap<String, Arc<FakeClient>>,
    passwords: Mutex<Vec<(String, String)>>,
}

impl FakeConnector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_instance(mut self, name: &str, client: Arc<FakeClient>) -> Self {
        self.clients.insert(name.to_string(), client);
        self
    }

    pub(crate) fn passwords(&self) -> Vec<(String, String)> {
        self.passwords.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(
        &self,
        name: &str,
        _config: &InstanceConfig,
        password: &str,
    ) -> Result<Arc<dyn RemoteClient>, ConnectError> {
        self.passwords
            .lock()
            .unwrap()
            .push((name.to_string(), password.to_string()));
        match self.clients.get(name) {
            Some(client) => Ok(client.clone() as Arc<dyn RemoteClient>),
            None => Err(ConnectError::Rejected {
                status: 503,
                body: format!("{name} is not running"),
            }),
        }
    }
}

pub(crate) fn instance_config() -> InstanceConfig {
    InstanceConfig {
        address: "localhost".to_string(),
        port: 12354,
        user: "admin".to_string(),
        password: "YXBwbGU=".to_string(),
        ssl: false,
        namespace: None,
        base_url: None,
        verify_tls: false,
        timeout_secs: None,
    }
}
