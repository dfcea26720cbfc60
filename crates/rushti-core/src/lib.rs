//! rushti-core
//!
//! Core building blocks for RushTI: run TM1 processes in parallel from a
//! plain-text task file.
//!
//! # Modules
//! - **domain**: tasks, batches, outcomes, task states, errors
//! - **parse**: shell-style task lines and batch splitting on `wait` lines
//! - **ports**: `RemoteClient` and `Connector` traits
//! - **config**: instance configuration (TOML) and password decoding
//! - **registry**: instance name -> connected client, built once per run
//! - **runner**: one task to one terminal outcome
//! - **executor**: bounded concurrent execution of one batch
//! - **orchestrator**: batches in order, registry setup and teardown
//! - **impls**: the TM1 REST connector

pub mod config;
pub mod domain;
pub mod executor;
pub mod impls;
pub mod orchestrator;
pub mod parse;
pub mod ports;
pub mod registry;
pub mod runner;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use executor::ConcurrentBatchExecutor;
pub use orchestrator::Orchestrator;
pub use parse::TaskPlan;
pub use registry::ServiceRegistry;
pub use runner::TaskRunner;
