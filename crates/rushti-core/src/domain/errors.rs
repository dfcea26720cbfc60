//! Errors - error types for every stage of a run.
//!
//! Only configuration loading and task-file reading are fatal to a run.
//! Everything that happens to a single task is folded into a
//! [`TaskOutcome`](super::TaskOutcome) at the task boundary.

use std::path::PathBuf;

use thiserror::Error;

/// A task line that could not be turned into a [`Task`](super::Task).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no closing quotation")]
    UnterminatedQuote,

    #[error("no escaped character after trailing backslash")]
    TrailingEscape,

    #[error("token `{0}` is not a key=value pair")]
    MissingEquals(String),

    #[error("token `{0}` has an empty key")]
    EmptyKey(String),

    #[error("required key `{0}` is missing")]
    MissingKey(&'static str),
}

/// Failure reported by a remote procedure call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An instance could not be brought up while building the registry.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid connection settings: {0}")]
    InvalidSettings(String),

    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected the session (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Problems with the instance configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{path} does not exist or cannot be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid configuration: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("password of instance `{instance}` is not valid base64 text")]
    PasswordEncoding { instance: String },
}

/// The task file itself could not be read.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("task file {path} cannot be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Illegal move in the per-task state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid task state transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: super::TaskState,
    pub to: super::TaskState,
}
