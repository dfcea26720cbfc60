//! Ports - seams to the outside world.
//!
//! The orchestrator only talks to remote services through these traits, so
//! the execution engine can be driven by the REST connector in production
//! and by in-memory fakes in tests.

pub mod connector;
pub mod progress;
pub mod remote;

pub use self::connector::Connector;
pub use self::progress::BatchObserver;
pub use self::remote::RemoteClient;
