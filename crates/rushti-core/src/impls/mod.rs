//! Impls - production implementations of the ports.
//!
//! # Included
//! - **RestConnector / RestClient**: TM1 REST API over HTTP

pub mod tm1_rest;

pub use self::tm1_rest::{RestClient, RestConnector};
