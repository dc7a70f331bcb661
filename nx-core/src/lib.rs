//! Shared foundation for the Nuxeo Rust client.
//!
//! Holds the unified error type, connection configuration, server
//! constants, and tracing setup used by the `nx-api` crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

pub use config::{Auth, ConnectionConfig};
pub use error::{NxError, NxResult};
