//! nx-api - HTTP client for the Nuxeo content repository server.
//!
//! Provides a typed client over the server's REST surface (documents,
//! directories, users) and its automation endpoint. Automation operations
//! are configured through a fluent [`Automation`] builder supporting JSON
//! and multipart-with-blob payloads, with all responses funnelled through
//! a single decoder that classifies transport and protocol failures.

pub mod automation;
pub mod client;
pub mod endpoints;
pub mod models;
pub mod response;

// Re-export key types
pub use automation::Automation;
pub use client::ApiClient;
pub use models::{CurrentUser, DirectoryEntry, DirectorySet, Document, RecordSet, User};
