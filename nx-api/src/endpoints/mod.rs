//! Thin REST endpoint wrappers.
//!
//! Each method is a one-shot request/decode call on [`ApiClient`]: build
//! one URL, perform one exchange, run the outcome through the response
//! decoder. All of them return an explicit `NxResult`; nothing is ignored
//! or panicked on.
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod directories;
pub mod documents;
pub mod users;
