//! Global error types for the Nuxeo client.
//!
//! Every failure surfaced by this workspace is one of the `NxError`
//! variants below. Nothing is recovered internally: the client performs
//! no retries and no fallback, so callers can branch on the variant.

use thiserror::Error;

/// Convenience type alias for Results using NxError.
pub type NxResult<T> = Result<T, NxError>;

/// Unified error type covering all failure categories in the client.
#[derive(Error, Debug)]
pub enum NxError {
    // -- Caller errors --
    /// The request was misconfigured before any exchange took place
    /// (e.g. missing operation name, entity not attached to a client).
    /// Never sent over the wire.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failed to build or interpret client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    // -- Wire errors --
    /// Network-level failure: DNS, TLS, connection refused, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The exchange completed but the server returned a body this layer
    /// cannot trust (e.g. non-JSON on a non-204 status).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The server answered 404 for the requested resource. Split out from
    /// `Protocol` because callers frequently branch on "does not exist".
    #[error("not found: {0}")]
    NotFound(String),

    /// The body was valid JSON but did not match the requested shape.
    #[error("decode error: {0}")]
    Decode(String),

    // -- File/IO errors --
    /// File system operation failed (log directory setup).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // -- Generic --
    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NxError {
    /// Whether this error is the 404 "does not exist" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NxError::NotFound(_))
    }

    /// Whether this error happened before or during the network exchange,
    /// as opposed to while interpreting the response.
    pub fn is_transport(&self) -> bool {
        matches!(self, NxError::Transport(_))
    }
}

impl From<serde_json::Error> for NxError {
    fn from(e: serde_json::Error) -> Self {
        NxError::Decode(e.to_string())
    }
}
