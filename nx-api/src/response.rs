//! Response decoding and failure classification.
//!
//! Every HTTP exchange in this crate funnels through [`decode`] or
//! [`check`]. The precedence is fixed: a transport failure is reported
//! before the status code is looked at, and the status code is settled
//! before the body is parsed — a 404 with a mangled body is still
//! `NotFound`, never a parse error.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use nx_core::error::{NxError, NxResult};

/// Decode an exchange outcome into a typed value.
///
/// `outcome` is the raw result of the transport call, so transport errors
/// pass through untouched without the response being read.
pub async fn decode<T: DeserializeOwned>(outcome: NxResult<Response>) -> NxResult<T> {
    let (_, body) = validated_body(outcome).await?;
    serde_json::from_slice(&body)
        .map_err(|e| NxError::Decode(format!("response shape mismatch: {e}")))
}

/// Validate an exchange outcome when the caller only needs confirmation of
/// success and no value.
pub async fn check(outcome: NxResult<Response>) -> NxResult<()> {
    validated_body(outcome).await.map(|_| ())
}

/// Common validation pipeline: transport error, then status code, then
/// body encoding. Returns the status and raw body for further decoding.
async fn validated_body(outcome: NxResult<Response>) -> NxResult<(StatusCode, Vec<u8>)> {
    let response = outcome?;

    let status = response.status();
    debug!("decoding response, status={}", status);

    let body = response
        .bytes()
        .await
        .map_err(|e| NxError::Transport(format!("failed to read response body: {e}")))?;

    if status == StatusCode::NOT_FOUND {
        return Err(NxError::NotFound("cannot find resource (status 404)".into()));
    }

    if status != StatusCode::NO_CONTENT && !is_valid_json(&body) {
        return Err(NxError::Protocol(format!(
            "invalid response encoding (status {status})"
        )));
    }

    Ok((status, body.to_vec()))
}

/// Whether the bytes form a complete JSON document.
fn is_valid_json(body: &[u8]) -> bool {
    serde_json::from_slice::<serde::de::IgnoredAny>(body).is_ok()
}
