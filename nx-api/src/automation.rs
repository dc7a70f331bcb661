//! Automation operation builder.
//!
//! An automation operation is a named remote procedure invoked with a
//! parameter map, a context map, and an optional input reference. The
//! builder accumulates configuration with zero I/O; [`Automation::execute`]
//! performs exactly one POST to `{base}/site/automation/{name}` and the
//! typed wrappers hand the outcome to the response decoder.
//!
//! Two wire encodings exist. Without a blob the operation body goes out as
//! a plain JSON request. With a blob the request becomes a two-part
//! `multipart/related` payload: the `operation_body` control document plus
//! the raw blob bytes under the blob's name.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use nx_core::constants;
use nx_core::error::{NxError, NxResult};

use crate::client::ApiClient;
use crate::models::{Document, RecordSet};
use crate::response;

/// JSON control document sent for every operation.
#[derive(Debug, Serialize)]
struct OperationBody<'a> {
    context: &'a HashMap<String, String>,
    params: &'a HashMap<String, String>,
    input: &'a str,
}

/// Named binary payload attached to an operation.
#[derive(Debug, Clone)]
struct Attachment {
    name: String,
    bytes: Vec<u8>,
}

/// Fluent builder for a single automation operation.
///
/// Each setter takes and returns the builder by value, and `execute`
/// consumes it: one builder, one exchange. Concurrent operations each
/// build their own; the shared piece is the `ApiClient`.
pub struct Automation {
    client: ApiClient,
    operation: String,
    parameters: HashMap<String, String>,
    context: HashMap<String, String>,
    input: String,
    attachment: Option<Attachment>,
}

impl Automation {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            operation: String::new(),
            parameters: HashMap::new(),
            context: HashMap::new(),
            input: String::new(),
            attachment: None,
        }
    }

    /// Set the remote operation identifier (e.g. "Repository.GetDocument").
    ///
    /// Leaving it unset (or empty) makes `execute` fail with a validation
    /// error before any network call.
    pub fn operation(mut self, name: impl Into<String>) -> Self {
        self.operation = name.into();
        self
    }

    /// Replace the parameter map wholesale.
    pub fn parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Replace the execution context map wholesale.
    ///
    /// The wire format always carries a context object; when this is never
    /// called an empty object is sent.
    pub fn context(mut self, context: HashMap<String, String>) -> Self {
        self.context = context;
        self
    }

    /// Set the operand reference (e.g. a document path).
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    /// Attach a named binary payload.
    ///
    /// Also sets the input to `name`: the multipart request uses the
    /// attachment name as the input marker.
    pub fn attachment(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        self.input = name.clone();
        self.attachment = Some(Attachment { name, bytes });
        self
    }

    /// Perform the single network exchange for this operation.
    ///
    /// Returns the raw response; interpreting the body is left to the
    /// typed wrappers and the response decoder.
    pub async fn execute(self) -> NxResult<reqwest::Response> {
        if self.operation.is_empty() {
            return Err(NxError::Validation("missing operation name".into()));
        }

        let url = self.client.automation_url(&self.operation);

        let body = OperationBody {
            context: &self.context,
            params: &self.parameters,
            input: &self.input,
        };
        let body_json = serde_json::to_value(&body)
            .map_err(|e| NxError::Config(format!("failed to encode operation body: {e}")))?;

        match self.attachment {
            None => {
                debug!("automation {} (json body)", self.operation);
                self.client.post(&url, &body_json).await
            }
            Some(attachment) => {
                debug!(
                    "automation {} (multipart, blob {} of {} bytes)",
                    self.operation,
                    attachment.name,
                    attachment.bytes.len()
                );

                let control = reqwest::multipart::Part::text(body_json.to_string())
                    .file_name(constants::OPERATION_BODY_PART)
                    .mime_str("application/json")
                    .map_err(|e| NxError::Config(format!("invalid control part: {e}")))?;
                let blob = reqwest::multipart::Part::bytes(attachment.bytes)
                    .file_name(attachment.name.clone());

                let form = reqwest::multipart::Form::new()
                    .part(constants::OPERATION_BODY_PART, control)
                    .part(attachment.name, blob);
                let content_type = format!("multipart/related; boundary={}", form.boundary());

                self.client
                    .post_multipart(&url, form, Some(content_type))
                    .await
            }
        }
    }

    /// Execute and decode the result as a single document, back-referenced
    /// to this builder's client.
    pub async fn execute_as_document(self) -> NxResult<Document> {
        let client = self.client.clone();
        let outcome = self.execute().await;
        let mut document: Document = response::decode(outcome).await?;
        document.attach_client(client);
        Ok(document)
    }

    /// Execute and decode the result as a record set, back-referencing
    /// every contained document.
    pub async fn execute_as_document_list(self) -> NxResult<RecordSet> {
        let client = self.client.clone();
        let outcome = self.execute().await;
        let mut records: RecordSet = response::decode(outcome).await?;
        records.attach_client(&client);
        Ok(records)
    }

    /// Execute and return the raw response payload bytes verbatim, for
    /// blob-producing operations. No decoding beyond what `execute`
    /// already surfaced.
    pub async fn execute_as_binary(self) -> NxResult<Vec<u8>> {
        let response = self.execute().await?;
        ApiClient::response_bytes(response).await
    }

    /// Execute and decode the result as untyped JSON for operations whose
    /// shape the caller inspects directly.
    pub async fn execute_as_value(self) -> NxResult<serde_json::Value> {
        let outcome = self.execute().await;
        response::decode(outcome).await
    }
}
