//! Server constants shared across the workspace.

/// Base URL used when the connection configuration leaves it empty.
pub const DEFAULT_URL: &str = "http://localhost:8080/nuxeo";

/// REST API version segment.
pub const API_VERSION: &str = "v1";

/// Path prefix for repository REST calls, relative to the base URL.
pub const REST_PATH_PREFIX: &str = "/api/v1/path";

/// Path prefix for automation operation calls, relative to the base URL.
pub const AUTOMATION_PREFIX: &str = "/site/automation";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Name of the multipart part carrying the JSON control document of an
/// automation operation.
pub const OPERATION_BODY_PART: &str = "operation_body";
