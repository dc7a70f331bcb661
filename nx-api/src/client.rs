//! HTTP client for the Nuxeo server REST and automation APIs.
//!
//! Wraps `reqwest::Client` with server-specific URL construction,
//! authentication, header and cookie injection, and transport error
//! classification. One method call performs at most one network exchange;
//! there is no retry and no backoff at this layer.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;

use nx_core::config::{Auth, ConnectionConfig};
use nx_core::constants;
use nx_core::error::{NxError, NxResult};

use crate::automation::Automation;

/// HTTP client for communicating with a Nuxeo server.
///
/// Cloning is cheap (the inner `reqwest::Client` is shared) and a clone may
/// be used concurrently from any number of tasks. Decoded entities hold a
/// clone as their back-reference so navigation calls need no extra wiring.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Normalized server base URL (e.g. "http://localhost:8080/nuxeo").
    base_url: String,
    /// Authentication applied to every request.
    auth: Auth,
    /// Custom headers from the connection config.
    custom_headers: Vec<(String, String)>,
    /// Target repository name. Empty selects the server default.
    repository: String,
    /// Log request/response detail at debug level.
    debug: bool,
}

impl fmt::Debug for ApiClient {
    /// Credentials never appear in debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("repository", &self.repository)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new ApiClient from a connection configuration.
    pub fn new(config: &ConnectionConfig) -> NxResult<Self> {
        let base_url = config.effective_url();

        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_secs(15));

        // Handle self-signed certificates
        if config.accept_self_signed_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if !config.cookies.is_empty() {
            let url = reqwest::Url::parse(&base_url)
                .map_err(|e| NxError::Config(format!("invalid server url {base_url}: {e}")))?;
            let jar = reqwest::cookie::Jar::default();
            for (name, value) in &config.cookies {
                jar.add_cookie_str(&format!("{name}={value}"), &url);
            }
            builder = builder.cookie_provider(Arc::new(jar));
        }

        let inner = builder
            .build()
            .map_err(|e| NxError::Config(format!("failed to build HTTP client: {e}")))?;

        let custom_headers = config
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            inner,
            base_url,
            auth: config.auth.clone(),
            custom_headers,
            repository: config.repository.clone(),
            debug: config.debug,
        })
    }

    /// The normalized server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured repository name, if any.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Start configuring an automation operation against this client.
    pub fn automation(&self) -> Automation {
        Automation::new(self.clone())
    }

    // --- URL construction ---

    /// URL for a repository REST call addressing a document by path.
    ///
    /// `suffix` is appended verbatim, so adjuncts like "/@children" can be
    /// folded into it by the caller.
    pub(crate) fn repo_path_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, constants::REST_PATH_PREFIX, path)
    }

    /// URL for an automation operation.
    pub(crate) fn automation_url(&self, operation: &str) -> String {
        format!("{}{}/{}", self.base_url, constants::AUTOMATION_PREFIX, operation)
    }

    /// URL for a REST resource under /api/v1 (directories, users, login).
    pub(crate) fn rest_url(&self, suffix: &str) -> String {
        format!("{}/api/{}{}", self.base_url, constants::API_VERSION, suffix)
    }

    // --- Request plumbing ---

    /// Apply authentication to a request builder.
    fn apply_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::None => builder,
            Auth::Basic { username, password } => builder.basic_auth(username, Some(password)),
            Auth::Bearer(token) => builder.bearer_auth(token),
        }
    }

    /// Apply custom headers to a request builder.
    fn apply_headers(&self, mut builder: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.custom_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }

    /// Execute a single request. Transport failures become
    /// `NxError::Transport`; the response is returned unread so the
    /// decoder stays the only place interpreting bodies.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> NxResult<Response> {
        debug!("{} {}", method, url);

        let mut builder = self.inner.request(method, url);
        if let Some(b) = body {
            builder = builder.json(b);
        }
        let builder = self.apply_auth(self.apply_headers(builder));

        let started = Instant::now();
        let response = builder.send().await.map_err(Self::classify_error)?;

        if self.debug {
            debug!(
                "response status={} elapsed={:?} content_length={:?}",
                response.status(),
                started.elapsed(),
                response.content_length(),
            );
        }

        Ok(response)
    }

    /// Execute a GET request.
    pub async fn get(&self, url: &str) -> NxResult<Response> {
        self.send(Method::GET, url, None).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post(&self, url: &str, body: &serde_json::Value) -> NxResult<Response> {
        self.send(Method::POST, url, Some(body)).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put(&self, url: &str, body: &serde_json::Value) -> NxResult<Response> {
        self.send(Method::PUT, url, Some(body)).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, url: &str) -> NxResult<Response> {
        self.send(Method::DELETE, url, None).await
    }

    /// Execute a POST request with a multipart form.
    ///
    /// When `content_type` is given it replaces the form's own
    /// `multipart/form-data` header while keeping the form boundary, which
    /// is how the automation endpoint's `multipart/related` encoding is
    /// produced.
    pub async fn post_multipart(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
        content_type: Option<String>,
    ) -> NxResult<Response> {
        debug!("POST (multipart) {}", url);

        let builder = self.apply_auth(self.apply_headers(self.inner.post(url)));
        let mut request = builder
            .multipart(form)
            .build()
            .map_err(|e| NxError::Config(format!("failed to build multipart request: {e}")))?;

        if let Some(ct) = content_type {
            let value = HeaderValue::from_str(&ct)
                .map_err(|e| NxError::Config(format!("invalid content type {ct}: {e}")))?;
            request.headers_mut().insert(CONTENT_TYPE, value);
        }

        self.inner
            .execute(request)
            .await
            .map_err(Self::classify_error)
    }

    // --- Response helpers ---

    /// Get raw bytes from a response (for blob downloads).
    pub async fn response_bytes(response: Response) -> NxResult<Vec<u8>> {
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| NxError::Transport(format!("failed to read response bytes: {e}")))
    }

    /// Download a response body as bytes with progress reporting.
    ///
    /// The progress callback receives (bytes_downloaded, total_bytes).
    /// If the server does not send Content-Length, total_bytes will be 0.
    pub async fn response_bytes_with_progress<F>(response: Response, progress: F) -> NxResult<Vec<u8>>
    where
        F: Fn(u64, u64) + Send + 'static,
    {
        let total = response.content_length().unwrap_or(0);
        let mut downloaded: u64 = 0;
        let mut bytes = Vec::with_capacity(if total > 0 { total as usize } else { 8192 });

        let mut stream = response;
        while let Some(chunk) = stream
            .chunk()
            .await
            .map_err(|e| NxError::Transport(format!("download stream error: {e}")))?
        {
            downloaded += chunk.len() as u64;
            bytes.extend_from_slice(&chunk);
            progress(downloaded, total);
        }

        Ok(bytes)
    }

    /// Classify a reqwest error into an NxError variant.
    fn classify_error(e: reqwest::Error) -> NxError {
        if e.is_timeout() {
            NxError::Transport(format!("request timeout: {e}"))
        } else if e.is_connect() {
            NxError::Transport(format!("connection failed: {e}"))
        } else {
            NxError::Transport(e.to_string())
        }
    }
}
