//! Connection configuration for the Nuxeo client.
//!
//! A `ConnectionConfig` carries everything needed to construct a transport
//! handle: server URL, credentials, default headers and cookies, timeout,
//! and the debug flag. It is a plain value handed to `ApiClient::new`; this
//! crate does not load or persist configuration files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Authentication mode for the server connection.
///
/// Credentials are opaque strings: this layer hands them to the HTTP
/// transport and never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Auth {
    /// No authentication headers are sent.
    None,
    /// HTTP basic authentication.
    Basic {
        /// Account username.
        username: String,
        /// Account password.
        password: String,
    },
    /// Bearer token authentication.
    Bearer(String),
}

impl Default for Auth {
    fn default() -> Self {
        Auth::None
    }
}

/// Server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server base URL (e.g. "https://demo.nuxeo.com/nuxeo"). Falls back
    /// to the default local server when empty.
    #[serde(default)]
    pub url: String,

    /// Authentication mode.
    #[serde(default)]
    pub auth: Auth,

    /// Custom HTTP headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Default cookies (name, value) installed in the client's cookie jar.
    #[serde(default)]
    pub cookies: Vec<(String, String)>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Whether to accept self-signed TLS certificates from the server.
    #[serde(default)]
    pub accept_self_signed_certs: bool,

    /// Log request and response detail at debug level.
    #[serde(default)]
    pub debug: bool,

    /// Target repository name. Empty selects the server default.
    #[serde(default)]
    pub repository: String,
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth: Auth::None,
            headers: HashMap::new(),
            cookies: Vec::new(),
            timeout_ms: default_timeout(),
            accept_self_signed_certs: false,
            debug: false,
            repository: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Create a configuration for the given server URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set basic authentication credentials.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Auth::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Set bearer token authentication.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth = Auth::Bearer(token.into());
        self
    }

    /// Set the request timeout in milliseconds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Enable debug logging of requests and responses.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sanitize and normalize a server URL.
    ///
    /// Ensures the URL has a scheme, strips stray quotes and whitespace,
    /// and removes trailing slashes. An empty input stays empty so the
    /// caller can substitute the default URL.
    pub fn sanitize_url(url: &str) -> String {
        let trimmed = url.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }

    /// The effective base URL: sanitized, with the default substituted for
    /// an empty configuration.
    pub fn effective_url(&self) -> String {
        let sanitized = Self::sanitize_url(&self.url);
        if sanitized.is_empty() {
            constants::DEFAULT_URL.to_string()
        } else {
            sanitized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConnectionConfig::default();
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.auth, Auth::None);
        assert_eq!(config.effective_url(), constants::DEFAULT_URL);
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(
            ConnectionConfig::sanitize_url("http://192.168.1.100:8080/nuxeo/"),
            "http://192.168.1.100:8080/nuxeo"
        );
        assert_eq!(
            ConnectionConfig::sanitize_url("  \"https://demo.nuxeo.com/nuxeo/\"  "),
            "https://demo.nuxeo.com/nuxeo"
        );
        assert_eq!(
            ConnectionConfig::sanitize_url("192.168.1.5:8080/nuxeo"),
            "http://192.168.1.5:8080/nuxeo"
        );
        assert_eq!(ConnectionConfig::sanitize_url("   "), "");
    }

    #[test]
    fn test_builder_setters() {
        let config = ConnectionConfig::new("http://localhost:8080/nuxeo")
            .with_basic_auth("Administrator", "Administrator")
            .with_timeout_ms(60_000)
            .with_debug(true);
        assert!(matches!(config.auth, Auth::Basic { .. }));
        assert_eq!(config.timeout_ms, 60_000);
        assert!(config.debug);
    }

    #[test]
    fn test_token_wins_shape() {
        let config = ConnectionConfig::new("http://localhost:8080/nuxeo")
            .with_token("abc123");
        assert_eq!(config.auth, Auth::Bearer("abc123".into()));
    }
}
