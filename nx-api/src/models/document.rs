//! Document and record set entity models.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use nx_core::error::{NxError, NxResult};

use crate::client::ApiClient;
use crate::response;

/// A repository document.
///
/// Properties are a dynamic map: the server decides the schema, and typed
/// consumers translate known keys into concrete fields on their side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Wire entity type discriminator ("document").
    #[serde(rename = "entity-type", default)]
    pub entity_type: String,

    /// Server-assigned unique identifier.
    #[serde(default)]
    pub uid: String,

    /// Repository path (e.g. "/default-domain/workspaces").
    #[serde(default)]
    pub path: String,

    /// Document type (e.g. "File", "Folder").
    #[serde(rename = "type", default)]
    pub doc_type: String,

    /// Document name (last path segment).
    #[serde(default)]
    pub name: String,

    /// Last modification timestamp, when the server sends one.
    #[serde(rename = "lastModified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    /// Schema-prefixed dynamic properties (e.g. "dc:title").
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,

    /// Back-reference to the client that decoded this document. Never set
    /// by the wire decoder; always attached afterwards.
    #[serde(skip)]
    client: Option<ApiClient>,
}

impl Document {
    /// Create an unattached document of the given type and name, ready to
    /// be filled in and handed to a create call.
    pub fn new(doc_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            entity_type: "document".to_string(),
            doc_type: doc_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the repository path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set a schema-prefixed property (e.g. "dc:title").
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Attach the client back-reference enabling navigation calls.
    pub fn attach_client(&mut self, client: ApiClient) {
        self.client = Some(client);
    }

    /// Whether a client back-reference is attached.
    pub fn is_attached(&self) -> bool {
        self.client.is_some()
    }

    /// A string property by its schema-prefixed key (e.g. "dc:title").
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    fn client(&self) -> NxResult<&ApiClient> {
        self.client
            .as_ref()
            .ok_or_else(|| NxError::Validation("document is not attached to a client".into()))
    }

    /// Fetch the direct children of this document.
    pub async fn fetch_children(&self) -> NxResult<RecordSet> {
        let client = self.client()?;
        let url = client.repo_path_url(&format!("{}/@children", self.path));

        let outcome = client.get(&url).await;
        let mut records: RecordSet = response::decode(outcome).await?;
        records.attach_client(client);
        Ok(records)
    }

    /// Fetch the blob stored at the given xpath (e.g. "file:content") as
    /// raw bytes.
    pub async fn fetch_blob(&self, xpath: &str) -> NxResult<Vec<u8>> {
        let response = self.blob_response(xpath).await?;
        ApiClient::response_bytes(response).await
    }

    /// Fetch a blob with progress reporting; the callback receives
    /// (bytes_downloaded, total_bytes).
    pub async fn fetch_blob_with_progress<F>(&self, xpath: &str, progress: F) -> NxResult<Vec<u8>>
    where
        F: Fn(u64, u64) + Send + 'static,
    {
        let response = self.blob_response(xpath).await?;
        ApiClient::response_bytes_with_progress(response, progress).await
    }

    /// Issue the blob GET and settle the status. Blob payloads are not
    /// JSON, so the status is classified here instead of going through
    /// the JSON decoder.
    async fn blob_response(&self, xpath: &str) -> NxResult<reqwest::Response> {
        let client = self.client()?;
        let url = client.repo_path_url(&format!("{}/@blob/{}", self.path, xpath));

        let response = client.get(&url).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(NxError::NotFound(format!(
                "no blob at {} on {}",
                xpath, self.path
            )));
        }
        if !status.is_success() {
            return Err(NxError::Protocol(format!(
                "blob fetch at {} on {} failed with status {}",
                xpath, self.path, status
            )));
        }
        Ok(response)
    }

    /// Fetch children and deliver the single result through `tx`.
    ///
    /// The caller owns the channel: the result (success or typed failure)
    /// is sent exactly once and the channel is never closed here.
    pub async fn fetch_children_into(&self, tx: mpsc::Sender<NxResult<RecordSet>>) {
        let result = self.fetch_children().await;
        if tx.send(result).await.is_err() {
            warn!("fetch_children receiver dropped before delivery");
        }
    }

    /// Fetch a blob and deliver the single result through `tx`.
    pub async fn fetch_blob_into(&self, xpath: &str, tx: mpsc::Sender<NxResult<Vec<u8>>>) {
        let result = self.fetch_blob(xpath).await;
        if tx.send(result).await.is_err() {
            warn!("fetch_blob receiver dropped before delivery");
        }
    }
}

/// A paginated collection of documents plus page metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    /// The documents on the current page.
    #[serde(rename = "entries", default)]
    pub documents: Vec<Document>,

    /// Total number of documents matching the query.
    #[serde(rename = "totalSize", default)]
    pub total_size: i64,

    /// Zero-based index of the current page.
    #[serde(rename = "currentPageIndex", default)]
    pub current_page_index: i64,

    /// Total number of pages.
    #[serde(rename = "numberOfPages", default)]
    pub number_of_pages: i64,
}

impl RecordSet {
    /// Number of documents on this page.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether this page holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Attach the client back-reference to every contained document.
    pub fn attach_client(&mut self, client: &ApiClient) {
        for document in &mut self.documents {
            document.attach_client(client.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nx_core::config::ConnectionConfig;

    #[test]
    fn test_document_from_json() {
        let json = r#"{
            "entity-type": "document",
            "uid": "abc-123",
            "path": "/default-domain",
            "type": "Domain",
            "name": "default-domain",
            "properties": {"dc:title": "Domain"}
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.uid, "abc-123");
        assert_eq!(doc.doc_type, "Domain");
        assert_eq!(doc.property_str("dc:title"), Some("Domain"));
        assert!(!doc.is_attached());
    }

    #[test]
    fn test_record_set_from_json() {
        let json = r#"{
            "entity-type": "documents",
            "entries": [{"uid": "a"}, {"uid": "b"}],
            "totalSize": 2,
            "currentPageIndex": 0,
            "numberOfPages": 1
        }"#;
        let records: RecordSet = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.total_size, 2);
    }

    #[test]
    fn test_attach_client_fans_out() {
        let client = ApiClient::new(&ConnectionConfig::default()).unwrap();
        let mut records = RecordSet {
            documents: vec![Document::default(), Document::default()],
            ..RecordSet::default()
        };
        records.attach_client(&client);
        assert!(records.documents.iter().all(Document::is_attached));
    }

    #[tokio::test]
    async fn test_unattached_navigation_is_validation_error() {
        let doc = Document::default();
        let result = doc.fetch_children().await;
        assert!(matches!(result, Err(NxError::Validation(_))));
    }

    #[test]
    fn test_constructor_sets_entity_type() {
        let doc = Document::new("File", "report")
            .with_path("/ws/report")
            .with_property("dc:title", serde_json::json!("Report"));
        assert_eq!(doc.entity_type, "document");
        assert_eq!(doc.doc_type, "File");
        assert_eq!(doc.path, "/ws/report");
        assert_eq!(doc.property_str("dc:title"), Some("Report"));
    }

    #[test]
    fn test_attached_document_is_debuggable() {
        let client = ApiClient::new(&ConnectionConfig::default()).unwrap();
        let mut doc = Document::new("File", "report");
        doc.attach_client(client);
        let rendered = format!("{doc:?}");
        assert!(rendered.contains("report"));
    }

    #[test]
    fn test_client_backref_not_serialized() {
        let client = ApiClient::new(&ConnectionConfig::default()).unwrap();
        let mut doc = Document::default();
        doc.attach_client(client);
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("client").is_none());
    }
}
