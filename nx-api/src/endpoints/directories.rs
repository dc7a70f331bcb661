//! Directory (vocabulary) endpoints.

use nx_core::error::NxResult;

use crate::client::ApiClient;
use crate::models::{DirectoryEntry, DirectorySet};
use crate::response;

impl ApiClient {
    /// Fetch all entries of a directory by name.
    pub async fn get_directory(&self, name: &str) -> NxResult<DirectorySet> {
        let url = self.rest_url(&format!("/directory/{name}"));
        let outcome = self.get(&url).await;
        response::decode(outcome).await
    }

    /// Create an entry in the named directory. Returns the entry as the
    /// server stored it (with its assigned id).
    pub async fn create_directory(
        &self,
        name: &str,
        entry: &DirectoryEntry,
    ) -> NxResult<DirectoryEntry> {
        let url = self.rest_url(&format!("/directory/{name}"));
        let body = serde_json::to_value(entry)?;
        let outcome = self.post(&url, &body).await;
        response::decode(outcome).await
    }
}
