//! Document repository endpoints.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::warn;

use nx_core::error::NxResult;

use crate::client::ApiClient;
use crate::models::{Document, RecordSet};
use crate::response;

impl ApiClient {
    /// Fetch the repository root document.
    pub async fn fetch_document_root(&self) -> NxResult<Document> {
        self.fetch_document_by_path("/").await
    }

    /// Fetch a document by repository path.
    pub async fn fetch_document_by_path(&self, path: &str) -> NxResult<Document> {
        let url = self.repo_path_url(path);
        let outcome = self.get(&url).await;
        let mut document: Document = response::decode(outcome).await?;
        document.attach_client(self.clone());
        Ok(document)
    }

    /// Fetch a document by path and deliver the single result through `tx`.
    ///
    /// The caller owns the channel; the result is sent exactly once and
    /// the channel is never closed here.
    pub async fn fetch_document_by_path_into(
        &self,
        path: &str,
        tx: mpsc::Sender<NxResult<Document>>,
    ) {
        let result = self.fetch_document_by_path(path).await;
        if tx.send(result).await.is_err() {
            warn!("fetch_document_by_path receiver dropped before delivery");
        }
    }

    /// Create a document under the given parent path. Returns the created
    /// document as the server sees it, back-referenced to this client.
    pub async fn create_document(&self, parent_path: &str, document: &Document) -> NxResult<Document> {
        let url = self.repo_path_url(parent_path);
        let body = serde_json::to_value(document)?;
        let outcome = self.post(&url, &body).await;
        let mut created: Document = response::decode(outcome).await?;
        created.attach_client(self.clone());
        Ok(created)
    }

    /// Update a document in place (addressed by its path).
    pub async fn update_document(&self, document: &Document) -> NxResult<Document> {
        let url = self.repo_path_url(&document.path);
        let body = serde_json::to_value(document)?;
        let outcome = self.put(&url, &body).await;
        let mut updated: Document = response::decode(outcome).await?;
        updated.attach_client(self.clone());
        Ok(updated)
    }

    /// Delete a document (addressed by its path).
    pub async fn delete_document(&self, document: &Document) -> NxResult<()> {
        let url = self.repo_path_url(&document.path);
        let outcome = self.delete(&url).await;
        response::check(outcome).await
    }

    /// Run an NXQL query and return the matching record set.
    pub async fn query(&self, query: &str) -> NxResult<RecordSet> {
        let mut params = HashMap::new();
        params.insert("query".to_string(), query.to_string());
        self.automation()
            .operation("Repository.Query")
            .parameters(params)
            .execute_as_document_list()
            .await
    }
}
