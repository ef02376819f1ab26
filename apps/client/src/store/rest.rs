//! REST implementation of [`DocumentBackend`] against the hosted store.
//!
//! Every operation is exactly one network round trip; there is no retry
//! loop and no caching — each view re-fetches independently.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::errors::ClientError;
use crate::store::backend::{Collection, Document, DocumentBackend, ListQuery};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ListResponse {
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct StoreError {
    error: StoreErrorBody,
}

#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: String,
}

/// Extracts a human-readable message from an error response body, falling
/// back to the raw body when it is not the structured shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<StoreError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

pub struct RestBackend {
    client: Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.store_base_url.clone(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!(
            "{}/v1/projects/{}/collections/{}",
            self.base_url,
            self.project_id,
            collection.as_str()
        )
    }

    fn document_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{id}", self.collection_url(collection))
    }
}

#[async_trait]
impl DocumentBackend for RestBackend {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, ClientError> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ClientError::QueryFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // A missing document is a valid outcome, not a failure.
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::QueryFailed(error_message(&body)));
        }

        let doc: Document = response
            .json()
            .await
            .map_err(|e| ClientError::QueryFailed(e.to_string()))?;
        debug!("get {}/{} ok", collection.as_str(), doc.id);
        Ok(Some(doc))
    }

    async fn list(
        &self,
        collection: Collection,
        query: ListQuery,
    ) -> Result<Vec<Document>, ClientError> {
        let response = self
            .client
            .post(format!("{}:query", self.collection_url(collection)))
            .header("x-api-key", &self.api_key)
            .json(&query)
            .send()
            .await
            .map_err(|e| ClientError::QueryFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::QueryFailed(error_message(&body)));
        }

        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| ClientError::QueryFailed(e.to_string()))?;
        debug!(
            "query {} returned {} documents",
            collection.as_str(),
            list.documents.len()
        );
        Ok(list.documents)
    }

    async fn create(&self, collection: Collection, fields: Value) -> Result<Document, ClientError> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .header("x-api-key", &self.api_key)
            .json(&fields)
            .send()
            .await
            .map_err(|e| ClientError::WriteFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::WriteFailed(error_message(&body)));
        }

        let doc: Document = response
            .json()
            .await
            .map_err(|e| ClientError::WriteFailed(e.to_string()))?;
        debug!("created {}/{}", collection.as_str(), doc.id);
        Ok(doc)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ClientError::WriteFailed(e.to_string()))?;

        let status = response.status();
        // Deleting an already-deleted id is success from the caller's
        // perspective.
        if status == StatusCode::NOT_FOUND || status.is_success() {
            debug!("deleted {}/{id}", collection.as_str());
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::WriteFailed(error_message(&body)))
    }
}
