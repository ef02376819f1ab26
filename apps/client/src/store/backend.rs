//! The seam between the typed query layer and the hosted document store.
//!
//! The store is addressed by collection name + document id and queried by
//! equality filters and a single ordering field. That is the whole surface
//! this client needs: read-by-id, filtered list, create, delete. No
//! transactions, no joins.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ClientError;

/// The four logical collections this client touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Jobs,
    Resumes,
    SavedJobs,
    Applications,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Resumes => "resumes",
            Collection::SavedJobs => "saved_jobs",
            Collection::Applications => "applications",
        }
    }
}

/// Equality filter on a named field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub equals: Value,
}

impl FieldFilter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        FieldFilter {
            field: field.to_string(),
            equals: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn desc(field: &str) -> Self {
        OrderBy {
            field: field.to_string(),
            direction: Direction::Descending,
        }
    }

    pub fn asc(field: &str) -> Self {
        OrderBy {
            field: field.to_string(),
            direction: Direction::Ascending,
        }
    }
}

/// A filtered-list request. Filters are ANDed; ordering is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filters: Vec<FieldFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn filtered(filters: Vec<FieldFilter>) -> Self {
        ListQuery {
            filters,
            order_by: None,
            limit: None,
        }
    }

    pub fn ordered_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }
}

/// Raw document envelope: the store-assigned id plus the field payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// Async port to the hosted document store. Held as `Arc<dyn DocumentBackend>`
/// by the typed query layer; swapped for an in-memory fake in tests.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Read one document by id. A missing id is `Ok(None)`, never an error.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, ClientError>;

    /// List documents matching the query. An empty result is valid and
    /// distinct from failure.
    async fn list(&self, collection: Collection, query: ListQuery)
        -> Result<Vec<Document>, ClientError>;

    /// Create a document; the store assigns the id.
    async fn create(&self, collection: Collection, fields: Value) -> Result<Document, ClientError>;

    /// Delete by id. Idempotent: deleting an id that no longer exists
    /// succeeds.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ClientError>;
}

/// Decodes a raw document into a typed entity, injecting the envelope id
/// into the payload so models can carry a flat `id` field.
pub fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, ClientError> {
    let mut fields = doc.fields;
    if let Some(map) = fields.as_object_mut() {
        map.insert("id".to_string(), Value::String(doc.id));
    }
    Ok(serde_json::from_value(fields)?)
}
