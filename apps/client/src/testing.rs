//! Shared test doubles: an in-memory document backend and a scripted auth
//! provider. Compiled only for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::sync::{broadcast, Semaphore};
use uuid::Uuid;

use crate::errors::ClientError;
use crate::models::Identity;
use crate::store::backend::{Collection, Document, DocumentBackend, ListQuery};

// ────────────────────────────────────────────────────────────────────────────
// In-memory document backend
// ────────────────────────────────────────────────────────────────────────────

/// In-memory stand-in for the hosted document store. Supports the same
/// surface the real backend does: get, equality-filtered list with a single
/// ordering field, create, idempotent delete. Read/write failures can be
/// injected to exercise error paths.
pub struct MemoryBackend {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            collections: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn seed_raw(&self, collection: Collection, id: &str, fields: Value) {
        let mut collections = self.collections.lock().unwrap();
        collections.entry(collection).or_default().push(Document {
            id: id.to_string(),
            fields,
        });
    }

    pub fn seed_job(&self, id: &str, active: bool) {
        self.seed_raw(Collection::Jobs, id, job_fields(id, active));
    }

    pub fn seed_application(&self, applicant_id: &str, job_id: &str, submitted_at: DateTime<Utc>) {
        self.seed_raw(
            Collection::Applications,
            &Uuid::new_v4().to_string(),
            json!({
                "job_id": job_id,
                "applicant_id": applicant_id,
                "resume_id": "res-1",
                "cover_letter_id": null,
                "status": "applied",
                "notes": null,
                "submitted_at": submitted_at,
            }),
        );
    }

    pub fn seed_resume(&self, id: &str, owner_id: &str, template_id: &str, language: &str) {
        self.seed_raw(Collection::Resumes, id, resume_fields(owner_id, template_id, language));
    }
}

/// Minimal valid job payload for seeding.
pub fn job_fields(title: &str, active: bool) -> Value {
    json!({
        "title": title,
        "company": "Initech",
        "location": "Berlin",
        "work_mode": "remote",
        "seniority": "mid",
        "salary_min": null,
        "salary_max": null,
        "currency": null,
        "description": "Build things.",
        "requirements": [],
        "benefits": [],
        "tags": [],
        "owner_id": "poster-1",
        "active": active,
        "posted_at": Utc::now(),
    })
}

/// Minimal valid resume payload for seeding.
pub fn resume_fields(owner_id: &str, template_id: &str, language: &str) -> Value {
    json!({
        "owner_id": owner_id,
        "title": "My resume",
        "profile": {
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": null,
            "country": null,
            "occupation": "Engineer",
            "links": [],
        },
        "sections": {
            "experience": ["Analyst at Babbage & Co"],
            "skills": ["Mathematics", "Programming"],
        },
        "template_id": template_id,
        "language": language,
        "section_order": ["experience", "skills"],
        "created_at": Utc::now(),
        "updated_at": Utc::now(),
    })
}

fn matches_filters(doc: &Document, query: &ListQuery) -> bool {
    query
        .filters
        .iter()
        .all(|f| doc.fields.get(&f.field) == Some(&f.equals))
}

fn compare_field(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering as O;
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(O::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => O::Equal,
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, ClientError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ClientError::QueryFailed("injected read failure".into()));
        }
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn list(
        &self,
        collection: Collection,
        query: ListQuery,
    ) -> Result<Vec<Document>, ClientError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ClientError::QueryFailed("injected read failure".into()));
        }
        let collections = self.collections.lock().unwrap();
        let mut matched: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| matches_filters(d, &query)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order_by {
            let null = Value::Null;
            matched.sort_by(|a, b| {
                let av = a.fields.get(&order.field).unwrap_or(&null);
                let bv = b.fields.get(&order.field).unwrap_or(&null);
                let ord = compare_field(av, bv);
                match order.direction {
                    crate::store::backend::Direction::Ascending => ord,
                    crate::store::backend::Direction::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }

    async fn create(&self, collection: Collection, fields: Value) -> Result<Document, ClientError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ClientError::WriteFailed("injected write failure".into()));
        }
        let doc = Document {
            id: Uuid::new_v4().to_string(),
            fields,
        };
        let mut collections = self.collections.lock().unwrap();
        collections.entry(collection).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ClientError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ClientError::WriteFailed("injected write failure".into()));
        }
        let mut collections = self.collections.lock().unwrap();
        if let Some(docs) = collections.get_mut(&collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gated backend — holds list calls until released, for in-flight tests
// ────────────────────────────────────────────────────────────────────────────

/// Wraps a [`MemoryBackend`] and parks every `list` call until the gate is
/// opened, so tests can observe what happens to in-flight queries.
pub struct GatedBackend {
    inner: Arc<MemoryBackend>,
    gate: Semaphore,
    arrivals: AtomicUsize,
}

impl GatedBackend {
    pub fn new(inner: Arc<MemoryBackend>) -> Self {
        GatedBackend {
            inner,
            gate: Semaphore::new(0),
            arrivals: AtomicUsize::new(0),
        }
    }

    pub fn release_one(&self) {
        self.gate.add_permits(1);
    }

    /// Number of `list` calls that have reached the gate so far.
    pub fn arrivals(&self) -> usize {
        self.arrivals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentBackend for GatedBackend {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, ClientError> {
        self.inner.get(collection, id).await
    }

    async fn list(
        &self,
        collection: Collection,
        query: ListQuery,
    ) -> Result<Vec<Document>, ClientError> {
        self.arrivals.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ClientError::QueryFailed("gate closed".into()))?;
        self.inner.list(collection, query).await
    }

    async fn create(&self, collection: Collection, fields: Value) -> Result<Document, ClientError> {
        self.inner.create(collection, fields).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ClientError> {
        self.inner.delete(collection, id).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scripted auth provider
// ────────────────────────────────────────────────────────────────────────────

/// Scripted stand-in for the hosted auth provider.
pub struct StubAuthProvider {
    identity: Mutex<Option<Identity>>,
    accounts: Mutex<HashMap<String, String>>,
    reject_interactive: AtomicBool,
    fail_sign_out: AtomicBool,
    subscribe_calls: AtomicUsize,
    changes: broadcast::Sender<Option<Identity>>,
}

impl StubAuthProvider {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        StubAuthProvider {
            identity: Mutex::new(None),
            accounts: Mutex::new(HashMap::new()),
            reject_interactive: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
            subscribe_calls: AtomicUsize::new(0),
            changes,
        }
    }

    /// Pre-signed-in provider, as after a restored session.
    pub fn with_identity(identity: Identity) -> Self {
        let provider = Self::new();
        *provider.identity.lock().unwrap() = Some(identity);
        provider
    }

    pub fn allow_credentials(&self, email: &str, password: &str) {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
    }

    pub fn reject_interactive(&self, reject: bool) {
        self.reject_interactive.store(reject, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Emits an externally-initiated identity change (token expiry, another
    /// device signing the account out, ...).
    pub fn push_change(&self, identity: Option<Identity>) {
        *self.identity.lock().unwrap() = identity.clone();
        let _ = self.changes.send(identity);
    }
}

pub fn identity(id: &str, email: &str) -> Identity {
    Identity {
        id: id.to_string(),
        email: email.to_string(),
    }
}

#[async_trait]
impl crate::auth::AuthProvider for StubAuthProvider {
    async fn sign_in_with_provider(
        &self,
        kind: crate::auth::ProviderKind,
    ) -> Result<Identity, ClientError> {
        if self.reject_interactive.load(Ordering::SeqCst) {
            return Err(ClientError::AuthFailed("sign-in window closed".into()));
        }
        let signed_in = identity(
            &format!("ext-{}", kind.provider_id()),
            "federated@example.com",
        );
        *self.identity.lock().unwrap() = Some(signed_in.clone());
        let _ = self.changes.send(Some(signed_in.clone()));
        Ok(signed_in)
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError> {
        let ok = self.accounts.lock().unwrap().get(email) == Some(&password.to_string());
        if !ok {
            return Err(ClientError::AuthFailed("invalid credentials".into()));
        }
        let signed_in = identity(&format!("uid-{email}"), email);
        *self.identity.lock().unwrap() = Some(signed_in.clone());
        let _ = self.changes.send(Some(signed_in.clone()));
        Ok(signed_in)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(ClientError::AuthFailed("network unreachable".into()));
        }
        *self.identity.lock().unwrap() = None;
        let _ = self.changes.send(None);
        Ok(())
    }

    async fn current_identity(&self) -> Result<Option<Identity>, ClientError> {
        Ok(self.identity.lock().unwrap().clone())
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<Option<Identity>> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.changes.subscribe()
    }
}
