//! Typed, single-purpose operations per collection. No generic query
//! builder leaves this module — each page calls exactly the operation it
//! needs, and each operation is one round trip to the store.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::errors::ClientError;
use crate::models::{Application, ApplicationStatus, Job, Resume, SavedJob};
use crate::store::backend::{
    decode, Collection, DocumentBackend, FieldFilter, ListQuery, OrderBy,
};

/// Facade over the document store. Cheap to clone; every view-model holds
/// one.
#[derive(Clone)]
pub struct Documents {
    backend: Arc<dyn DocumentBackend>,
}

impl Documents {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Documents { backend }
    }

    /// Application history for an identity, newest submission first.
    /// An empty list means "no applications", never failure.
    pub async fn list_applications_for(
        &self,
        identity_id: &str,
    ) -> Result<Vec<Application>, ClientError> {
        let docs = self
            .backend
            .list(
                Collection::Applications,
                ListQuery::filtered(vec![FieldFilter::eq("applicant_id", identity_id)])
                    .ordered_by(OrderBy::desc("submitted_at")),
            )
            .await?;
        docs.into_iter().map(decode).collect()
    }

    /// Saved jobs for an identity, newest first.
    ///
    /// Duplicate-save policy: the store has no uniqueness constraint on
    /// `(owner_id, job_id)`, so concurrent toggles from two tabs can write
    /// the same bookmark twice. We accept the duplicate writes and
    /// de-duplicate here by job id, keeping the newest record.
    pub async fn list_saved_jobs_for(
        &self,
        identity_id: &str,
    ) -> Result<Vec<SavedJob>, ClientError> {
        let docs = self
            .backend
            .list(
                Collection::SavedJobs,
                ListQuery::filtered(vec![FieldFilter::eq("owner_id", identity_id)])
                    .ordered_by(OrderBy::desc("saved_at")),
            )
            .await?;
        let all: Vec<SavedJob> = docs.into_iter().map(decode).collect::<Result<_, _>>()?;

        let mut seen = std::collections::HashSet::new();
        Ok(all
            .into_iter()
            .filter(|s| seen.insert(s.job_id.clone()))
            .collect())
    }

    /// Looks up an existing bookmark for `(identity, job)`. Used to decide
    /// the toggle direction before mutating.
    pub async fn find_saved_job(
        &self,
        identity_id: &str,
        job_id: &str,
    ) -> Result<Option<SavedJob>, ClientError> {
        let docs = self
            .backend
            .list(
                Collection::SavedJobs,
                ListQuery::filtered(vec![
                    FieldFilter::eq("owner_id", identity_id),
                    FieldFilter::eq("job_id", job_id),
                ]),
            )
            .await?;
        docs.into_iter().next().map(decode).transpose()
    }

    /// Creates a bookmark. The caller is responsible for the existence
    /// pre-check via [`Documents::find_saved_job`].
    pub async fn save_job(
        &self,
        identity_id: &str,
        job_id: &str,
    ) -> Result<SavedJob, ClientError> {
        let doc = self
            .backend
            .create(
                Collection::SavedJobs,
                json!({
                    "owner_id": identity_id,
                    "job_id": job_id,
                    "saved_at": Utc::now(),
                }),
            )
            .await?;
        info!("saved job {job_id} for {identity_id}");
        decode(doc)
    }

    /// Removes a bookmark. Idempotent: a second unsave of the same id (or an
    /// unsave of a record another tab already removed) is not an error.
    pub async fn unsave_job(&self, saved_job_id: &str) -> Result<(), ClientError> {
        self.backend.delete(Collection::SavedJobs, saved_job_id).await
    }

    pub async fn get_job(&self, job_id: &str) -> Result<Option<Job>, ClientError> {
        self.backend
            .get(Collection::Jobs, job_id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn get_resume(&self, resume_id: &str) -> Result<Option<Resume>, ClientError> {
        self.backend
            .get(Collection::Resumes, resume_id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Active postings for the job board, newest first.
    pub async fn list_active_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let docs = self
            .backend
            .list(
                Collection::Jobs,
                ListQuery::filtered(vec![FieldFilter::eq("active", true)])
                    .ordered_by(OrderBy::desc("posted_at")),
            )
            .await?;
        docs.into_iter().map(decode).collect()
    }

    /// All resumes owned by an identity, most recently updated first.
    pub async fn list_resumes_for(&self, identity_id: &str) -> Result<Vec<Resume>, ClientError> {
        let docs = self
            .backend
            .list(
                Collection::Resumes,
                ListQuery::filtered(vec![FieldFilter::eq("owner_id", identity_id)])
                    .ordered_by(OrderBy::desc("updated_at")),
            )
            .await?;
        docs.into_iter().map(decode).collect()
    }

    /// Submits an application. The client only ever writes the initial
    /// `applied` status; everything after that is employer-driven.
    pub async fn submit_application(
        &self,
        identity_id: &str,
        job_id: &str,
        resume_id: &str,
        cover_letter_id: Option<&str>,
    ) -> Result<Application, ClientError> {
        let doc = self
            .backend
            .create(
                Collection::Applications,
                json!({
                    "job_id": job_id,
                    "applicant_id": identity_id,
                    "resume_id": resume_id,
                    "cover_letter_id": cover_letter_id,
                    "status": ApplicationStatus::Applied,
                    "notes": null,
                    "submitted_at": Utc::now(),
                }),
            )
            .await?;
        info!("submitted application to {job_id} for {identity_id}");
        decode(doc)
    }
}
