//! Job-board pages: the browse list (active postings) and the posting
//! detail view, which is also where applying happens.

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{Application, Identity, Job};
use crate::store::Documents;
use crate::viewmodel::{PageModel, PageQuery};

/// Browse page: all active postings, newest first.
pub struct JobBoardQuery;

#[async_trait]
impl PageQuery for JobBoardQuery {
    type Output = Vec<Job>;

    async fn fetch(
        &self,
        docs: &Documents,
        _identity: &Identity,
    ) -> Result<Self::Output, ClientError> {
        docs.list_active_jobs().await
    }
}

pub type JobBoardModel = PageModel<JobBoardQuery>;

/// Detail page for a single posting. `Loaded(None)` is a removed/unknown
/// posting, which renders as "no longer available", not as an error.
pub struct JobDetailQuery {
    pub job_id: String,
}

#[async_trait]
impl PageQuery for JobDetailQuery {
    type Output = Option<Job>;

    async fn fetch(
        &self,
        docs: &Documents,
        _identity: &Identity,
    ) -> Result<Self::Output, ClientError> {
        docs.get_job(&self.job_id).await
    }
}

pub type JobDetailModel = PageModel<JobDetailQuery>;

/// Submits an application from the detail page with the chosen resume.
pub async fn apply_to_job(
    docs: &Documents,
    identity: &Identity,
    job_id: &str,
    resume_id: &str,
    cover_letter_id: Option<&str>,
) -> Result<Application, ClientError> {
    docs.submit_application(&identity.id, job_id, resume_id, cover_letter_id)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApplicationStatus;
    use crate::session::SessionState;
    use crate::testing::{identity, MemoryBackend};
    use crate::viewmodel::ViewState;
    use std::sync::Arc;
    use tokio::sync::watch;

    fn session(id: &str) -> (watch::Sender<SessionState>, watch::Receiver<SessionState>) {
        watch::channel(SessionState {
            identity: Some(identity(id, "ada@example.com")),
            resolving: false,
        })
    }

    #[tokio::test]
    async fn missing_posting_renders_as_gone_not_failed() {
        let backend = Arc::new(MemoryBackend::new());
        let (_tx, rx) = session("u-1");
        let mut model = JobDetailModel::new(
            Documents::new(backend),
            rx,
            JobDetailQuery {
                job_id: "missing-id".to_string(),
            },
        );
        model.sync().await;
        assert_eq!(model.state(), ViewState::Loaded(None));
    }

    #[tokio::test]
    async fn applying_from_the_detail_page_creates_an_applied_record() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_job("job-1", true);
        let docs = Documents::new(backend);

        let ada = identity("u-1", "ada@example.com");
        let app = apply_to_job(&docs, &ada, "job-1", "res-1", Some("cl-1"))
            .await
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.cover_letter_id.as_deref(), Some("cl-1"));
    }
}
