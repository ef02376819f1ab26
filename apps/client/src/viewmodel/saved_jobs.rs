//! Saved-jobs page: the identity's bookmarks plus the save/unsave toggle.
//!
//! The toggle is the check-then-write pattern: look the bookmark up first,
//! then create or delete. Two tabs racing the check can both write; the
//! read side de-duplicates (see `Documents::list_saved_jobs_for`).

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::ClientError;
use crate::models::{Identity, SavedJob};
use crate::session::SessionState;
use crate::store::Documents;
use crate::viewmodel::{PageModel, PageQuery, ViewState};

pub struct SavedJobsQuery;

#[async_trait]
impl PageQuery for SavedJobsQuery {
    type Output = Vec<SavedJob>;

    async fn fetch(
        &self,
        docs: &Documents,
        identity: &Identity,
    ) -> Result<Self::Output, ClientError> {
        docs.list_saved_jobs_for(&identity.id).await
    }
}

pub struct SavedJobsModel {
    inner: PageModel<SavedJobsQuery>,
    docs: Documents,
    session: watch::Receiver<SessionState>,
}

impl SavedJobsModel {
    pub fn new(docs: Documents, session: watch::Receiver<SessionState>) -> Self {
        SavedJobsModel {
            inner: PageModel::new(docs.clone(), session.clone(), SavedJobsQuery),
            docs,
            session,
        }
    }

    pub fn state(&self) -> ViewState<Vec<SavedJob>> {
        self.inner.state()
    }

    pub async fn sync(&mut self) {
        self.inner.sync().await;
    }

    /// Saves the job if it is not bookmarked, removes the bookmark if it
    /// is. Returns whether the job is saved afterwards, then refreshes the
    /// page state.
    pub async fn toggle_save(&mut self, job_id: &str) -> Result<bool, ClientError> {
        let identity = self
            .session
            .borrow()
            .identity
            .clone()
            .ok_or_else(|| ClientError::AuthFailed("not signed in".to_string()))?;

        let now_saved = match self.docs.find_saved_job(&identity.id, job_id).await? {
            Some(existing) => {
                self.docs.unsave_job(&existing.id).await?;
                false
            }
            None => {
                self.docs.save_job(&identity.id, job_id).await?;
                true
            }
        };
        self.inner.sync().await;
        Ok(now_saved)
    }
}
