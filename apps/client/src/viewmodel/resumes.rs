//! Resume pages: the owner's resume list and the template-rendered preview.

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{Identity, Resume};
use crate::render::{render_preview, RenderedResume};
use crate::store::Documents;
use crate::viewmodel::{PageModel, PageQuery};

/// "My resumes" page: everything the identity owns, most recently updated
/// first.
pub struct ResumeListQuery;

#[async_trait]
impl PageQuery for ResumeListQuery {
    type Output = Vec<Resume>;

    async fn fetch(
        &self,
        docs: &Documents,
        identity: &Identity,
    ) -> Result<Self::Output, ClientError> {
        docs.list_resumes_for(&identity.id).await
    }
}

pub type ResumeListModel = PageModel<ResumeListQuery>;

/// Preview page: fetch the resume, then run it through the template picked
/// by its stored identifier. `Loaded(None)` is a deleted/unknown resume.
pub struct ResumePreviewQuery {
    pub resume_id: String,
}

#[async_trait]
impl PageQuery for ResumePreviewQuery {
    type Output = Option<RenderedResume>;

    async fn fetch(
        &self,
        docs: &Documents,
        _identity: &Identity,
    ) -> Result<Self::Output, ClientError> {
        let resume = docs.get_resume(&self.resume_id).await?;
        Ok(resume.as_ref().map(render_preview))
    }
}

pub type ResumePreviewModel = PageModel<ResumePreviewQuery>;
