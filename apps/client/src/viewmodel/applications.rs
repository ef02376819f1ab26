//! Application-history page: everything the identity has applied to,
//! newest submission first. Status values are employer-driven; this page
//! only reads them.

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{Application, Identity};
use crate::store::Documents;
use crate::viewmodel::{PageModel, PageQuery};

pub struct ApplicationHistoryQuery;

#[async_trait]
impl PageQuery for ApplicationHistoryQuery {
    type Output = Vec<Application>;

    async fn fetch(
        &self,
        docs: &Documents,
        identity: &Identity,
    ) -> Result<Self::Output, ClientError> {
        docs.list_applications_for(&identity.id).await
    }
}

pub type ApplicationHistoryModel = PageModel<ApplicationHistoryQuery>;
