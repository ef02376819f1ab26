use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookmark linking an identity to a job posting.
///
/// The store carries no uniqueness constraint on `(owner_id, job_id)`;
/// callers pre-check with `find_saved_job` before saving, and reads
/// de-duplicate by job id (see `Documents::list_saved_jobs_for`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: String,
    pub owner_id: String,
    pub job_id: String,
    pub saved_at: DateTime<Utc>,
}
