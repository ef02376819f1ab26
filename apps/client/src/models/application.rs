use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application lifecycle as driven by the employer side. This client only
/// ever writes the initial `Applied` state and reads whatever is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    InReview,
    Viewed,
    Rejected,
    Accepted,
}

/// A submitted job application. Never deleted by this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub applicant_id: String,
    pub resume_id: String,
    pub cover_letter_id: Option<String>,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
