use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Contact/profile sub-record of a resume. Also the payload of the
/// cookie-backed profile cache used to pre-fill forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub occupation: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// A resume document. Only the owning identity may mutate it; the store's
/// security rules enforce `owner_id == session identity` on writes.
///
/// `sections` is freeform per-section data keyed by section id;
/// `section_order` is the explicit display ordering chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub profile: ResumeProfile,
    #[serde(default)]
    pub sections: Value,
    pub template_id: String,
    /// BCP 47 language tag; drives text direction in the preview.
    pub language: String,
    #[serde(default)]
    pub section_order: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
