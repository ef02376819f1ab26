pub mod application;
pub mod identity;
pub mod job;
pub mod resume;
pub mod saved_job;

pub use application::{Application, ApplicationStatus};
pub use identity::Identity;
pub use job::{Job, Seniority, WorkMode};
pub use resume::{Resume, ResumeProfile};
pub use saved_job::SavedJob;
