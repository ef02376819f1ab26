pub mod backend;
pub mod queries;
pub mod rest;

pub use backend::{Collection, Direction, Document, DocumentBackend, FieldFilter, ListQuery, OrderBy};
pub use queries::Documents;
pub use rest::RestBackend;
