//! Client-side data access and session layer for the Hirefolio resume
//! builder and job board.
//!
//! The hosted document store and the hosted auth provider stay external;
//! this crate owns the typed contracts in front of them:
//!
//! - [`session::SessionStore`] — single-writer handle to the current identity,
//!   with a watch-channel notification contract.
//! - [`store::Documents`] — single-purpose query/write operations against the
//!   `jobs`, `resumes`, `saved_jobs` and `applications` collections.
//! - [`viewmodel`] — per-page adapters that wait for a resolved identity,
//!   issue the page's scoped queries and hold view-lifetime state.
//! - [`render`] — resume preview templates (closed variant set, picked by the
//!   stored template identifier).

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod profile_cache;
pub mod render;
pub mod session;
pub mod store;
pub mod viewmodel;

#[cfg(test)]
pub(crate) mod testing;

pub use client::Client;
pub use config::Config;
pub use errors::{ClientError, ErrorKind};
