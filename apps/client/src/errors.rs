use thiserror::Error;

/// Error taxonomy for the data-access and session layer.
///
/// A get-by-id that finds nothing is NOT an error — those operations return
/// `Ok(None)`. `ClientError` is reserved for operations that actually failed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Interactive or credential sign-in was cancelled, rejected or failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// A read or list operation against the document store failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A create or delete against the document store failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The store returned a document that does not match the typed contract.
    #[error("Malformed document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Coarse error kind carried by view states. `Copy + PartialEq` so view
/// states stay cheaply comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Query,
    Write,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::AuthFailed(_) => ErrorKind::Auth,
            ClientError::QueryFailed(_) => ErrorKind::Query,
            ClientError::WriteFailed(_) => ErrorKind::Write,
            // A document we cannot decode is a failed read from the caller's
            // point of view.
            ClientError::Decode(_) => ErrorKind::Query,
        }
    }
}
