//! Port to the hosted authentication provider.
//!
//! ARCHITECTURAL RULE: no other module talks to the auth service directly.
//! Everything goes through [`AuthProvider`], and everything that cares about
//! the *current* identity goes through [`crate::session::SessionStore`].

pub mod rest;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::errors::ClientError;
use crate::models::Identity;

pub use rest::RestAuthProvider;

/// The federated sign-in flavors the product offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    Github,
}

impl ProviderKind {
    pub fn provider_id(self) -> &'static str {
        match self {
            ProviderKind::Google => "google.com",
            ProviderKind::Github => "github.com",
        }
    }
}

/// Async port to the external auth service. Held as `Arc<dyn AuthProvider>`
/// by the session store; swapped for a scripted stub in tests.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Runs the interactive federated sign-in flow. Fails with `AuthFailed`
    /// when the user cancels or the provider rejects.
    async fn sign_in_with_provider(&self, kind: ProviderKind) -> Result<Identity, ClientError>;

    /// Exchanges email/password for an identity. Fails with `AuthFailed` on
    /// invalid credentials.
    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError>;

    /// Ends the external session.
    async fn sign_out(&self) -> Result<(), ClientError>;

    /// Resolves the identity of any restored session. `Ok(None)` means
    /// "definitely signed out", which is a perfectly good answer.
    async fn current_identity(&self) -> Result<Option<Identity>, ClientError>;

    /// Stream of externally-initiated identity changes (token expiry,
    /// sign-out on another device). Sign-ins performed through this handle
    /// are also echoed here.
    fn subscribe_changes(&self) -> broadcast::Receiver<Option<Identity>>;
}
