//! Process-wide session store: the single owner of "who is signed in".
//!
//! State flows through a `watch` channel, so late subscribers immediately
//! see the latest known state and every subscriber converges on the same
//! value. The store is written only by the auth-change forwarder task and
//! the explicit sign-in/out operations below.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::auth::{AuthProvider, ProviderKind};
use crate::errors::ClientError;
use crate::models::Identity;

/// Snapshot of the session. `resolving` stays true until the first answer
/// from the auth provider arrives, so views can tell "not signed in" apart
/// from "don't know yet".
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub resolving: bool,
}

impl SessionState {
    fn pending() -> Self {
        SessionState {
            identity: None,
            resolving: true,
        }
    }
}

pub struct SessionStore {
    provider: Arc<dyn AuthProvider>,
    state: Arc<watch::Sender<SessionState>>,
    initialized: AtomicBool,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (state, _) = watch::channel(SessionState::pending());
        SessionStore {
            provider,
            state: Arc::new(state),
            initialized: AtomicBool::new(false),
        }
    }

    /// Attaches the auth-change listener and resolves any restored session.
    /// Idempotent: calling it again is a no-op, so a single external change
    /// never produces duplicate notifications.
    pub fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }

        let provider = self.provider.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            // Subscribe before the initial lookup so a change racing the
            // restore round trip is not lost.
            let mut changes = provider.subscribe_changes();

            let initial = match provider.current_identity().await {
                Ok(identity) => identity,
                Err(e) => {
                    warn!("session restore failed, treating as signed out: {e}");
                    None
                }
            };
            publish(&state, initial);

            loop {
                match changes.recv().await {
                    Ok(identity) => publish(&state, identity),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("auth change stream lagged, skipped {skipped} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    pub async fn sign_in_with_provider(
        &self,
        kind: ProviderKind,
    ) -> Result<Identity, ClientError> {
        // A failed or cancelled flow leaves the current state untouched.
        let identity = self.provider.sign_in_with_provider(kind).await?;
        publish(&self.state, Some(identity.clone()));
        info!("signed in via {:?}", kind);
        Ok(identity)
    }

    pub async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError> {
        let identity = self.provider.sign_in_with_credentials(email, password).await?;
        publish(&self.state, Some(identity.clone()));
        info!("signed in with credentials");
        Ok(identity)
    }

    /// Clears the session. The external call may fail (offline, expired
    /// token); local state is cleared regardless so the UI is never stuck
    /// showing a stale signed-in user.
    pub async fn sign_out(&self) {
        if let Err(e) = self.provider.sign_out().await {
            warn!("sign-out request failed, clearing local session anyway: {e}");
        }
        publish(&self.state, None);
        info!("signed out");
    }

    /// Latest known state; a new receiver always starts from it.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    pub fn is_resolving(&self) -> bool {
        self.state.borrow().resolving
    }
}

/// Single choke point for state writes. `send_if_modified` keeps a repeated
/// value (e.g. the provider echoing a sign-in the store already applied)
/// from waking subscribers twice.
fn publish(state: &watch::Sender<SessionState>, identity: Option<Identity>) {
    state.send_if_modified(|current| {
        let changed = current.resolving || current.identity != identity;
        current.identity = identity;
        current.resolving = false;
        changed
    });
}
