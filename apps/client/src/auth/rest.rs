//! REST implementation of [`AuthProvider`] against the hosted identity
//! service. Tokens live in a `tokio::sync::Mutex` for the lifetime of the
//! provider; they are never persisted by this crate.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use crate::auth::{AuthProvider, ProviderKind};
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::Identity;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const CHANGE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Serialize)]
struct CredentialSignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
struct ProviderSignInRequest<'a> {
    provider_id: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    local_id: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct RevokeRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthErrorResponse {
    error: AuthErrorBody,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
struct Tokens {
    id_token: String,
    refresh_token: String,
}

pub struct RestAuthProvider {
    client: Client,
    base_url: String,
    api_key: String,
    tokens: Mutex<Option<Tokens>>,
    changes: broadcast::Sender<Option<Identity>>,
}

impl RestAuthProvider {
    pub fn new(config: &Config) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.auth_base_url.clone(),
            api_key: config.api_key.clone(),
            tokens: Mutex::new(None),
            changes,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1/accounts:{action}?key={}", self.base_url, self.api_key)
    }

    async fn post_sign_in<B: Serialize>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<Identity, ClientError> {
        let response = self
            .client
            .post(self.endpoint(action))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::AuthFailed(auth_error_message(&body)));
        }

        let signed_in: SignInResponse = response
            .json()
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        let identity = Identity {
            id: signed_in.local_id,
            email: signed_in.email,
        };

        *self.tokens.lock().await = Some(Tokens {
            id_token: signed_in.id_token,
            refresh_token: signed_in.refresh_token,
        });
        let _ = self.changes.send(Some(identity.clone()));
        debug!("signed in as {}", identity.id);
        Ok(identity)
    }
}

fn auth_error_message(body: &str) -> String {
    serde_json::from_str::<AuthErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_in_with_provider(&self, kind: ProviderKind) -> Result<Identity, ClientError> {
        self.post_sign_in(
            "signInWithIdp",
            &ProviderSignInRequest {
                provider_id: kind.provider_id(),
                return_secure_token: true,
            },
        )
        .await
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError> {
        self.post_sign_in(
            "signInWithPassword",
            &CredentialSignInRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        // Local tokens are dropped up front; the revoke call is best-effort
        // and its failure is the caller's to swallow.
        let tokens = self.tokens.lock().await.take();
        let _ = self.changes.send(None);

        if let Some(tokens) = tokens {
            let response = self
                .client
                .post(self.endpoint("revokeToken"))
                .json(&RevokeRequest {
                    refresh_token: &tokens.refresh_token,
                })
                .send()
                .await
                .map_err(|e| ClientError::AuthFailed(e.to_string()))?;
            if !response.status().is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!("token revoke rejected: {}", auth_error_message(&body));
            }
        }
        Ok(())
    }

    async fn current_identity(&self) -> Result<Option<Identity>, ClientError> {
        let Some(tokens) = self.tokens.lock().await.clone() else {
            return Ok(None);
        };

        let response = self
            .client
            .post(self.endpoint("lookup"))
            .json(&LookupRequest {
                id_token: &tokens.id_token,
            })
            .send()
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::AuthFailed(auth_error_message(&body)));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        Ok(lookup.users.into_iter().next().map(|u| Identity {
            id: u.local_id,
            email: u.email,
        }))
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<Option<Identity>> {
        self.changes.subscribe()
    }
}
