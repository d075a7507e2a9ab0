mod http;
mod memory;

use async_trait::async_trait;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

pub use http::HttpAuth;
pub use memory::MemoryAuth;

/// The authenticated identity issued by the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
}

/// A signed-in principal plus the opaque session token the provider issued
/// for it. The token identifies the caller on subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub principal: Principal,
    pub token: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email is already in use")]
    EmailAlreadyInUse,

    #[error("password does not meet the provider's strength rules")]
    WeakPassword,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("auth provider failure: {0}")]
    Provider(String),
}

/// Client contract of the hosted auth provider. Credential validation and
/// session issuance happen on the provider's side; this service never sees
/// more than the opaque token and the principal it resolves to.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_account(
        &self,
        email: &str,
        password: &SecretBox<String>,
    ) -> Result<Session, AuthError>;

    async fn sign_in(
        &self,
        email: &str,
        password: &SecretBox<String>,
    ) -> Result<Session, AuthError>;

    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;

    /// Resolve a session token to its principal; `None` when the session
    /// has ended or never existed.
    async fn current_principal(&self, token: &str) -> Result<Option<Principal>, AuthError>;

    /// Principal-change stream. Dropping the receiver unsubscribes.
    fn on_principal_change(&self) -> watch::Receiver<Option<Principal>>;
}
