use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretBox};
use sha2::{Digest, Sha256};
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use super::{AuthError, AuthProvider, Principal, Session};

struct Account {
    principal: Principal,
    password_digest: [u8; 32],
}

/// In-process auth provider. Development default and test double; enforces
/// the same six-character minimum the hosted provider signals as
/// `WeakPassword`.
pub struct MemoryAuth {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, Principal>>,
    events: watch::Sender<Option<Principal>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        let (events, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            events,
        }
    }

    async fn open_session(&self, principal: Principal) -> Session {
        let token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), principal.clone());
        self.events.send_replace(Some(principal.clone()));
        Session { principal, token }
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

fn digest(password: &SecretBox<String>) -> [u8; 32] {
    Sha256::digest(password.expose_secret().as_bytes()).into()
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn create_account(
        &self,
        email: &str,
        password: &SecretBox<String>,
    ) -> Result<Session, AuthError> {
        let email = email.to_lowercase();
        if password.expose_secret().chars().count() < 6 {
            return Err(AuthError::WeakPassword);
        }

        let principal = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&email) {
                return Err(AuthError::EmailAlreadyInUse);
            }
            let principal = Principal {
                id: Uuid::new_v4(),
                email: email.clone(),
            };
            accounts.insert(
                email,
                Account {
                    principal: principal.clone(),
                    password_digest: digest(password),
                },
            );
            principal
        };

        Ok(self.open_session(principal).await)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &SecretBox<String>,
    ) -> Result<Session, AuthError> {
        let email = email.to_lowercase();
        let principal = {
            let accounts = self.accounts.read().await;
            let account = accounts.get(&email).ok_or(AuthError::InvalidCredentials)?;
            if account.password_digest != digest(password) {
                return Err(AuthError::InvalidCredentials);
            }
            account.principal.clone()
        };

        Ok(self.open_session(principal).await)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.write().await.remove(token);
        self.events.send_replace(None);
        Ok(())
    }

    async fn current_principal(&self, token: &str) -> Result<Option<Principal>, AuthError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    fn on_principal_change(&self) -> watch::Receiver<Option<Principal>> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(password: &str) -> SecretBox<String> {
        SecretBox::new(Box::new(password.to_string()))
    }

    #[tokio::test]
    async fn signup_then_sign_in_round_trips() {
        let auth = MemoryAuth::new();
        let created = auth
            .create_account("Ann@Example.com", &secret("hunter2x"))
            .await
            .unwrap();
        assert_eq!(created.principal.email, "ann@example.com");

        let session = auth
            .sign_in("ann@example.com", &secret("hunter2x"))
            .await
            .unwrap();
        assert_eq!(session.principal.id, created.principal.id);

        let resolved = auth.current_principal(&session.token).await.unwrap();
        assert_eq!(resolved, Some(session.principal));
    }

    #[tokio::test]
    async fn short_passwords_are_weak() {
        let auth = MemoryAuth::new();
        let err = auth
            .create_account("bo@example.com", &secret("bo"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = MemoryAuth::new();
        auth.create_account("ann@example.com", &secret("hunter2x"))
            .await
            .unwrap();
        let err = auth
            .create_account("ann@example.com", &secret("hunter2x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyInUse));
    }

    #[tokio::test]
    async fn sign_out_ends_the_session_and_notifies_watchers() {
        let auth = MemoryAuth::new();
        let events = auth.on_principal_change();
        assert!(events.borrow().is_none());

        let session = auth
            .create_account("ann@example.com", &secret("hunter2x"))
            .await
            .unwrap();
        assert_eq!(events.borrow().as_ref(), Some(&session.principal));

        auth.sign_out(&session.token).await.unwrap();
        assert!(events.borrow().is_none());
        assert_eq!(auth.current_principal(&session.token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let auth = MemoryAuth::new();
        auth.create_account("ann@example.com", &secret("hunter2x"))
            .await
            .unwrap();
        let err = auth
            .sign_in("ann@example.com", &secret("not-that"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
