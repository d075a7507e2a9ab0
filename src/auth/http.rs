use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretBox};
use serde_json::json;
use tokio::sync::watch;

use super::{AuthError, AuthProvider, Principal, Session};

/// Client of the hosted auth provider.
///
/// `POST /accounts` and `POST /sessions` return `{principal, token}`;
/// `DELETE /sessions` and `GET /sessions/current` take the bearer token.
/// Provider error kinds arrive as status codes: 409 for an email already in
/// use, 422 for a weak password, 401 for bad credentials.
pub struct HttpAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    events: watch::Sender<Option<Principal>>,
}

impl HttpAuth {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        let (events, _) = watch::channel(None);
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            events,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if !self.api_key.is_empty() {
            builder = builder.header("x-api-key", &self.api_key);
        }
        builder
    }

    async fn open_session(
        &self,
        path: &str,
        email: &str,
        password: &SecretBox<String>,
    ) -> Result<Session, AuthError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(&json!({
                "email": email.to_lowercase(),
                "password": password.expose_secret(),
            }))
            .send()
            .await
            .map_err(transport)?;

        match response.status().as_u16() {
            409 => Err(AuthError::EmailAlreadyInUse),
            422 => Err(AuthError::WeakPassword),
            401 => Err(AuthError::InvalidCredentials),
            status if !response.status().is_success() => Err(AuthError::Provider(format!(
                "unexpected status {}",
                status
            ))),
            _ => {
                let session: Session = response.json().await.map_err(transport)?;
                self.events.send_replace(Some(session.principal.clone()));
                Ok(session)
            }
        }
    }
}

fn transport(err: reqwest::Error) -> AuthError {
    AuthError::Provider(err.to_string())
}

#[async_trait]
impl AuthProvider for HttpAuth {
    async fn create_account(
        &self,
        email: &str,
        password: &SecretBox<String>,
    ) -> Result<Session, AuthError> {
        self.open_session("/accounts", email, password).await
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &SecretBox<String>,
    ) -> Result<Session, AuthError> {
        self.open_session("/sessions", email, password).await
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .request(reqwest::Method::DELETE, "/sessions")
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(AuthError::Provider(format!(
                "unexpected status {}",
                response.status().as_u16()
            )));
        }
        self.events.send_replace(None);
        Ok(())
    }

    async fn current_principal(&self, token: &str) -> Result<Option<Principal>, AuthError> {
        let response = self
            .request(reqwest::Method::GET, "/sessions/current")
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        match response.status().as_u16() {
            404 | 401 => Ok(None),
            status if !response.status().is_success() => Err(AuthError::Provider(format!(
                "unexpected status {}",
                status
            ))),
            _ => {
                let principal: Principal = response.json().await.map_err(transport)?;
                Ok(Some(principal))
            }
        }
    }

    fn on_principal_change(&self) -> watch::Receiver<Option<Principal>> {
        self.events.subscribe()
    }
}
