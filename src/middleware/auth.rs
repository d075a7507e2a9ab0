use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::app_state::AppState;
use crate::auth::Principal;
use crate::error::AppError;

/// The caller's principal, resolved from the bearer token by the auth
/// provider. Rejects with 401 when the token is missing or the session has
/// ended.
pub struct CurrentPrincipal(pub Principal);

pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Authentication("missing bearer token".to_string()))?;

        match state.auth.current_principal(token).await? {
            Some(principal) => Ok(CurrentPrincipal(principal)),
            None => Err(AppError::Authentication(
                "session has ended or never existed".to_string(),
            )),
        }
    }
}
