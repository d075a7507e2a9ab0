use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Serialize;
use time::OffsetDateTime;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::Principal;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::bearer_token;
use crate::models::{Credentials, NewProfile, Profile};
use crate::store::{collections, Repository};

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub token: String,
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub principal: Principal,
}

/// Create the auth account, then write the profile document under the new
/// principal's id. The role lives on that document and never changes after
/// this point.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<NewProfile>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    payload.validate()?;

    let email = payload.email.to_lowercase();
    let session = state.auth.create_account(&email, &payload.password).await?;

    let profile = payload.into_profile(&session.principal, OffsetDateTime::now_utc())?;
    Repository::<Profile>::new(state.store.clone(), collections::USERS)
        .upsert(session.principal.id, &profile)
        .await
        .map_err(AppError::Write)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            token: session.token,
            profile,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let email = payload.email.to_lowercase();
    let session = state.auth.sign_in(&email, &payload.password).await?;

    Ok(Json(LoginResponse {
        token: session.token,
        principal: session.principal,
    }))
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<StatusCode> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Authentication("missing bearer token".to_string()))?;
    state.auth.sign_out(token).await?;
    Ok(StatusCode::NO_CONTENT)
}
