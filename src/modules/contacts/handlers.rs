use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentPrincipal;
use crate::models::{ContactRequest, NewContactRequest};
use crate::modules::idempotency_key;
use crate::store::{collections, Repository};

pub async fn create_contact(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    headers: HeaderMap,
    Json(payload): Json<NewContactRequest>,
) -> AppResult<(StatusCode, Json<ContactRequest>)> {
    payload.validate()?;

    let id = idempotency_key(&headers)?.unwrap_or_else(Uuid::new_v4);
    let request = payload.into_request(id, principal.id, OffsetDateTime::now_utc());

    Repository::<ContactRequest>::new(state.store.clone(), collections::CONTACT_REQUESTS)
        .upsert(id, &request)
        .await
        .map_err(AppError::Write)?;

    Ok((StatusCode::CREATED, Json(request)))
}
