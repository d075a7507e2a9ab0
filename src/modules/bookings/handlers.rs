use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentPrincipal;
use crate::models::{Booking, NewBooking};
use crate::modules::idempotency_key;
use crate::store::{collections, Repository};

/// The signed-in caller books a session as the student side; the tutor id
/// comes from the payload and is never checked against the users collection.
/// Bookings start out pending and nothing here moves them past that.
pub async fn create_booking(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    headers: HeaderMap,
    Json(payload): Json<NewBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    payload.validate()?;

    let id = idempotency_key(&headers)?.unwrap_or_else(Uuid::new_v4);
    let booking = payload.into_booking(id, principal.id, OffsetDateTime::now_utc());

    Repository::<Booking>::new(state.store.clone(), collections::BOOKINGS)
        .upsert(id, &booking)
        .await
        .map_err(AppError::Write)?;

    Ok((StatusCode::CREATED, Json(booking)))
}
