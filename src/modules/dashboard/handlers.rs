use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentPrincipal;
use crate::views::dashboard::load_dashboard;
use crate::views::identity::{resolve_profile, Resolution};

/// Resolve the caller's profile, then aggregate their bookings and contact
/// requests. A principal whose profile document has not propagated yet gets
/// a `pending` response, not a 404; the client keeps its loading state and
/// retries.
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> AppResult<Json<Value>> {
    let resolution = resolve_profile(&state.store, principal.id)
        .await
        .map_err(AppError::Retrieval)?;

    // The resolved profile is handed to the aggregator whole; the second
    // query never re-reads auth state, so a principal change mid-request
    // cannot skew the predicate field.
    match resolution {
        Resolution::Pending => Ok(Json(json!({ "status": "pending" }))),
        Resolution::Resolved(profile) => {
            let view = load_dashboard(&state.store, profile)
                .await
                .map_err(AppError::Retrieval)?;
            Ok(Json(json!({ "status": "ready", "dashboard": view })))
        }
    }
}
