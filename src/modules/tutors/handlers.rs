use axum::{
    extract::{Query, State},
    Json,
};

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::views::listing::{load_listing, TutorFilter, TutorListing};

/// Tutor browse: `?search=&subject=&city=`, all optional. The response also
/// carries the facet lists the filter controls are populated from.
pub async fn list_tutors(
    State(state): State<AppState>,
    Query(filter): Query<TutorFilter>,
) -> AppResult<Json<TutorListing>> {
    let listing = load_listing(&state.store, &filter)
        .await
        .map_err(AppError::Retrieval)?;
    Ok(Json(listing))
}
