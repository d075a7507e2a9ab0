use axum::{routing::get, Router};

use super::handlers::list_tutors;
use crate::app_state::AppState;

pub fn tutor_routes() -> Router<AppState> {
    Router::new().route("/", get(list_tutors))
}
