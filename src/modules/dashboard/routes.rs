use axum::{routing::get, Router};

use super::handlers::dashboard;
use crate::app_state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}
