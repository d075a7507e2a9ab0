use axum::{routing::post, Router};

use super::handlers::create_booking;
use crate::app_state::AppState;

pub fn booking_routes() -> Router<AppState> {
    Router::new().route("/", post(create_booking))
}
