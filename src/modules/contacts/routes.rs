use axum::{routing::post, Router};

use super::handlers::create_contact;
use crate::app_state::AppState;

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", post(create_contact))
}
