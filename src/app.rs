use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use time::format_description::well_known::Rfc3339;

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        auth::routes::auth_routes, bookings::routes::booking_routes,
        contacts::routes::contact_routes, dashboard::routes::dashboard_routes,
        tutors::routes::tutor_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.env.app.static_dir.to_string();

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/auth", auth_routes())
        .nest("/tutors", tutor_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/bookings", booking_routes())
        .nest("/contacts", contact_routes())
        .nest_service(
            "/static",
            tower_http::services::ServeDir::new(static_dir),
        )
        .layer(middleware::from_fn(observability_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "TutorHub backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let store_status = match state.store.ping().await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Store health check failed: {}", e);
            "unhealthy"
        }
    };

    let timestamp = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "status": "ok",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "store": store_status
        }
    }))
}
