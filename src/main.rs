use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutorhub_backend::app;
use tutorhub_backend::app_state::AppState;
use tutorhub_backend::auth::{AuthProvider, HttpAuth, MemoryAuth};
use tutorhub_backend::config::{self, BackendKind};
use tutorhub_backend::store::{DocumentStore, HttpStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv().ok();

    let config = config::init()?;

    let (store, auth): (Arc<dyn DocumentStore>, Arc<dyn AuthProvider>) = match config.backend.kind
    {
        BackendKind::Memory => {
            info!("Using the in-memory backend; data will not survive a restart");
            (Arc::new(MemoryStore::new()), Arc::new(MemoryAuth::new()))
        }
        BackendKind::Hosted => {
            let base_url = config
                .backend
                .base_url
                .clone()
                .context("BACKEND_BASE_URL must be set when BACKEND=hosted")?;
            let api_key = config.backend.api_key.clone().unwrap_or_default();
            (
                Arc::new(HttpStore::new(&base_url, &api_key)?),
                Arc::new(HttpAuth::new(&base_url, &api_key)?),
            )
        }
    };

    let state = AppState::new(store, auth, config.clone());
    let app = app::create_router(state);

    let addr = config.server_addr();
    info!("{} listening on {}", config.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    Ok(())
}
