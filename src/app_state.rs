use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config;
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub env: config::Config,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthProvider>,
        env: config::Config,
    ) -> Self {
        Self { store, auth, env }
    }
}
