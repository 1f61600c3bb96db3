//! Evault API: role-scoped REST endpoints over the evidence store.

pub mod auth;
pub mod handlers;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    routing::{get, post},
    Router,
};
use evault_core::store::EvidenceStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state: the process-wide store behind its write lock.
/// Store operations are short and synchronous, so one mutex serializes
/// every mutation (fulfillment included) without held-across-await locks.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<EvidenceStore>>,
}

impl AppState {
    pub fn new(store: EvidenceStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store, recovering a poisoned lock.
    pub fn store(&self) -> MutexGuard<'_, EvidenceStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/evidence/:evidence_id", get(handlers::get_evidence))
        .route("/api/requests", post(handlers::create_request))
        .route("/api/requests/:request_id", get(handlers::get_request))
        .route(
            "/api/requests/:request_id/items/:item_id/fulfill",
            post(handlers::fulfill_item),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("evault API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
