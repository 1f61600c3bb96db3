//! Binary entrypoint for the evault API server.

use evault_api::{run, AppState};
use evault_core::store::EvidenceStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("evault_api=info,tower_http=debug")),
        )
        .init();

    // Default listen address can be overridden with EVAULT_ADDR
    let addr = std::env::var("EVAULT_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    let state = AppState::new(EvidenceStore::new());
    run(&addr, state).await
}
