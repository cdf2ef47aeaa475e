//! dajin-server
//!
//! Composition root: builds the store, data services and router, then
//! serves the API.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dajin_backoffice::api::{self, ApiState};
use dajin_backoffice::config::ServerConfig;
use dajin_backoffice::remote::{RemoteConfig, RestClient};
use dajin_backoffice::repository::{LocalStore, SqliteStore};
use dajin_backoffice::{DataManager, HybridApi};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server = ServerConfig::load();
    let remote = RemoteConfig::from_env();

    let store: Arc<dyn LocalStore> = Arc::new(SqliteStore::open(&server.db_path)?);
    info!("local store open at {}", server.db_path.display());

    let manager = DataManager::new(store.clone());
    manager.initialize_sample_data().await?;

    // Drain anything a previous run left in the ledger before serving
    let hybrid = HybridApi::new(store.clone(), &remote);
    match hybrid.replay().await {
        Ok(outcome) if outcome.retained > 0 => {
            warn!(
                "startup replay retained {} pending changes",
                outcome.retained
            );
        }
        Ok(outcome) if outcome.replayed > 0 => {
            info!("startup replay pushed {} pending changes", outcome.replayed);
        }
        Ok(_) => {}
        Err(err) => warn!("startup replay failed: {err}"),
    }

    let state = Arc::new(ApiState {
        orders: RestClient::direct(&remote),
    });
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", server.port)).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
