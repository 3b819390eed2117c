use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreConfig};
use service::{InMemoryUserRepository, UserRepository, UserService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::observability;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`); without a file, fall back to environment variables.
/// Both sources are normalized and validated; a file that fails to parse is an error, not a fallback.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

/// Construct the process-wide store and the router that serves it.
pub fn build_app(store: &StoreConfig) -> Router {
    let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::with_capacity(store.initial_capacity));
    let state = AppState::new(UserService::new(repo));
    observability::init_metrics();
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg.store);

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.server.bind_addr())))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!(%addr, initial_capacity = cfg.store.initial_capacity, "starting user store server");
    axum::serve(listener, app).await?;
    Ok(())
}
