//! Axum server setup and routing

use crate::routes;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Listener and upload settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    /// Maximum request body size in bytes
    pub body_limit: usize,
}

/// Build the router
pub fn router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/overlay", post(routes::overlay_video))
        .route("/health", get(routes::health_check))
        .with_state(state)
        // Uploads are whole videos, far above axum's 2 MB default
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Start the web server and run until `shutdown` resolves.
///
/// The scratch root is purged once the server has drained.
pub async fn serve(
    state: AppState,
    settings: ServerSettings,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let scratch = state.scratch.clone();
    let app = router(state, settings.body_limit);

    info!("starting vidmark on http://{}", settings.addr);

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped, cleaning up temp files");
    if let Err(e) = scratch.purge() {
        warn!("cleanup failed: {}", e);
    }

    Ok(())
}
