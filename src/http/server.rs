//! HTTP server setup for `sass-serve`.
//!
//! # Responsibilities
//! - Put the stylesheet middleware in front of a static file server
//! - Wire up request tracing
//! - Serve until Ctrl+C

use axum::{middleware, Router};
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::http::middleware::{sass_middleware, SassMiddleware};

/// Build the application: compiled stylesheets first, static files after.
pub fn build_router(sass: SassMiddleware, static_root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(static_root))
        .layer(middleware::from_fn_with_state(sass, sass_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Run the server, accepting connections on the given listener.
pub async fn run(router: Router, listener: TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
