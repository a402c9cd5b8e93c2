//! # HTTP Server for Receipt Printing
//!
//! JSON endpoints for previewing and printing each document kind.
//!
//! ## Usage
//!
//! ```bash
//! denpyo serve --listen 0.0.0.0:8080 --device /dev/rfcomm0
//! ```
//!
//! | Route | Body | Response |
//! |-------|------|----------|
//! | `GET /api/profiles` | | built-in printer profiles |
//! | `POST /api/receipt/preview` | receipt request | `{"text", "lines", "diagnostics"}` |
//! | `POST /api/receipt/print` | receipt request | `{"success", "diagnostics"}` |
//! | `POST /api/order-slip/{preview,print}` | order slip request | as above |
//! | `POST /api/text/{preview,print}` | `{"text"}` | as above |
//!
//! Failures answer `{"success": false, "error", "kind"}` with 400 for bad
//! requests, 422 for out-of-range configuration and 502 when the printer
//! could not be reached.

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::DenpyoError;
use state::AppState;

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    let app_state = Arc::new(AppState::new(config));

    Router::new()
        .route("/api/profiles", get(handlers::profiles::list))
        // Tax invoice
        .route("/api/receipt/preview", post(handlers::documents::preview_receipt))
        .route("/api/receipt/print", post(handlers::documents::print_receipt))
        // Order slip
        .route(
            "/api/order-slip/preview",
            post(handlers::documents::preview_order_slip),
        )
        .route(
            "/api/order-slip/print",
            post(handlers::documents::print_order_slip),
        )
        // Plain text
        .route("/api/text/preview", post(handlers::documents::preview_text))
        .route("/api/text/print", post(handlers::documents::print_text))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use denpyo::printer::PrinterConfig;
/// use denpyo::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), denpyo::error::DenpyoError> {
/// let config = ServerConfig {
///     device_path: "/dev/rfcomm0".to_string(),
///     listen_addr: "0.0.0.0:8080".to_string(),
///     profile: PrinterConfig::MP_B20,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), DenpyoError> {
    info!(
        listen = %config.listen_addr,
        device = %config.device_path,
        profile = config.profile.id,
        "denpyo HTTP server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            DenpyoError::Configuration(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, router(config))
        .await
        .map_err(|e| DenpyoError::Output(format!("Server error: {}", e)))?;

    Ok(())
}
