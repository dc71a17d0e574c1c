//! HTTP server for the contact book.
//!
//! Exposes the contact service as a small REST surface under `/contact`
//! and runs it until Ctrl+C or SIGTERM.

mod error;
pub mod handlers;

pub use error::ApiError;

use crate::config::Config;
use crate::services::ContactService;
use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
}

impl AppState {
    pub fn new(service: Arc<dyn ContactService>) -> Self {
        Self { service }
    }
}

/// Build the router with CORS and request tracing applied.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/contact",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/contact/:id",
            get(handlers::get_contact)
                .delete(handlers::delete_contact)
                .put(handlers::update_contact_property),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn run_server(config: &Config, service: Arc<dyn ContactService>) -> Result<()> {
    let address = config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    let app = build_router(AppState::new(service.clone()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    let summary = service.metrics().summary();
    info!(
        listed = summary.contacts_listed_total,
        created = summary.contacts_created_total,
        updated = summary.contacts_updated_total,
        deleted = summary.contacts_deleted_total,
        validation_failures = summary.validation_failures_total,
        "Server shut down"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
