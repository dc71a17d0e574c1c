//! Contact Book server - Main entry point
//!
//! Serves the contact REST API until interrupted.

use anyhow::Result;
use contact_book::repositories::{ContactRepository, DocumentContactRepository};
use contact_book::services::{ContactService, ContactServiceImpl};
use contact_book::{store, Config};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can act as the fallback filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        store = %config.store,
        collection = %config.collection,
        "Starting Contact Book server"
    );

    let document_store = store::open(&config)?;
    let repository =
        Arc::new(DocumentContactRepository::new(document_store)) as Arc<dyn ContactRepository>;
    let service = Arc::new(
        ContactServiceImpl::new(repository)
            .with_empty_list_not_found(config.empty_list_not_found),
    ) as Arc<dyn ContactService>;

    contact_book::server::run_server(&config, service).await?;

    info!("Contact Book server shutdown complete");
    Ok(())
}
