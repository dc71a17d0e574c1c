//! Contact Book - a contact-management CRUD service and its terminal frontend.
//!
//! The backend persists contacts (first name, last name, email, phone and an
//! optional picture) to a document store and exposes them over a small REST
//! surface. The frontend views call that surface through an HTTP client.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (IDs, names, email, phone, picture, fields)
//! - **models**: Stored contact, inbound payload, delete report
//! - **validation**: Field-level validation with the fixed API messages
//! - **store**: Document store trait with in-memory and SQLite backends
//! - **repositories**: Contact persistence over a document store
//! - **services**: Contact business operations
//! - **server**: axum routes, error responses, graceful shutdown
//! - **client**: HTTP client for the REST surface
//! - **views**: Per-page state containers for the frontend
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod store;
pub mod validation;
pub mod views;

pub use client::{AsyncContactClient, AsyncContactClientImpl, ContactClient};
pub use config::{Config, StoreKind};
pub use error::{ClientError, ConfigError, ContactError, StoreError};
pub use metrics::{Counter, HttpTimer, Metrics, MetricsSummary};
pub use models::{Contact, ContactPayload, DeleteResult};
pub use repositories::{ContactRepository, DocumentContactRepository};
pub use services::{ContactService, ContactServiceImpl};
