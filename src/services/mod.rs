//! Application service layer.
//!
//! Services hold the business rules between the HTTP handlers and the data
//! access layer: validation, the empty-list policy, and the bounded
//! single-property update.

mod contact_service;

pub use contact_service::{ContactService, ContactServiceImpl};
