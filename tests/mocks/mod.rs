#![allow(dead_code)]

mod mock_contact_client;
mod mock_contact_repository;

pub use mock_contact_client::MockContactClient;
pub use mock_contact_repository::MockContactRepository;

use contact_book::models::{Contact, ContactPayload};
use contact_book::validation::{validate_contact, NameRule};

/// A valid contact with the given ID and first name.
pub fn sample_contact(id: i64, first_name: &str) -> Contact {
    let payload = ContactPayload::new(first_name, "Doe", "john@doe.com", "1234567890").with_id(id);
    validate_contact(&payload, NameRule::Strict).unwrap()
}
