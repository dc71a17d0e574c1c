mod document_contact_repository;
mod traits;

pub use document_contact_repository::DocumentContactRepository;
pub use traits::ContactRepository;
