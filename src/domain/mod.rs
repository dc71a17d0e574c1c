//! Domain value objects and types.
//!
//! Type-safe wrappers for contact IDs, names, email addresses, phone numbers
//! and pictures. Each validates at construction time and on deserialization,
//! so an invalid value cannot be represented in a [`crate::models::Contact`].

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod field;
pub mod name;
pub mod phone;
pub mod picture;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use field::ContactField;
pub use name::PersonName;
pub use phone::PhoneNumber;
pub use picture::PictureUrl;
