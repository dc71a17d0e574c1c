//! Data models for contact records.
//!
//! This module contains the stored [`Contact`], the unvalidated
//! [`ContactPayload`] clients submit, and the small result types the
//! repository returns.

pub mod contact;

pub use contact::{Contact, ContactFieldUpdate, ContactPayload, DeleteResult};
