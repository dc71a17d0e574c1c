//! Frontend view layer.
//!
//! One state container per page. Each view owns its form fields and a
//! [`ViewState`], talks to the API through an [`AsyncContactClient`] handed
//! to it at construction, and renders itself as plain text for the terminal
//! frontend.
//!
//! [`AsyncContactClient`]: crate::client::AsyncContactClient

mod all_contacts;
mod delete_contact;
mod new_contact;
mod search_contact;
mod update_contact;

pub use all_contacts::AllContactsView;
pub use delete_contact::DeleteContactView;
pub use new_contact::NewContactView;
pub use search_contact::SearchContactView;
pub use update_contact::UpdateContactView;

use crate::domain::ContactId;
use crate::error::ClientError;
use crate::models::Contact;

pub const FETCH_CONTACTS_FAILED: &str = "Error fetching contacts. Please try again.";
pub const CREATE_CONTACT_FAILED: &str = "Error creating contact. Please try again.";
pub const FETCH_CONTACT_FAILED: &str = "Error fetching contact. Please check the ID and try again.";
pub const DELETE_CONTACT_FAILED: &str = "Error deleting contact. Please try again.";
pub const UPDATE_CONTACT_FAILED: &str = "Error updating contact. Please try again.";
pub const ID_NOT_A_NUMBER: &str = "ID must be a number";
pub const UPDATE_SUCCEEDED: &str = "Contact updated successfully!";

/// Data, loading flag and error string of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ViewState<T> {
    /// Mark a request as started and clear the previous error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store a successful response.
    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
    }

    /// Store a failure, keeping any data already shown.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Store a failure and drop the data.
    pub fn fail_and_clear(&mut self, message: impl Into<String>) {
        self.data = None;
        self.fail(message);
    }
}

/// Parse an ID typed into a form.
pub(crate) fn parse_id(input: &str) -> Result<ContactId, &'static str> {
    input.parse::<ContactId>().map_err(|_| ID_NOT_A_NUMBER)
}

/// The server's own messages for a rejected request, otherwise `fallback`.
pub(crate) fn server_message(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::BadRequest(messages) if !messages.is_empty() => messages.join("; "),
        _ => fallback.to_string(),
    }
}

/// Multi-line rendering of one contact.
pub(crate) fn render_contact(contact: &Contact) -> String {
    let mut out = String::new();
    let id = contact.id.map(|id| id.to_string()).unwrap_or_default();
    out.push_str(&format!("ID: {}\n", id));
    out.push_str(&format!("FirstName: {}\n", contact.first_name));
    out.push_str(&format!("LastName: {}\n", contact.last_name));
    out.push_str(&format!("Email: {}\n", contact.email));
    out.push_str(&format!("Phone: {}\n", contact.phone.formatted()));
    if let Some(picture) = &contact.picture_url {
        out.push_str(&format!(
            "Picture: image/{} ({} bytes encoded)\n",
            picture.media_subtype(),
            picture.payload_len()
        ));
    }
    out
}

/// Loading and error lines shared by every view.
pub(crate) fn render_status<T>(state: &ViewState<T>) -> Option<String> {
    if state.loading {
        return Some("Loading...\n".to_string());
    }
    state.error.as_ref().map(|e| format!("Error: {}\n", e))
}
