use super::{
    parse_id, render_contact, render_status, ViewState, DELETE_CONTACT_FAILED,
    FETCH_CONTACT_FAILED,
};
use crate::client::AsyncContactClient;
use crate::domain::ContactId;
use crate::models::{Contact, DeleteResult};
use std::sync::Arc;
use tracing::debug;

/// Delete form: fetch the contact by ID, then confirm.
pub struct DeleteContactView {
    client: Arc<dyn AsyncContactClient>,
    pub id: String,
    pub state: ViewState<Contact>,
    pub deleted: Option<DeleteResult>,
    fetched_id: Option<ContactId>,
}

impl DeleteContactView {
    pub fn new(client: Arc<dyn AsyncContactClient>) -> Self {
        Self {
            client,
            id: String::new(),
            state: ViewState::default(),
            deleted: None,
            fetched_id: None,
        }
    }

    /// Load the contact named by the form so it can be confirmed.
    pub async fn fetch(&mut self) {
        self.state.begin();
        self.deleted = None;
        self.fetched_id = None;

        let id = match parse_id(&self.id) {
            Ok(id) => id,
            Err(message) => {
                self.state.fail_and_clear(message);
                return;
            }
        };

        match self.client.get_contact(id).await {
            Ok(contact) => {
                self.fetched_id = Some(id);
                self.state.succeed(contact);
            }
            Err(e) => {
                debug!(id = %id, error = %e, "Fetch before delete failed");
                self.state.fail_and_clear(FETCH_CONTACT_FAILED);
            }
        }
    }

    /// Delete the fetched contact. Does nothing until [`fetch`](Self::fetch)
    /// has succeeded.
    pub async fn confirm(&mut self) {
        let Some(id) = self.fetched_id else {
            return;
        };
        self.state.begin();

        match self.client.delete_contact(id).await {
            Ok(result) => {
                self.deleted = Some(result);
                self.fetched_id = None;
                self.state.data = None;
                self.state.loading = false;
            }
            Err(e) => {
                debug!(id = %id, error = %e, "Delete contact error");
                self.state.fail(DELETE_CONTACT_FAILED);
            }
        }
    }

    /// Drop the fetched contact without deleting it.
    pub fn cancel(&mut self) {
        self.fetched_id = None;
        self.state = ViewState::default();
    }

    pub fn render(&self) -> String {
        if let Some(status) = render_status(&self.state) {
            return status;
        }
        if let Some(result) = &self.deleted {
            return format!("Deleted {} contact(s)\n", result.deleted_count);
        }
        self.state
            .data
            .as_ref()
            .map(|contact| format!("{}Delete this contact?\n", render_contact(contact)))
            .unwrap_or_default()
    }
}
