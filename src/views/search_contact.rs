use super::{parse_id, render_contact, render_status, ViewState, FETCH_CONTACT_FAILED};
use crate::client::AsyncContactClient;
use crate::models::Contact;
use std::sync::Arc;
use tracing::debug;

/// Lookup of a single contact by ID.
pub struct SearchContactView {
    client: Arc<dyn AsyncContactClient>,
    pub id: String,
    pub state: ViewState<Contact>,
}

impl SearchContactView {
    pub fn new(client: Arc<dyn AsyncContactClient>) -> Self {
        Self {
            client,
            id: String::new(),
            state: ViewState::default(),
        }
    }

    pub async fn submit(&mut self) {
        self.state.begin();

        let id = match parse_id(&self.id) {
            Ok(id) => id,
            Err(message) => {
                self.state.fail(message);
                return;
            }
        };

        match self.client.get_contact(id).await {
            Ok(contact) => self.state.succeed(contact),
            Err(e) => {
                debug!(id = %id, error = %e, "Search contact error");
                self.state.fail_and_clear(FETCH_CONTACT_FAILED);
            }
        }
    }

    pub fn render(&self) -> String {
        if let Some(status) = render_status(&self.state) {
            return status;
        }
        self.state
            .data
            .as_ref()
            .map(render_contact)
            .unwrap_or_default()
    }
}
