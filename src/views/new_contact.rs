use super::{parse_id, render_contact, render_status, server_message, ViewState, CREATE_CONTACT_FAILED};
use crate::client::AsyncContactClient;
use crate::models::{Contact, ContactPayload};
use crate::validation::{validate_contact, NameRule};
use std::sync::Arc;
use tracing::debug;

/// Creation form.
pub struct NewContactView {
    client: Arc<dyn AsyncContactClient>,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub picture_url: String,
    pub state: ViewState<Contact>,
}

impl NewContactView {
    pub fn new(client: Arc<dyn AsyncContactClient>) -> Self {
        Self {
            client,
            id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            picture_url: String::new(),
            state: ViewState::default(),
        }
    }

    /// Build the payload from the form, checking it the way the server will.
    fn payload(&self) -> Result<ContactPayload, String> {
        let mut payload = ContactPayload::new(
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        );

        if !self.id.trim().is_empty() {
            payload = payload.with_id(parse_id(&self.id)?.value());
        }
        if !self.picture_url.is_empty() {
            payload = payload.with_picture(self.picture_url.as_str());
        }

        validate_contact(&payload, NameRule::Relaxed).map_err(|e| e.to_string())?;
        Ok(payload)
    }

    /// Validate and submit the form. A created contact ends up in
    /// `state.data`; any problem in `state.error`.
    pub async fn submit(&mut self) {
        self.state.begin();

        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.state.fail(message);
                return;
            }
        };

        match self.client.create_contact(&payload).await {
            Ok(created) => {
                debug!(id = ?created.id, "New contact created");
                self.state.succeed(created);
            }
            Err(e) => {
                debug!(error = %e, "Create contact error");
                self.state.fail(server_message(&e, CREATE_CONTACT_FAILED));
            }
        }
    }

    pub fn render(&self) -> String {
        if let Some(status) = render_status(&self.state) {
            return status;
        }
        match &self.state.data {
            Some(contact) => format!("Contact created\n{}", render_contact(contact)),
            None => String::new(),
        }
    }
}
