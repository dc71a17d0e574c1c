use super::{
    parse_id, render_contact, render_status, server_message, ViewState, UPDATE_CONTACT_FAILED,
    UPDATE_SUCCEEDED,
};
use crate::client::AsyncContactClient;
use crate::domain::ContactField;
use crate::models::Contact;
use crate::validation::{validate_field, NameRule};
use std::sync::Arc;
use tracing::debug;

/// Single-property update form: ID, property name and new value.
pub struct UpdateContactView {
    client: Arc<dyn AsyncContactClient>,
    pub id: String,
    pub property_name: String,
    pub property_value: String,
    pub state: ViewState<Contact>,
    pub success: Option<String>,
}

impl UpdateContactView {
    pub fn new(client: Arc<dyn AsyncContactClient>) -> Self {
        Self {
            client,
            id: String::new(),
            property_name: String::new(),
            property_value: String::new(),
            state: ViewState::default(),
            success: None,
        }
    }

    pub async fn submit(&mut self) {
        self.state.begin();
        self.success = None;

        let id = match parse_id(&self.id) {
            Ok(id) => id,
            Err(message) => {
                self.state.fail(message);
                return;
            }
        };

        let field = match self.property_name.trim().parse::<ContactField>() {
            Ok(field) => field,
            Err(e) => {
                self.state.fail(e.to_string());
                return;
            }
        };
        if let Err(e) = validate_field(field, &self.property_value, NameRule::Relaxed) {
            self.state.fail(e.to_string());
            return;
        }

        match self
            .client
            .update_property(id, field.as_str(), &self.property_value)
            .await
        {
            Ok(updated) => {
                self.state.succeed(updated);
                self.success = Some(UPDATE_SUCCEEDED.to_string());
            }
            Err(e) => {
                debug!(id = %id, error = %e, "Update error");
                self.state.fail(server_message(&e, UPDATE_CONTACT_FAILED));
            }
        }
    }

    pub fn render(&self) -> String {
        if let Some(status) = render_status(&self.state) {
            return status;
        }
        match (&self.success, &self.state.data) {
            (Some(success), Some(contact)) => format!("{}\n{}", success, render_contact(contact)),
            _ => String::new(),
        }
    }
}
