use super::{
    parse_id, render_contact, render_status, server_message, ViewState, DELETE_CONTACT_FAILED,
    FETCH_CONTACTS_FAILED, FETCH_CONTACT_FAILED, UPDATE_CONTACT_FAILED,
};
use crate::client::AsyncContactClient;
use crate::domain::{ContactField, ContactId};
use crate::error::ClientError;
use crate::models::{Contact, ContactPayload};
use crate::validation::{validate_contact, NameRule};
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

/// A row being edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: ContactId,
    pub values: ContactPayload,
}

/// Contact list with inline search, edit and delete.
pub struct AllContactsView {
    client: Arc<dyn AsyncContactClient>,
    pub contacts: ViewState<Vec<Contact>>,
    pub search: ViewState<Contact>,
    pub editing: Option<EditDraft>,
}

impl AllContactsView {
    pub fn new(client: Arc<dyn AsyncContactClient>) -> Self {
        Self {
            client,
            contacts: ViewState::default(),
            search: ViewState::default(),
            editing: None,
        }
    }

    /// Current rows, empty before the first load.
    pub fn rows(&self) -> &[Contact] {
        self.contacts.data.as_deref().unwrap_or(&[])
    }

    /// Fetch the list. The API answers 404 for an empty collection, which is
    /// shown as an empty list.
    pub async fn load(&mut self) {
        self.contacts.begin();

        match self.client.list_contacts().await {
            Ok(contacts) => self.contacts.succeed(contacts),
            Err(ClientError::NotFound) => self.contacts.succeed(Vec::new()),
            Err(e) => {
                debug!(error = %e, "Fetch contacts error");
                self.contacts.fail(FETCH_CONTACTS_FAILED);
            }
        }
    }

    /// Inline search by ID.
    pub async fn search(&mut self, id: &str) {
        self.search.begin();

        let id = match parse_id(id) {
            Ok(id) => id,
            Err(message) => {
                self.search.fail_and_clear(message);
                return;
            }
        };

        match self.client.get_contact(id).await {
            Ok(contact) => self.search.succeed(contact),
            Err(e) => {
                debug!(id = %id, error = %e, "Search contact error");
                self.search.fail_and_clear(FETCH_CONTACT_FAILED);
            }
        }
    }

    /// Open the row with this ID for editing. Returns `false` if it is not
    /// in the list.
    pub fn start_edit(&mut self, id: ContactId) -> bool {
        let Some(contact) = self.rows().iter().find(|c| c.id == Some(id)) else {
            return false;
        };
        self.editing = Some(EditDraft {
            id,
            values: contact.to_payload(),
        });
        true
    }

    /// Mutable access to the open draft.
    pub fn draft_mut(&mut self) -> Option<&mut ContactPayload> {
        self.editing.as_mut().map(|draft| &mut draft.values)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the open draft: validate it, then send one property update per
    /// changed field. The row is replaced once every update succeeded. If any
    /// update is rejected the row is re-read from the API and the draft stays
    /// open.
    pub async fn save_edit(&mut self) {
        let Some(draft) = self.editing.clone() else {
            return;
        };
        let Some(index) = self.rows().iter().position(|c| c.id == Some(draft.id)) else {
            self.editing = None;
            return;
        };
        let original = self.rows()[index].clone();

        self.contacts.begin();

        let mut edited = match validate_contact(&draft.values, NameRule::Relaxed) {
            Ok(contact) => contact,
            Err(e) => {
                self.contacts.fail(e.to_string());
                return;
            }
        };
        edited.id = original.id;
        edited.document_id = original.document_id.clone();
        if edited.picture_url.is_none() {
            edited.picture_url = original.picture_url.clone();
        }

        let changed: Vec<ContactField> = ContactField::ALL
            .iter()
            .copied()
            .filter(|field| {
                // An emptied optional field cannot be unset through an update
                let value = draft
                    .values
                    .field_value(*field)
                    .filter(|v| field.is_required() || !v.is_empty());
                value.is_some() && value != original.field_value(*field)
            })
            .collect();

        if changed.is_empty() {
            self.editing = None;
            self.contacts.loading = false;
            return;
        }

        let id = draft.id;
        let updates = changed.iter().map(|field| {
            let client = self.client.clone();
            let value = draft.values.field_value(*field).unwrap_or_default().to_string();
            let field = *field;
            async move { client.update_property(id, field.as_str(), &value).await }
        });

        let results = join_all(updates).await;
        let Some(err) = results.into_iter().find_map(Result::err) else {
            debug!(id = %id, fields = changed.len(), "Contact updated");
            if let Some(rows) = self.contacts.data.as_mut() {
                rows[index] = edited;
            }
            self.editing = None;
            self.contacts.loading = false;
            return;
        };

        debug!(id = %id, error = %err, "Update error");

        // Updates that went through are saved; show the row as the server now has it
        match self.client.get_contact(id).await {
            Ok(current) => {
                if let Some(rows) = self.contacts.data.as_mut() {
                    rows[index] = current;
                }
            }
            Err(e) => debug!(id = %id, error = %e, "Refetch after failed update"),
        }
        self.contacts.fail(server_message(&err, UPDATE_CONTACT_FAILED));
    }

    /// Delete a row; it is removed from the local list on success.
    pub async fn delete(&mut self, id: ContactId) {
        self.contacts.begin();

        match self.client.delete_contact(id).await {
            Ok(_) => {
                if let Some(rows) = self.contacts.data.as_mut() {
                    rows.retain(|c| c.id != Some(id));
                }
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
                self.contacts.loading = false;
            }
            Err(e) => {
                debug!(id = %id, error = %e, "Delete contact error");
                self.contacts.fail(DELETE_CONTACT_FAILED);
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(status) = render_status(&self.search) {
            out.push_str(&status);
        } else if let Some(found) = &self.search.data {
            out.push_str(&render_contact(found));
            out.push('\n');
        }

        if let Some(status) = render_status(&self.contacts) {
            out.push_str(&status);
            if self.contacts.loading {
                return out;
            }
        }

        out.push_str(&format!(
            "{:<6} {:<15} {:<15} {:<30} {:<14}\n",
            "ID", "FirstName", "LastName", "Email", "Phone"
        ));
        for contact in self.rows() {
            let id = contact.id.map(|id| id.to_string()).unwrap_or_default();
            out.push_str(&format!(
                "{:<6} {:<15} {:<15} {:<30} {:<14}\n",
                id,
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.email.as_str(),
                contact.phone.formatted()
            ));
        }
        if self.rows().is_empty() {
            out.push_str("No contacts\n");
        }
        out
    }
}
