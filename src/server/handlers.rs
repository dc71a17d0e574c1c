//! Route handlers for the `/contact` resource.

use super::{ApiError, AppState};
use crate::domain::ContactId;
use crate::models::{Contact, ContactPayload, DeleteResult};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

/// Query string of a single-property update.
#[derive(Debug, Deserialize)]
pub struct UpdatePropertyQuery {
    pub property_name: Option<String>,
    pub property_value: Option<String>,
}

/// `GET /contact`
pub async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.service.list_contacts().await?;
    Ok(Json(contacts))
}

/// `POST /contact`
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(payload) = payload?;
    let created = state.service.create_contact(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /contact/:id`
pub async fn get_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Path(id) = id?;
    debug!(id = %id, "Fetching contact");
    let contact = state.service.get_contact(id).await?;
    Ok(Json(contact))
}

/// `DELETE /contact/:id`
pub async fn delete_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<DeleteResult>, ApiError> {
    let Path(id) = id?;
    let result = state.service.delete_contact(id).await?;
    Ok(Json(result))
}

/// `PUT /contact/:id?property_name=...&property_value=...`
pub async fn update_contact_property(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
    query: Result<Query<UpdatePropertyQuery>, QueryRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;

    let property_name = query
        .property_name
        .ok_or_else(|| ApiError::BadRequest("property_name is required".to_string()))?;
    let property_value = query
        .property_value
        .ok_or_else(|| ApiError::BadRequest("property_value is required".to_string()))?;

    let updated = state
        .service
        .update_contact_property(id, &property_name, &property_value)
        .await?;
    Ok(Json(updated))
}
