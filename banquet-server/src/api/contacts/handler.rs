//! Contact Lead API Handlers
//!
//! The create endpoint is the public contact form; everything else is the
//! admin lead inbox.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{ContactCreate, ContactLead, ContactUpdate};
use crate::db::repository::ContactRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok_message};

/// Validate a public submission before anything is persisted
fn validate_submission(payload: &ContactCreate) -> Result<(), AppError> {
    validate_required_text(&payload.name, "Name", MAX_NAME_LEN)?;
    validate_email(&payload.email, "Email")?;
    validate_required_text(&payload.phone, "Phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.event_type, "Event type", MAX_NAME_LEN)?;
    if payload.message.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("Message is too long"));
    }
    Ok(())
}

/// POST /api/contacts - public submission
///
/// The lead is durably stored first; the operator notification afterwards is
/// best effort and cannot fail the request.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ContactCreate>,
) -> AppResult<(StatusCode, Json<ContactLead>)> {
    validate_submission(&payload)?;

    let repo = ContactRepository::new(state.get_db());
    let contact = repo.create(payload).await?;

    state.notifier.notify_new_lead(&contact).await;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/contacts - all leads, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ContactLead>>> {
    let repo = ContactRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/contacts/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ContactLead>> {
    let repo = ContactRepository::new(state.get_db());
    let contact = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Contact {} not found", id)))?;
    Ok(Json(contact))
}

/// PUT /api/contacts/:id - status / response update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ContactUpdate>,
) -> AppResult<Json<ContactLead>> {
    if let Some(response) = &payload.response
        && response.len() > MAX_NOTE_LEN
    {
        return Err(AppError::validation("Response is too long"));
    }

    let repo = ContactRepository::new(state.get_db());
    let contact = repo.update(&id, payload).await?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/:id - explicit admin removal only
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = ContactRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_message("Contact deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactCreate {
        ContactCreate {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 90000 00000".to_string(),
            event_type: "Wedding".to_string(),
            event_date: String::new(),
            guest_count: "200".to_string(),
            message: "Looking for a quote".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_submission() {
        assert!(validate_submission(&submission()).is_ok());
    }

    #[test]
    fn rejects_malformed_email_before_persistence() {
        let mut payload = submission();
        payload.email = "not-an-email".to_string();
        assert!(validate_submission(&payload).is_err());
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut payload = submission();
        payload.name = String::new();
        assert!(validate_submission(&payload).is_err());

        let mut payload = submission();
        payload.phone = "  ".to_string();
        assert!(validate_submission(&payload).is_err());
    }
}
