//! Event API Handlers
//!
//! CRUD over events with embedded sub-events, the sub-event operations
//! (reorder, selection toggle) and the three PDF endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use http::header;
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    Event, EventCreate, EventUpdate, MoveDirection, SelectedItem, move_sub_event as apply_move,
    toggle_selection,
};
use crate::db::repository::{EventRepository, MenuItemRepository};
use crate::documents::{self, DocumentContext, DocumentKind, MenuIndex, assets};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok_message};

/// GET /api/events - all events, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Event>>> {
    let repo = EventRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/events/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Event>> {
    let repo = EventRepository::new(state.get_db());
    let event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;
    Ok(Json(event))
}

/// POST /api/events
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> AppResult<(StatusCode, Json<Event>)> {
    validate_required_text(&payload.event_name, "Event name", MAX_NAME_LEN)?;
    validate_required_text(&payload.client_name, "Client name", MAX_NAME_LEN)?;
    if payload.notes.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("Notes are too long"));
    }

    let repo = EventRepository::new(state.get_db());
    let event = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EventUpdate>,
) -> AppResult<Json<Event>> {
    if let Some(name) = &payload.event_name {
        validate_required_text(name, "Event name", MAX_NAME_LEN)?;
    }
    if let Some(name) = &payload.client_name {
        validate_required_text(name, "Client name", MAX_NAME_LEN)?;
    }

    let repo = EventRepository::new(state.get_db());
    let event = repo.update(&id, payload).await?;
    Ok(Json(event))
}

/// DELETE /api/events/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = EventRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_message("Event deleted successfully"))
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

/// PATCH /api/events/:id/sub-events/:index/move - adjacent position swap
pub async fn move_sub_event(
    State(state): State<ServerState>,
    Path((id, index)): Path<(String, usize)>,
    Json(req): Json<MoveRequest>,
) -> AppResult<Json<Event>> {
    let repo = EventRepository::new(state.get_db());
    let mut event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;

    if !apply_move(&mut event.sub_events, index, req.direction) {
        return Err(AppError::not_found(format!(
            "Sub-event index {} out of range",
            index
        )));
    }

    let event = repo.save(&id, event).await?;
    Ok(Json(event))
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub category: String,
    pub item: SelectedItem,
}

/// PATCH /api/events/:id/sub-events/:index/items/toggle
///
/// Set-like membership toggle: removes the item if present in the
/// category's list, adds it otherwise.
pub async fn toggle_item(
    State(state): State<ServerState>,
    Path((id, index)): Path<(String, usize)>,
    Json(req): Json<ToggleRequest>,
) -> AppResult<Json<Event>> {
    validate_required_text(&req.category, "Category", MAX_NAME_LEN)?;
    validate_required_text(&req.item.id, "Item id", MAX_NAME_LEN)?;

    let repo = EventRepository::new(state.get_db());
    let mut event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;

    let sub_event = event.sub_events.get_mut(index).ok_or_else(|| {
        AppError::not_found(format!("Sub-event index {} out of range", index))
    })?;
    toggle_selection(&mut sub_event.items, &req.category, req.item);

    let event = repo.save(&id, event).await?;
    Ok(Json(event))
}

/// GET /api/events/:id/event-pdf - quotation (with terms appended)
pub async fn quotation_pdf(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    generate_pdf(state, id, DocumentKind::Quotation).await
}

/// GET /api/events/:id/category-pdf - combined category menu
pub async fn category_pdf(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    generate_pdf(state, id, DocumentKind::CategoryMenu).await
}

/// GET /api/events/:id/billing-pdf - tabular invoice
pub async fn billing_pdf(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    generate_pdf(state, id, DocumentKind::Billing).await
}

/// Shared PDF pipeline: load → assemble HTML → rasterize → (terms) → attach
async fn generate_pdf(state: ServerState, id: String, kind: DocumentKind) -> AppResult<Response> {
    let events = EventRepository::new(state.get_db());
    let event = events
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {} not found", id)))?;

    // Billing never consults the catalog; the other two resolve against the
    // full catalog so soft-deleted items still render by id.
    let catalog = if kind == DocumentKind::Billing {
        Vec::new()
    } else {
        MenuItemRepository::new(state.get_db()).find_all().await?
    };
    let index = MenuIndex::new(&catalog);

    let logo = assets::logo_data_uri(&state.config);
    let ctx = DocumentContext {
        branding: &state.config.branding,
        logo_data_uri: &logo,
    };
    let html = documents::build_html(&event, &index, kind, &ctx);

    let mut bytes = state.pdf_renderer.render(html).await?;
    if kind.appends_terms() {
        bytes = crate::pdf::merge::append_terms(bytes, &state.config);
    }

    let filename = kind.filename(&event);
    tracing::info!(event_id = %id, ?kind, filename = %filename, "Generated PDF");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
