//! Menu Item API Handlers
//!
//! Reads are public (the marketing site browses the menu); mutations sit
//! behind the auth gate. Delete is always the soft form.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok_message, ok_with_message};

/// GET /api/menu-items - available items only
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.get_db());
    Ok(Json(repo.find_available().await?))
}

/// GET /api/menu-items/categories
pub async fn categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let repo = MenuItemRepository::new(state.get_db());
    Ok(Json(repo.categories().await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/menu-items/search?q=
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.get_db());
    Ok(Json(repo.search(&params.q).await?))
}

/// GET /api/menu-items/category/:category
pub async fn by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.get_db());
    Ok(Json(repo.find_by_category(&category).await?))
}

/// GET /api/menu-items/:id - resolves soft-deleted items too
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    validate_required_text(&payload.name, "Name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "Category", MAX_NAME_LEN)?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu-items/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "Name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &payload.category {
        validate_required_text(category, "Category", MAX_NAME_LEN)?;
    }

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.soft_delete(&id).await?;
    Ok(ok_message("Menu item deleted successfully"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAvailabilityRequest {
    pub item_ids: Vec<String>,
    pub is_available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAvailabilityResult {
    pub modified_count: usize,
}

/// PATCH /api/menu-items/bulk-availability
///
/// Applies one availability flag to exactly the given set of ids.
pub async fn bulk_availability(
    State(state): State<ServerState>,
    Json(payload): Json<BulkAvailabilityRequest>,
) -> AppResult<Json<AppResponse<BulkAvailabilityResult>>> {
    if payload.item_ids.is_empty() {
        return Err(AppError::validation("itemIds must not be empty"));
    }

    let repo = MenuItemRepository::new(state.get_db());
    let modified_count = repo
        .set_availability(&payload.item_ids, payload.is_available)
        .await?;

    Ok(ok_with_message(
        BulkAvailabilityResult { modified_count },
        format!("Updated {} menu items", modified_count),
    ))
}
