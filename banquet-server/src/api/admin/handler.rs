//! Admin User Handlers
//!
//! Account management for the back office. Deactivation is the soft form,
//! and an admin can never deactivate their own account.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{AdminUserCreate, AdminUserResponse};
use crate::db::repository::{AdminUserRepository, strip_table_prefix};
use crate::utils::validation::{validate_email, validate_password};
use crate::utils::{AppError, AppResponse, AppResult, ok_message};

const ADMIN_USER_TABLE: &str = "admin_user";

/// Same account, tolerating bare-key and `table:key` id forms
fn is_same_account(current_id: &str, target_id: &str) -> bool {
    strip_table_prefix(ADMIN_USER_TABLE, current_id)
        == strip_table_prefix(ADMIN_USER_TABLE, target_id)
}

/// GET /api/admin/users - active admins
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AdminUserResponse>>> {
    let repo = AdminUserRepository::new(state.get_db());
    let admins = repo.find_active().await?;
    Ok(Json(admins.into_iter().map(Into::into).collect()))
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AdminUserCreate>,
) -> AppResult<(StatusCode, Json<AdminUserResponse>)> {
    validate_email(&payload.email, "Email")?;
    validate_password(&payload.password)?;

    let repo = AdminUserRepository::new(state.get_db());

    if repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::conflict("Admin with this email already exists"));
    }
    let username = payload
        .username
        .clone()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| {
            payload
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_lowercase()
        });
    if repo.find_by_username(&username).await?.is_some() {
        return Err(AppError::conflict("Username already exists"));
    }

    let admin = repo.create(payload).await?;
    tracing::info!(email = %admin.email, "Admin user created");
    Ok((StatusCode::CREATED, Json(admin.into())))
}

/// DELETE /api/admin/users/:id - soft delete
///
/// Self-deactivation is rejected before any state changes.
pub async fn deactivate(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    if is_same_account(&user.id, &id) {
        return Err(AppError::validation(
            "You cannot deactivate your own admin account",
        ));
    }

    let repo = AdminUserRepository::new(state.get_db());
    let admin = repo.set_active(&id, false).await?;
    tracing::info!(admin_id = %id, email = %admin.email, by = %user.id, "Admin user deactivated");
    Ok(ok_message("Admin user deactivated successfully"))
}

/// PUT /api/admin/users/:id/activate
pub async fn activate(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AdminUserResponse>> {
    let repo = AdminUserRepository::new(state.get_db());
    let admin = repo.set_active(&id, true).await?;
    tracing::info!(admin_id = %id, email = %admin.email, by = %user.id, "Admin user reactivated");
    Ok(Json(admin.into()))
}
