//! Authentication Handlers
//!
//! Login, current-user lookup and logout.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::AdminUserResponse;
use crate::db::repository::AdminUserRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_message};

/// Fixed delay applied to every login attempt to blunt timing probes
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUserResponse,
}

/// POST /api/auth/login
///
/// Every failure (unknown email, wrong password, deactivated account)
/// produces the same 401 body.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = AdminUserRepository::new(state.get_db());
    let account = repo.find_by_email(&req.email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) if a.is_active => a,
        Some(_) => {
            tracing::warn!(email = %req.email, "Login rejected - deactivated account");
            return Err(AppError::unauthorized());
        }
        None => {
            tracing::warn!(email = %req.email, "Login rejected - unknown email");
            return Err(AppError::unauthorized());
        }
    };

    let password_valid = account
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(email = %req.email, "Login rejected - invalid credentials");
        return Err(AppError::unauthorized());
    }

    let user_id = account
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &account.username, &account.email, &account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user_id, email = %account.email, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        user: account.into(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AdminUserResponse>> {
    let repo = AdminUserRepository::new(state.get_db());
    let account = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;
    Ok(Json(account.into()))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is a client-side discard that we log for
/// the audit trail.
pub async fn logout(user: CurrentUser) -> Json<AppResponse<()>> {
    tracing::info!(user_id = %user.id, username = %user.username, "Admin logged out");
    ok_message("Logged out")
}
