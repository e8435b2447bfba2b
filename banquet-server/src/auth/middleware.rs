//! Authentication middleware
//!
//! Axum middleware gating the back-office routes behind a bearer token.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::AdminUserRepository;
use crate::utils::AppError;

/// Routes reachable without a token.
///
/// The public marketing site reads the menu and submits the contact form;
/// everything else belongs to the back office.
fn is_public_route(method: &http::Method, path: &str) -> bool {
    if !path.starts_with("/api/") {
        return true;
    }
    if path == "/api/auth/login" {
        return true;
    }
    if method == http::Method::POST && path == "/api/contacts" {
        return true;
    }
    if method == http::Method::GET
        && (path == "/api/menu-items" || path.starts_with("/api/menu-items/"))
    {
        return true;
    }
    false
}

/// Auth middleware: requires a valid token from an active admin.
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// re-checks the admin record is still active, and injects [`CurrentUser`]
/// into request extensions.
///
/// Every failure surfaces as the same 401 body: the caller is never told
/// whether the token was missing, expired, malformed, or the account was
/// deactivated.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = auth_header
        .and_then(JwtService::extract_from_header)
        .ok_or_else(|| {
            tracing::warn!(target: "security", uri = %req.uri(), "auth_missing");
            AppError::unauthorized()
        })?;

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        tracing::warn!(target: "security", error = %e, uri = %req.uri(), "auth_failed");
        AppError::unauthorized()
    })?;

    let user = CurrentUser::from(claims);

    // A token can outlive its account: re-check the record is still active.
    let repo = AdminUserRepository::new(state.get_db());
    let account = repo
        .find_by_id(&user.id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    match account {
        Some(a) if a.is_active => {}
        _ => {
            tracing::warn!(target: "security", user_id = %user.id, "auth_inactive_account");
            return Err(AppError::unauthorized());
        }
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Admin middleware: requires the admin role.
///
/// Applied on top of [`require_auth`] for the `/api/admin` prefix.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            username = %user.username,
            "admin_required"
        );
        return Err(AppError::forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        let get = http::Method::GET;
        let post = http::Method::POST;
        let patch = http::Method::PATCH;

        assert!(is_public_route(&post, "/api/auth/login"));
        assert!(is_public_route(&post, "/api/contacts"));
        assert!(is_public_route(&get, "/api/menu-items"));
        assert!(is_public_route(&get, "/api/menu-items/search"));
        assert!(is_public_route(&get, "/health"));

        assert!(!is_public_route(&get, "/api/contacts"));
        assert!(!is_public_route(&post, "/api/menu-items"));
        assert!(!is_public_route(&patch, "/api/menu-items/bulk-availability"));
        assert!(!is_public_route(&get, "/api/events"));
        assert!(!is_public_route(&get, "/api/events/abc/billing-pdf"));
    }
}
