//! JWT Extractor
//!
//! Custom extractor for pulling the authenticated user out of a request.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Extracts [`CurrentUser`] in protected handlers.
///
/// The auth middleware has usually already validated the token and stashed
/// the user in request extensions; the fallback path validates the header
/// directly so handlers keep working when called outside the middleware
/// stack (tests, internal dispatch).
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_from_header)
            .ok_or_else(AppError::unauthorized)?;

        let claims = state
            .get_jwt_service()
            .validate_token(token)
            .map_err(|_| AppError::unauthorized())?;

        let user = CurrentUser::from(claims);
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
