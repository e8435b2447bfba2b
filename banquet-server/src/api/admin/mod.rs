//! Admin user management API module
//!
//! Mounted under `/api/admin`; requires the admin role on top of the
//! global auth gate.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/users", get(handler::list).post(handler::create))
        .route("/users/{id}", axum::routing::delete(handler::deactivate))
        .route("/users/{id}/activate", put(handler::activate))
        .route_layer(middleware::from_fn(require_admin))
}
