//! Events API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        // Sub-event operations
        .route(
            "/{id}/sub-events/{index}/move",
            patch(handler::move_sub_event),
        )
        .route(
            "/{id}/sub-events/{index}/items/toggle",
            patch(handler::toggle_item),
        )
        // PDF generation
        .route("/{id}/event-pdf", get(handler::quotation_pdf))
        .route("/{id}/category-pdf", get(handler::category_pdf))
        .route("/{id}/billing-pdf", get(handler::billing_pdf))
}
