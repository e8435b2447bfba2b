//! API route modules
//!
//! One module per resource: `mod.rs` declares the router, `handler.rs` the
//! request handlers.
//!
//! - [`health`] - health check (public)
//! - [`auth`] - login / session endpoints
//! - [`admin`] - admin user management (`/api/admin`, admin role required)
//! - [`events`] - events, sub-events and PDF generation
//! - [`menu_items`] - menu catalog
//! - [`contacts`] - contact-form leads

pub mod admin;
pub mod auth;
pub mod contacts;
pub mod events;
pub mod health;
pub mod menu_items;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
