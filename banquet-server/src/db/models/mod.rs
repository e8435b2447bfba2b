//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod admin_user;

// Catalog and events
pub mod event;
pub mod menu_item;

// Leads
pub mod contact;

// Re-exports
pub use admin_user::{AdminUser, AdminUserCreate, AdminUserId, AdminUserResponse};
pub use contact::{ContactCreate, ContactLead, ContactLeadId, ContactStatus, ContactUpdate};
pub use event::{
    Event, EventCreate, EventId, EventStatus, EventUpdate, MoveDirection, SelectedItem, SubEvent,
    compute_total, move_sub_event, toggle_selection,
};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
