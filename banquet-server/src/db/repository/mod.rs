//! Repository Module
//!
//! CRUD operations over the embedded document store. Each table gets its own
//! repository struct built on [`BaseRepository`]; writes that derive fields
//! (event totals, timestamps, sub-event ids) do so here so no caller can
//! bypass them.

pub mod admin_user;
pub mod contact;
pub mod event;
pub mod menu_item;

// Re-exports
pub use admin_user::AdminUserRepository;
pub use contact::ContactRepository;
pub use event::EventRepository;
pub use menu_item::MenuItemRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Strip a `table:` prefix from an id, accepting both `"table:key"` and
/// bare `"key"` forms.
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((t, key)) if t == table => key,
        _ => id,
    }
}

/// Current wall-clock time in unix millis, for record timestamps
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_table_prefix_only() {
        assert_eq!(strip_table_prefix("event", "event:abc"), "abc");
        assert_eq!(strip_table_prefix("event", "abc"), "abc");
        assert_eq!(strip_table_prefix("event", "menu_item:abc"), "menu_item:abc");
    }
}
