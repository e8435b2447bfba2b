//! Admin User Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, now_millis, strip_table_prefix};
use crate::db::models::{AdminUser, AdminUserCreate};

const ADMIN_USER_TABLE: &str = "admin_user";

#[derive(Clone)]
pub struct AdminUserRepository {
    base: BaseRepository,
}

impl AdminUserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active admin accounts, newest first
    pub async fn find_active(&self) -> RepoResult<Vec<AdminUser>> {
        let admins: Vec<AdminUser> = self
            .base
            .db()
            .query("SELECT * FROM admin_user WHERE isActive = true ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(admins)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<AdminUser>> {
        let key = strip_table_prefix(ADMIN_USER_TABLE, id);
        let admin: Option<AdminUser> = self.base.db().select((ADMIN_USER_TABLE, key)).await?;
        Ok(admin)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<AdminUser>> {
        let admins: Vec<AdminUser> = self
            .base
            .db()
            .query("SELECT * FROM admin_user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_lowercase()))
            .await?
            .take(0)?;
        Ok(admins.into_iter().next())
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        let admins: Vec<AdminUser> = self
            .base
            .db()
            .query("SELECT * FROM admin_user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?
            .take(0)?;
        Ok(admins.into_iter().next())
    }

    /// Create an admin account. The password is hashed here; the username
    /// defaults to the local part of the email when omitted.
    pub async fn create(&self, data: AdminUserCreate) -> RepoResult<AdminUser> {
        let email = data.email.to_lowercase();
        let username = data
            .username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        let password_hash = AdminUser::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        let now = now_millis();
        let admin = AdminUser {
            id: None,
            username,
            email,
            password_hash,
            role: "admin".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<AdminUser> = self
            .base
            .db()
            .create(ADMIN_USER_TABLE)
            .content(admin)
            .await
            .map_err(duplicate_or_database)?;

        created.ok_or_else(|| RepoError::Database("Failed to create admin user".to_string()))
    }

    /// Flip the active flag (soft delete / reactivate)
    pub async fn set_active(&self, id: &str, is_active: bool) -> RepoResult<AdminUser> {
        let key = strip_table_prefix(ADMIN_USER_TABLE, id).to_string();
        let mut admin = self
            .find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Admin {} not found", id)))?;

        admin.is_active = is_active;
        admin.updated_at = now_millis();
        admin.id = None; // addressed by key; the store re-attaches the id

        let updated: Option<AdminUser> = self
            .base
            .db()
            .update((ADMIN_USER_TABLE, key.as_str()))
            .content(admin)
            .await?;

        updated.ok_or_else(|| RepoError::NotFound(format!("Admin {} not found", id)))
    }
}

/// Unique-index violations come back as plain database errors; keep the
/// conflict semantics by sniffing the message.
fn duplicate_or_database(err: surrealdb::Error) -> RepoError {
    let message = err.to_string();
    if message.contains("already contains") || message.to_lowercase().contains("index") {
        RepoError::Duplicate("Admin with this email or username already exists".to_string())
    } else {
        RepoError::Database(message)
    }
}
