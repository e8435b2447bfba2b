//! Contact Lead Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, now_millis, strip_table_prefix};
use crate::db::models::{ContactCreate, ContactLead, ContactStatus, ContactUpdate};

const CONTACT_TABLE: &str = "contact";

#[derive(Clone)]
pub struct ContactRepository {
    base: BaseRepository,
}

impl ContactRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All leads, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<ContactLead>> {
        let contacts: Vec<ContactLead> = self
            .base
            .db()
            .query("SELECT * FROM contact ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(contacts)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ContactLead>> {
        let key = strip_table_prefix(CONTACT_TABLE, id);
        let contact: Option<ContactLead> = self.base.db().select((CONTACT_TABLE, key)).await?;
        Ok(contact)
    }

    /// Persist a public submission. New leads always start in `new`.
    pub async fn create(&self, data: ContactCreate) -> RepoResult<ContactLead> {
        let now = now_millis();
        let contact = ContactLead {
            id: None,
            name: data.name,
            email: data.email.to_lowercase(),
            phone: data.phone,
            event_type: data.event_type,
            event_date: data.event_date,
            guest_count: data.guest_count,
            message: data.message,
            status: ContactStatus::New,
            response: String::new(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<ContactLead> =
            self.base.db().create(CONTACT_TABLE).content(contact).await?;

        created.ok_or_else(|| RepoError::Database("Failed to create contact".to_string()))
    }

    /// Admin status / response update
    pub async fn update(&self, id: &str, data: ContactUpdate) -> RepoResult<ContactLead> {
        let key = strip_table_prefix(CONTACT_TABLE, id).to_string();
        let mut contact = self
            .find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Contact {} not found", id)))?;

        if let Some(v) = data.status {
            contact.status = v;
        }
        if let Some(v) = data.response {
            contact.response = v;
        }
        contact.updated_at = now_millis();
        contact.id = None; // addressed by key; the store re-attaches the id

        let updated: Option<ContactLead> = self
            .base
            .db()
            .update((CONTACT_TABLE, key.as_str()))
            .content(contact)
            .await?;

        updated.ok_or_else(|| RepoError::NotFound(format!("Contact {} not found", id)))
    }

    /// Hard delete; leads are only removed by explicit admin action
    pub async fn delete(&self, id: &str) -> RepoResult<ContactLead> {
        let key = strip_table_prefix(CONTACT_TABLE, id);
        let deleted: Option<ContactLead> = self.base.db().delete((CONTACT_TABLE, key)).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Contact {} not found", id)))
    }
}
