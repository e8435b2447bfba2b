//! Event Repository
//!
//! The write path owns the derived fields: sub-event ids are assigned here,
//! and `totalAmount` is recomputed from the sub-events on every save;
//! client-supplied totals never reach the store.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult, now_millis, strip_table_prefix};
use crate::db::models::{Event, EventCreate, EventUpdate, SubEvent, compute_total};

const EVENT_TABLE: &str = "event";

#[derive(Clone)]
pub struct EventRepository {
    base: BaseRepository,
}

impl EventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All events, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Event>> {
        let events: Vec<Event> = self
            .base
            .db()
            .query("SELECT * FROM event ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(events)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Event>> {
        let key = strip_table_prefix(EVENT_TABLE, id);
        let event: Option<Event> = self.base.db().select((EVENT_TABLE, key)).await?;
        Ok(event)
    }

    pub async fn create(&self, data: EventCreate) -> RepoResult<Event> {
        let now = now_millis();
        let mut sub_events = data.sub_events;
        assign_sub_event_ids(&mut sub_events);
        let total_amount = compute_total(&sub_events);

        let event = Event {
            id: None,
            event_name: data.event_name,
            client_name: data.client_name,
            event_date: data.event_date,
            location: data.location,
            contact_info: data.contact_info,
            sub_events,
            notes: data.notes,
            total_amount,
            status: data.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Event> = self.base.db().create(EVENT_TABLE).content(event).await?;

        created.ok_or_else(|| RepoError::Database("Failed to create event".to_string()))
    }

    pub async fn update(&self, id: &str, data: EventUpdate) -> RepoResult<Event> {
        let mut event = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))?;

        if let Some(v) = data.event_name {
            event.event_name = v;
        }
        if let Some(v) = data.client_name {
            event.client_name = v;
        }
        if let Some(v) = data.event_date {
            event.event_date = v;
        }
        if let Some(v) = data.location {
            event.location = v;
        }
        if let Some(v) = data.contact_info {
            event.contact_info = v;
        }
        if let Some(v) = data.sub_events {
            event.sub_events = v;
        }
        if let Some(v) = data.notes {
            event.notes = v;
        }
        if let Some(v) = data.status {
            event.status = v;
        }

        self.save(id, event).await
    }

    /// Persist an already-loaded event after in-place mutation (selection
    /// toggles, sub-event reorders). Derived fields are refreshed here too.
    pub async fn save(&self, id: &str, mut event: Event) -> RepoResult<Event> {
        let key = strip_table_prefix(EVENT_TABLE, id).to_string();

        assign_sub_event_ids(&mut event.sub_events);
        event.total_amount = compute_total(&event.sub_events);
        event.updated_at = now_millis();
        event.id = None; // addressed by key; the store re-attaches the id

        let updated: Option<Event> = self
            .base
            .db()
            .update((EVENT_TABLE, key.as_str()))
            .content(event)
            .await?;

        updated.ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Event> {
        let key = strip_table_prefix(EVENT_TABLE, id);
        let deleted: Option<Event> = self.base.db().delete((EVENT_TABLE, key)).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))
    }
}

/// Give every sub-event a stable id on first save
fn assign_sub_event_ids(sub_events: &mut [SubEvent]) {
    for sub_event in sub_events {
        if sub_event.id.is_none() {
            sub_event.id = Some(Uuid::new_v4().to_string());
        }
    }
}
