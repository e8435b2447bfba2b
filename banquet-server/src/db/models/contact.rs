//! Contact Lead Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub type ContactLeadId = RecordId;

/// Lead status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Converted,
    Declined,
}

/// Inbound contact-form submission
///
/// Created by the public form; only admins mutate status and response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLead {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ContactLeadId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub guest_count: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Public submission payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub guest_count: String,
    #[serde(default)]
    pub message: String,
}

/// Admin update payload (status / response)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub status: Option<ContactStatus>,
    pub response: Option<String>,
}
