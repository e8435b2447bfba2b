//! Integration tests against the embedded database
//!
//! Covers the write-path invariants (derived totals, soft deletes, lead
//! status) and the end-to-end billing property: the grand total printed on
//! the invoice equals the persisted event total.

use banquet_server::core::Branding;
use banquet_server::db::DbService;
use banquet_server::db::models::{
    AdminUserCreate, ContactCreate, ContactStatus, EventCreate, EventUpdate, MenuItemCreate,
    SubEvent,
};
use banquet_server::db::repository::{
    AdminUserRepository, ContactRepository, EventRepository, MenuItemRepository,
};
use banquet_server::documents::{self, DocumentContext, DocumentKind, MenuIndex, Selection};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn open_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let service = DbService::new(tmp.path()).await.expect("open database");
    (tmp, service.db)
}

fn sub_event(name: &str, pax: &str, price: &str) -> SubEvent {
    SubEvent {
        id: None,
        name: name.to_string(),
        date: "2025-11-02".to_string(),
        pax: pax.to_string(),
        price: price.to_string(),
        items: Default::default(),
        notes: String::new(),
    }
}

fn event_create(sub_events: Vec<SubEvent>) -> EventCreate {
    serde_json::from_value(serde_json::json!({
        "eventName": "Mehta Wedding",
        "clientName": "Mehta family",
        "eventDate": "2025-11-02",
        "location": "Junagadh",
        "contactInfo": "+91 90000 00000",
        "subEvents": serde_json::to_value(&sub_events).unwrap(),
        // Deliberately bogus: the server must ignore client-supplied totals
        "totalAmount": 999999.0
    }))
    .expect("event payload")
}

#[tokio::test]
async fn total_amount_is_recomputed_on_every_write() {
    let (_tmp, db) = open_db().await;
    let repo = EventRepository::new(db);

    let created = repo
        .create(event_create(vec![
            sub_event("Reception Dinner", "50", "200"),
            sub_event("Breakfast", "30", "150"),
        ]))
        .await
        .expect("create event");

    assert_eq!(created.total_amount, 14500.0);
    assert!(created.sub_events.iter().all(|s| s.id.is_some()));

    let id = created.id.as_ref().expect("id").to_string();
    let updated = repo
        .update(
            &id,
            EventUpdate {
                event_name: None,
                client_name: None,
                event_date: None,
                location: None,
                contact_info: None,
                sub_events: Some(vec![sub_event("Lunch", "10", "100")]),
                notes: None,
                status: None,
            },
        )
        .await
        .expect("update event");

    assert_eq!(updated.total_amount, 1000.0);

    let reloaded = repo.find_by_id(&id).await.expect("query").expect("exists");
    assert_eq!(reloaded.total_amount, 1000.0);
}

#[tokio::test]
async fn billing_document_matches_persisted_total() {
    let (_tmp, db) = open_db().await;
    let repo = EventRepository::new(db);

    let event = repo
        .create(event_create(vec![
            sub_event("Reception Dinner", "50", "200"),
            sub_event("Breakfast", "30", "150"),
        ]))
        .await
        .expect("create event");
    assert_eq!(event.total_amount, 14500.0);

    let branding = Branding {
        company_name: "Banquet Caterers".to_string(),
        tagline: "Professional Catering Services".to_string(),
        phones: Vec::new(),
    };
    let ctx = DocumentContext {
        branding: &branding,
        logo_data_uri: "data:,",
    };
    let catalog = Vec::new();
    let index = MenuIndex::new(&catalog);
    let html = documents::build_html(&event, &index, DocumentKind::Billing, &ctx);

    assert!(html.contains("&#8377; 14500.00</span>"));
}

#[tokio::test]
async fn soft_deleted_items_leave_listings_but_still_resolve() {
    let (_tmp, db) = open_db().await;
    let repo = MenuItemRepository::new(db);

    let item = repo
        .create(MenuItemCreate {
            category: "starters".to_string(),
            category_name: Some("Starters".to_string()),
            category_name_gujarati: None,
            name: "Paneer Tikka".to_string(),
            name_gujarati: None,
            description: None,
            original_id: None,
            price: Some(180.0),
            is_veg: Some(true),
            tags: None,
        })
        .await
        .expect("create item");

    let id = item.id.as_ref().expect("id").to_string();
    repo.soft_delete(&id).await.expect("soft delete");

    let available = repo.find_available().await.expect("available");
    assert!(available.iter().all(|i| i.name != "Paneer Tikka"));

    // A retained event reference must still resolve during assembly
    let catalog = repo.find_all().await.expect("all items");
    let index = MenuIndex::new(&catalog);
    let resolved = Selection::classify(&banquet_server::db::models::SelectedItem::new(id.clone()))
        .resolve(&index);
    assert_eq!(resolved.name, "Paneer Tikka");
}

#[tokio::test]
async fn bulk_availability_applies_to_exactly_the_given_set() {
    let (_tmp, db) = open_db().await;
    let repo = MenuItemRepository::new(db);

    let mut ids = Vec::new();
    for name in ["Dal", "Rice", "Roti"] {
        let item = repo
            .create(MenuItemCreate {
                category: "mains".to_string(),
                category_name: None,
                category_name_gujarati: None,
                name: name.to_string(),
                name_gujarati: None,
                description: None,
                original_id: None,
                price: None,
                is_veg: None,
                tags: None,
            })
            .await
            .expect("create item");
        ids.push(item.id.unwrap().to_string());
    }

    let modified = repo
        .set_availability(&ids[..2], false)
        .await
        .expect("bulk update");
    assert_eq!(modified, 2);

    let available = repo.find_available().await.expect("available");
    let names: Vec<_> = available.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Roti"]);
}

#[tokio::test]
async fn contact_submission_persists_as_new() {
    let (_tmp, db) = open_db().await;
    let repo = ContactRepository::new(db);

    let lead = repo
        .create(ContactCreate {
            name: "Asha".to_string(),
            email: "Asha@Example.com".to_string(),
            phone: "+91 90000 00000".to_string(),
            event_type: "Wedding".to_string(),
            event_date: "2026-01-15".to_string(),
            guest_count: "200".to_string(),
            message: "Looking for a quote".to_string(),
        })
        .await
        .expect("create lead");

    assert_eq!(lead.status, ContactStatus::New);
    assert_eq!(lead.email, "asha@example.com");

    let all = repo.find_all().await.expect("list leads");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn deactivated_admin_leaves_active_listing() {
    let (_tmp, db) = open_db().await;
    let repo = AdminUserRepository::new(db);

    let admin = repo
        .create(AdminUserCreate {
            email: "owner@example.com".to_string(),
            password: "longenough".to_string(),
            username: None,
        })
        .await
        .expect("create admin");

    assert_eq!(admin.username, "owner");
    assert!(admin.verify_password("longenough").expect("verify"));

    let id = admin.id.as_ref().expect("id").to_string();
    repo.set_active(&id, false).await.expect("deactivate");
    assert!(repo.find_active().await.expect("list").is_empty());

    repo.set_active(&id, true).await.expect("reactivate");
    assert_eq!(repo.find_active().await.expect("list").len(), 1);
}
