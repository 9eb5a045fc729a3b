//! PostgreSQL store integration tests
//!
//! Run only when `DATABASE_URL` points at a disposable database; otherwise
//! each test returns early. Names are suffixed per run so reruns against the
//! same database do not collide.

use std::time::Duration;

use assert_matches::assert_matches;
use carneeds::backend::auth::{NewUser, ProfileUpdate, UserStore};
use carneeds::backend::chat::{ChatStore, MessageTarget};
use carneeds::backend::store::{PgStore, StoreError};
use carneeds::shared::Role;

async fn connect() -> Option<PgStore> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set, skipping Postgres store test");
            return None;
        }
    };

    let store = PgStore::connect(&url, 2, Duration::from_secs(5))
        .await
        .expect("database reachable");
    store.migrate().await.expect("migrations apply");
    Some(store)
}

fn unique(name: &str) -> String {
    format!("{}_{}", name, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn new_user(username: &str, role: Role) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        phone: "0770000000".to_string(),
        role,
        password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholde".to_string(),
    }
}

#[tokio::test]
async fn test_unique_violation_is_conflict() {
    let Some(store) = connect().await else { return };
    let name = unique("alice");

    store.create_user(new_user(&name, Role::Buyer)).await.unwrap();
    assert_matches!(
        store.create_user(new_user(&name, Role::Buyer)).await,
        Err(StoreError::Conflict(_))
    );

    let found = store
        .user_by_email(&format!("{}@example.com", name))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.role, Role::Buyer);
}

#[tokio::test]
async fn test_admin_update_skips_admins() {
    let Some(store) = connect().await else { return };
    let name = unique("root");
    let admin = store.create_user(new_user(&name, Role::Admin)).await.unwrap();

    let update = ProfileUpdate {
        username: name.clone(),
        email: format!("{}@example.com", name),
        phone: String::new(),
    };
    assert!(store
        .admin_update_user(admin.id, update, Role::Buyer)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_chat_flow() {
    let Some(store) = connect().await else { return };
    let seller = store.create_user(new_user(&unique("sam"), Role::Seller)).await.unwrap();
    let buyer = store.create_user(new_user(&unique("bea"), Role::Buyer)).await.unwrap();
    let vehicle = store.insert_vehicle(seller.id, "Toyota Aqua 2015").await.unwrap();

    assert_matches!(
        store.post_message(seller.id, MessageTarget::Vehicle(vehicle), "me").await,
        Err(StoreError::Rejected(_))
    );

    let first = store
        .post_message(buyer.id, MessageTarget::Vehicle(vehicle), "Hi")
        .await
        .unwrap();
    let second = store
        .post_message(buyer.id, MessageTarget::Vehicle(vehicle), "Still available?")
        .await
        .unwrap();
    assert_eq!(first.chat_id, second.chat_id);

    let activity = store.activity_for(seller.id).await.unwrap();
    let chat = activity.iter().find(|a| a.chat_id == first.chat_id).unwrap();
    assert_eq!(chat.unread_count, 2);
    assert_eq!(chat.last_message.as_deref(), Some("Still available?"));

    assert_eq!(store.messages_in(first.chat_id).await.unwrap().len(), 2);
    assert_eq!(store.mark_read(first.chat_id, seller.id).await.unwrap(), 2);
    assert_eq!(store.mark_read(first.chat_id, seller.id).await.unwrap(), 0);
}
