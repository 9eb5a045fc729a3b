/**
 * In-Memory Store
 *
 * A `UserStore` + `ChatStore` kept in process memory behind one async
 * mutex. Every operation takes the lock once, so each is atomic the same way
 * a single statement or transaction is in `PgStore`.
 *
 * Used by the test suites and when the server starts without
 * `DATABASE_URL`. Data is lost on restart.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::backend::auth::users::{NewUser, ProfileUpdate, User, UserStore};
use crate::backend::chat::db::{ChatActivity, ChatRecord, ChatStore, MessageTarget, PostedMessage};
use crate::backend::store::StoreError;
use crate::shared::{MessageRecord, Role};

#[derive(Debug, Clone)]
struct Vehicle {
    id: i64,
    owner_id: i64,
    title: String,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    vehicles: Vec<Vehicle>,
    chats: Vec<ChatRecord>,
    messages: Vec<MessageRecord>,
}

impl Tables {
    /// Reject a username or email already held by a user other than `except`
    fn check_unique(
        &self,
        username: &str,
        email: &str,
        except: Option<i64>,
    ) -> Result<(), StoreError> {
        for user in self.users.iter().filter(|u| Some(u.id) != except) {
            if user.username == username {
                return Err(StoreError::Conflict("users_username_key".to_string()));
            }
            if user.email == email {
                return Err(StoreError::Conflict("users_email_key".to_string()));
            }
        }
        Ok(())
    }

    fn username(&self, id: i64) -> String {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    fn next_id(len: usize) -> i64 {
        len as i64 + 1
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vehicle listing owned by `owner_id`
    pub async fn insert_vehicle(&self, owner_id: i64, title: &str) -> i64 {
        let mut tables = self.tables.lock().await;
        let id = Tables::next_id(tables.vehicles.len());
        tables.vehicles.push(Vehicle {
            id,
            owner_id,
            title: title.to_string(),
        });
        id
    }

    /// Change a user's role directly. Signup never grants admin, so this is
    /// how admins come to exist outside a database.
    pub async fn set_role(&self, user_id: i64, role: Role) -> bool {
        let mut tables = self.tables.lock().await;
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.role = role;
                true
            }
            None => false,
        }
    }

    /// Force a message's timestamp
    pub async fn set_sent_at(&self, message_id: i64, sent_at: DateTime<Utc>) -> bool {
        let mut tables = self.tables.lock().await;
        match tables.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.sent_at = sent_at;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.check_unique(&user.username, &user.email, None)?;

        let created = User {
            id: Tables::next_id(tables.users.len()),
            username: user.username,
            email: user.email,
            phone: user.phone,
            role: user.role,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.users.iter().any(|u| u.id == id) {
            return Ok(None);
        }
        tables.check_unique(&update.username, &update.email, Some(id))?;

        let user = tables.users.iter_mut().find(|u| u.id == id);
        Ok(user.map(|user| {
            user.username = update.username;
            user.email = update.email;
            user.phone = update.phone;
            user.clone()
        }))
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.lock().await;
        let mut users = tables.users.clone();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn admin_update_user(
        &self,
        id: i64,
        update: ProfileUpdate,
        role: Role,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.users.iter().any(|u| u.id == id && u.role != Role::Admin) {
            return Ok(None);
        }
        tables.check_unique(&update.username, &update.email, Some(id))?;

        let user = tables.users.iter_mut().find(|u| u.id == id);
        Ok(user.map(|user| {
            user.username = update.username;
            user.email = update.email;
            user.phone = update.phone;
            user.role = role;
            user.clone()
        }))
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn activity_for(&self, viewer_id: i64) -> Result<Vec<ChatActivity>, StoreError> {
        let tables = self.tables.lock().await;

        let activity = tables
            .chats
            .iter()
            .filter(|chat| chat.has_participant(viewer_id))
            .map(|chat| {
                let in_chat: Vec<&MessageRecord> = tables
                    .messages
                    .iter()
                    .filter(|m| m.chat_id == chat.id)
                    .collect();
                let last = in_chat.iter().max_by_key(|m| (m.sent_at, m.id));
                let unread_count = in_chat
                    .iter()
                    .filter(|m| !m.is_read && m.sender_id != viewer_id)
                    .count() as i64;
                let vehicle_title = tables
                    .vehicles
                    .iter()
                    .find(|v| v.id == chat.vehicle_id)
                    .map(|v| v.title.clone())
                    .unwrap_or_default();

                ChatActivity {
                    chat_id: chat.id,
                    vehicle_id: chat.vehicle_id,
                    vehicle_title,
                    buyer_id: chat.buyer_id,
                    buyer_name: tables.username(chat.buyer_id),
                    seller_id: chat.seller_id,
                    seller_name: tables.username(chat.seller_id),
                    created_at: chat.created_at,
                    last_message: last.map(|m| m.message.clone()),
                    last_message_at: last.map(|m| m.sent_at),
                    unread_count,
                }
            })
            .collect();

        Ok(activity)
    }

    async fn find_chat(
        &self,
        vehicle_id: i64,
        buyer_id: i64,
        seller_id: i64,
    ) -> Result<Option<ChatRecord>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .chats
            .iter()
            .find(|c| c.vehicle_id == vehicle_id && c.buyer_id == buyer_id && c.seller_id == seller_id)
            .cloned())
    }

    async fn chat_by_id(&self, chat_id: i64) -> Result<Option<ChatRecord>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.chats.iter().find(|c| c.id == chat_id).cloned())
    }

    async fn post_message(
        &self,
        sender_id: i64,
        target: MessageTarget,
        body: &str,
    ) -> Result<PostedMessage, StoreError> {
        let mut tables = self.tables.lock().await;

        let chat_id = match target {
            MessageTarget::Chat(chat_id) => {
                if !tables.chats.iter().any(|c| c.id == chat_id) {
                    return Err(StoreError::NotFound("Chat"));
                }
                chat_id
            }
            MessageTarget::Vehicle(vehicle_id) => {
                let seller_id = tables
                    .vehicles
                    .iter()
                    .find(|v| v.id == vehicle_id)
                    .map(|v| v.owner_id)
                    .ok_or(StoreError::NotFound("Vehicle"))?;

                if seller_id == sender_id {
                    return Err(StoreError::Rejected(
                        "Sellers cannot message themselves on their own listings.",
                    ));
                }

                let existing = tables
                    .chats
                    .iter()
                    .find(|c| {
                        c.vehicle_id == vehicle_id && c.buyer_id == sender_id && c.seller_id == seller_id
                    })
                    .map(|c| c.id);

                match existing {
                    Some(id) => id,
                    None => {
                        let id = Tables::next_id(tables.chats.len());
                        tables.chats.push(ChatRecord {
                            id,
                            vehicle_id,
                            buyer_id: sender_id,
                            seller_id,
                            created_at: Utc::now(),
                        });
                        id
                    }
                }
            }
        };

        let message = MessageRecord {
            id: Tables::next_id(tables.messages.len()),
            chat_id,
            sender_id,
            message: body.to_string(),
            sent_at: Utc::now(),
            is_read: false,
        };
        tables.messages.push(message.clone());

        Ok(PostedMessage { chat_id, message })
    }

    async fn messages_in(&self, chat_id: i64) -> Result<Vec<MessageRecord>, StoreError> {
        let tables = self.tables.lock().await;
        let mut messages: Vec<MessageRecord> = tables
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.sent_at, m.id));
        Ok(messages)
    }

    async fn mark_read(&self, chat_id: i64, viewer_id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let mut marked = 0;
        for message in tables
            .messages
            .iter_mut()
            .filter(|m| m.chat_id == chat_id && m.sender_id != viewer_id && !m.is_read)
        {
            message.is_read = true;
            marked += 1;
        }
        Ok(marked)
    }
}
