/**
 * PostgreSQL Store
 *
 * `UserStore` and `ChatStore` over a `PgPool`. Schema lives in
 * `migrations/` and is applied with `PgStore::migrate`.
 *
 * Rows are mapped by hand with `Row::get`; the `role` column is parsed into
 * `Role` and an unknown value is reported as `StoreError::Corrupt`.
 */

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::backend::auth::users::{NewUser, ProfileUpdate, User, UserStore};
use crate::backend::chat::db::{ChatActivity, ChatRecord, ChatStore, MessageTarget, PostedMessage};
use crate::backend::store::StoreError;
use crate::shared::{MessageRecord, Role};

const USER_COLUMNS: &str = "id, username, email, phone, role, password_hash, created_at";
const MESSAGE_COLUMNS: &str = "id, chat_id, sender_id, message, sent_at, is_read";

/// Postgres-backed store
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a bounded connection pool
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a vehicle listing. Listings are managed outside this service;
    /// this exists for seeding and tests.
    pub async fn insert_vehicle(&self, owner_id: i64, title: &str) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO vehicles (user_id, title) VALUES ($1, $2) RETURNING id",
        )
        .bind(owner_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let role: String = row.try_get("role")?;
    let role = role
        .parse::<Role>()
        .map_err(|e| StoreError::Corrupt(e.to_string()))?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        role,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

fn message_from_row(row: &PgRow) -> Result<MessageRecord, StoreError> {
    Ok(MessageRecord {
        id: row.try_get("id")?,
        chat_id: row.try_get("chat_id")?,
        sender_id: row.try_get("sender_id")?,
        message: row.try_get("message")?,
        sent_at: row.try_get("sent_at")?,
        is_read: row.try_get("is_read")?,
    })
}

fn chat_from_row(row: &PgRow) -> Result<ChatRecord, StoreError> {
    Ok(ChatRecord {
        id: row.try_get("id")?,
        vehicle_id: row.try_get("vehicle_id")?,
        buyer_id: row.try_get("buyer_id")?,
        seller_id: row.try_get("seller_id")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (username, email, phone, role, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        user_from_row(&row)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn update_profile(
        &self,
        id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET username = $1, email = $2, phone = $3
            WHERE id = $4
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(user_from_row).collect()
    }

    async fn admin_update_user(
        &self,
        id: i64,
        update: ProfileUpdate,
        role: Role,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET username = $1, email = $2, phone = $3, role = $4
            WHERE id = $5 AND role <> 'admin'
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(role.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn activity_for(&self, viewer_id: i64) -> Result<Vec<ChatActivity>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                c.id AS chat_id, c.vehicle_id, c.created_at,
                v.title AS vehicle_title,
                c.buyer_id, b.username AS buyer_name,
                c.seller_id, s.username AS seller_name,
                lm.message AS last_message,
                lm.sent_at AS last_message_at,
                (SELECT COUNT(*) FROM messages m
                 WHERE m.chat_id = c.id
                   AND m.is_read = FALSE
                   AND m.sender_id <> $1) AS unread_count
            FROM chats c
            JOIN users b ON c.buyer_id = b.id
            JOIN users s ON c.seller_id = s.id
            JOIN vehicles v ON c.vehicle_id = v.id
            LEFT JOIN LATERAL (
                SELECT message, sent_at FROM messages
                WHERE chat_id = c.id
                ORDER BY sent_at DESC, id DESC
                LIMIT 1
            ) lm ON TRUE
            WHERE c.buyer_id = $1 OR c.seller_id = $1
            "#,
        )
        .bind(viewer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ChatActivity, StoreError> {
                Ok(ChatActivity {
                    chat_id: row.try_get("chat_id")?,
                    vehicle_id: row.try_get("vehicle_id")?,
                    vehicle_title: row.try_get("vehicle_title")?,
                    buyer_id: row.try_get("buyer_id")?,
                    buyer_name: row.try_get("buyer_name")?,
                    seller_id: row.try_get("seller_id")?,
                    seller_name: row.try_get("seller_name")?,
                    created_at: row.try_get("created_at")?,
                    last_message: row.try_get("last_message")?,
                    last_message_at: row.try_get("last_message_at")?,
                    unread_count: row.try_get("unread_count")?,
                })
            })
            .collect()
    }

    async fn find_chat(
        &self,
        vehicle_id: i64,
        buyer_id: i64,
        seller_id: i64,
    ) -> Result<Option<ChatRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, vehicle_id, buyer_id, seller_id, created_at
            FROM chats
            WHERE vehicle_id = $1 AND buyer_id = $2 AND seller_id = $3
            "#,
        )
        .bind(vehicle_id)
        .bind(buyer_id)
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(chat_from_row).transpose()
    }

    async fn chat_by_id(&self, chat_id: i64) -> Result<Option<ChatRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, vehicle_id, buyer_id, seller_id, created_at FROM chats WHERE id = $1",
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(chat_from_row).transpose()
    }

    async fn post_message(
        &self,
        sender_id: i64,
        target: MessageTarget,
        body: &str,
    ) -> Result<PostedMessage, StoreError> {
        let mut tx = self.pool.begin().await?;

        let chat_id = match target {
            MessageTarget::Chat(chat_id) => {
                sqlx::query_scalar::<_, i64>("SELECT id FROM chats WHERE id = $1")
                    .bind(chat_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or(StoreError::NotFound("Chat"))?
            }
            MessageTarget::Vehicle(vehicle_id) => {
                let seller_id =
                    sqlx::query_scalar::<_, i64>("SELECT user_id FROM vehicles WHERE id = $1")
                        .bind(vehicle_id)
                        .fetch_optional(&mut *tx)
                        .await?
                        .ok_or(StoreError::NotFound("Vehicle"))?;

                if seller_id == sender_id {
                    return Err(StoreError::Rejected(
                        "Sellers cannot message themselves on their own listings.",
                    ));
                }

                // Reuse the existing chat for this triple or create it
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO chats (vehicle_id, buyer_id, seller_id)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (vehicle_id, buyer_id, seller_id)
                    DO UPDATE SET vehicle_id = EXCLUDED.vehicle_id
                    RETURNING id
                    "#,
                )
                .bind(vehicle_id)
                .bind(sender_id)
                .bind(seller_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO messages (chat_id, sender_id, message)
            VALUES ($1, $2, $3)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(chat_id)
        .bind(sender_id)
        .bind(body)
        .fetch_one(&mut *tx)
        .await?;
        let message = message_from_row(&row)?;

        tx.commit().await?;

        Ok(PostedMessage { chat_id, message })
    }

    async fn messages_in(&self, chat_id: i64) -> Result<Vec<MessageRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = $1 ORDER BY sent_at ASC, id ASC"
        ))
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(message_from_row).collect()
    }

    async fn mark_read(&self, chat_id: i64, viewer_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE chat_id = $1 AND sender_id <> $2 AND is_read = FALSE
            "#,
        )
        .bind(chat_id)
        .bind(viewer_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
