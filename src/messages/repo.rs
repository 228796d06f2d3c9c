use axum::async_trait;
use uuid::Uuid;

use super::repo_types::{Message, NewMessage};
use crate::db::{DbResult, PgStore};

const MESSAGE_COLUMNS: &str = "id, sender_id, receiver_id, subject, body, read, created_at";

#[async_trait]
pub trait MessageRepo: Send + Sync {
    async fn insert_message(&self, new: NewMessage) -> DbResult<Message>;
    async fn find_message(&self, id: Uuid) -> DbResult<Option<Message>>;
    /// Newest first.
    async fn list_sent_messages(&self, sender_id: Uuid) -> DbResult<Vec<Message>>;
    /// Newest first.
    async fn list_received_messages(&self, receiver_id: Uuid) -> DbResult<Vec<Message>>;
    async fn set_message_read(&self, id: Uuid, read: bool) -> DbResult<Option<Message>>;
    async fn delete_message(&self, id: Uuid) -> DbResult<bool>;
}

#[async_trait]
impl MessageRepo for PgStore {
    async fn insert_message(&self, new: NewMessage) -> DbResult<Message> {
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, subject, body, read)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.sender_id)
        .bind(new.receiver_id)
        .bind(&new.subject)
        .bind(&new.body)
        .bind(new.read)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    async fn find_message(&self, id: Uuid) -> DbResult<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    async fn list_sent_messages(&self, sender_id: Uuid) -> DbResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE sender_id = $1 ORDER BY created_at DESC"
        ))
        .bind(sender_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_received_messages(&self, receiver_id: Uuid) -> DbResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE receiver_id = $1 ORDER BY created_at DESC"
        ))
        .bind(receiver_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn set_message_read(&self, id: Uuid, read: bool) -> DbResult<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(&format!(
            "UPDATE messages SET read = $2 WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(read)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    async fn delete_message(&self, id: Uuid) -> DbResult<bool> {
        let done = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
