use axum::async_trait;
use uuid::Uuid;

use super::repo_types::Session;
use crate::db::{DbResult, PgStore};

#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn insert_session(&self, user_id: Uuid) -> DbResult<Session>;
    async fn find_session(&self, id: Uuid) -> DbResult<Option<Session>>;
    /// Returns whether a row was removed.
    async fn delete_session(&self, id: Uuid) -> DbResult<bool>;
}

#[async_trait]
impl SessionRepo for PgStore {
    async fn insert_session(&self, user_id: Uuid) -> DbResult<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id)
            VALUES ($1, $2)
            RETURNING id, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> DbResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, created_at FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn delete_session(&self, id: Uuid) -> DbResult<bool> {
        let done = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
