use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Server-side login record; its id is the `sessionId` cookie value.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}
