use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub comment: String,
    pub rating: i16,
    #[serde(rename = "author")]
    pub author_id: Uuid,
    #[serde(rename = "project")]
    pub project_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub comment: String,
    pub rating: i16,
    pub author_id: Uuid,
    pub project_id: Uuid,
}
