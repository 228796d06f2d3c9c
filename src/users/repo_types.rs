use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub name: String,
    pub bio: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
    pub languages: Vec<String>,
    pub avatar_url: Option<String>,
    pub promotion: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated input for a new user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub bio: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
    pub languages: Vec<String>,
    pub avatar_url: Option<String>,
    pub promotion: Option<String>,
}
