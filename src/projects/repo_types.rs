use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Portfolio project. `author_id` is serialized as `author`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub module: i16,
    pub github_repo: Option<String>,
    pub live_url: Option<String>,
    pub images: Vec<String>,
    #[serde(rename = "author")]
    pub author_id: Uuid,
    pub promotion: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub module: i16,
    pub github_repo: Option<String>,
    pub live_url: Option<String>,
    pub images: Vec<String>,
    pub author_id: Uuid,
    pub promotion: Option<String>,
}

/// Equality filters for listing; `None` leaves the column unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub module: Option<i16>,
    pub promotion: Option<String>,
    pub author: Option<Uuid>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.module.map_or(true, |m| project.module == m)
            && self
                .promotion
                .as_deref()
                .map_or(true, |p| project.promotion.as_deref() == Some(p))
            && self.author.map_or(true, |a| project.author_id == a)
    }
}
