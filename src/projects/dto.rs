use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Project;
use crate::users::repo_types::User;

/// Request body for a new project. Any `author` or `promotion` the client
/// sends is not part of this struct and never reaches the store.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub module: Option<Value>,
    pub github_repo: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Editable project fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub module: Option<Value>,
    pub github_repo: Option<String>,
    pub live_url: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Raw listing query; values are cast in `services::parse_filter`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub module: Option<String>,
    pub promotion: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    pub id: Uuid,
    pub comment: String,
    pub rating: i16,
    pub author: User,
    pub project: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub reviews: Vec<ReviewWithAuthor>,
}
