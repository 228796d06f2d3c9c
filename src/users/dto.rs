use serde::{Deserialize, Serialize};

use super::repo_types::User;
use crate::{messages::repo_types::Message, projects::repo_types::Project};

/// Request body for registration. Everything is optional at the JSON level
/// so that missing fields come back as per-field validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub invite_code: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub avatar_url: Option<String>,
    pub promotion: Option<String>,
}

/// Profile fields a user may change on themselves. `email` is deliberately
/// absent, so a client-sent email is dropped during deserialization.
/// A present-but-blank optional field clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    pub name: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
    pub languages: Option<Vec<String>>,
    pub promotion: Option<String>,
}

/// An uploaded avatar image, already read into memory.
#[derive(Debug)]
pub struct AvatarUpload {
    pub body: bytes::Bytes,
    pub content_type: String,
}

/// `GET /users/:id` payload. Messages are only present on the caller's own
/// profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_messages: Option<Vec<Message>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_messages: Option<Vec<Message>>,
}
