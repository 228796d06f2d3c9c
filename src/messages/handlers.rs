use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{patch, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::{
    dto::{MarkReadRequest, SendMessageRequest},
    repo_types::Message,
    services::new_message_from,
};
use crate::{
    auth::{ensure_owner, AuthSession},
    error::AppError,
    extract::{parse_id, resolve_user_id, JsonBody},
    state::AppState,
};

/// `/users/me/...` is registered explicitly because the static `/users/me`
/// route shadows the `:id` segment for deeper paths.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id/messages", post(send))
        .route("/users/me/messages", post(send_to_me))
        .route(
            "/users/:id/messages/:message_id",
            patch(mark_read).delete(destroy),
        )
        .route(
            "/users/me/messages/:message_id",
            patch(mark_read).delete(destroy),
        )
}

/// Path of a single message. `id` is absent on the `/users/me/...` routes.
#[derive(Debug, Deserialize)]
pub struct MessagePath {
    id: Option<String>,
    message_id: String,
}

impl MessagePath {
    fn user(&self) -> &str {
        self.id.as_deref().unwrap_or("me")
    }
}

#[instrument(skip(state, auth, payload), fields(sender = %auth.user_id()))]
pub async fn send(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(receiver): Path<String>,
    JsonBody(payload): JsonBody<SendMessageRequest>,
) -> Result<Json<Message>, AppError> {
    deliver(&state, &auth, &receiver, payload).await.map(Json)
}

#[instrument(skip(state, auth, payload), fields(sender = %auth.user_id()))]
pub async fn send_to_me(
    State(state): State<AppState>,
    auth: AuthSession,
    JsonBody(payload): JsonBody<SendMessageRequest>,
) -> Result<Json<Message>, AppError> {
    deliver(&state, &auth, "me", payload).await.map(Json)
}

async fn deliver(
    state: &AppState,
    auth: &AuthSession,
    receiver: &str,
    payload: SendMessageRequest,
) -> Result<Message, AppError> {
    let receiver_id = resolve_user_id(receiver, auth.user_id())?;
    let receiver = state
        .store
        .find_user(receiver_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    let new = new_message_from(payload, auth.user_id(), receiver.id)?;
    let message = state.store.insert_message(new).await?;
    info!(message_id = %message.id, receiver = %receiver.id, "message sent");
    Ok(message)
}

#[instrument(skip(state, auth, payload), fields(user_id = %auth.user_id()))]
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(path): Path<MessagePath>,
    JsonBody(payload): JsonBody<MarkReadRequest>,
) -> Result<Json<Message>, AppError> {
    let message = find_received(&state, &auth, &path).await?;
    ensure_owner(message.receiver_id, auth.user_id(), "Not your message")?;

    let read = payload.read.unwrap_or(true);
    let message = state
        .store
        .set_message_read(message.id, read)
        .await?
        .ok_or(AppError::NotFound("Message not found"))?;
    info!(message_id = %message.id, read, "message read flag set");
    Ok(Json(message))
}

/// Only unread messages can be deleted; a read one is reported missing.
#[instrument(skip(state, auth), fields(user_id = %auth.user_id()))]
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(path): Path<MessagePath>,
) -> Result<StatusCode, AppError> {
    let message = find_received(&state, &auth, &path).await?;
    ensure_owner(message.receiver_id, auth.user_id(), "Not your message")?;
    if message.read {
        return Err(AppError::NotFound("Message not found"));
    }

    if !state.store.delete_message(message.id).await? {
        return Err(AppError::NotFound("Message not found"));
    }
    info!(message_id = %message.id, "message deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// A message addressed under a user other than its receiver does not exist.
async fn find_received(
    state: &AppState,
    auth: &AuthSession,
    path: &MessagePath,
) -> Result<Message, AppError> {
    let receiver_id = resolve_user_id(path.user(), auth.user_id())?;
    state
        .store
        .find_message(parse_id(&path.message_id)?)
        .await?
        .filter(|m| m.receiver_id == receiver_id)
        .ok_or(AppError::NotFound("Message not found"))
}
