use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::header,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{RegisterRequest, UserChanges, UserProfile},
    repo_types::User,
    services::{apply_changes, discard_avatar, new_user_from, read_multipart, upload_avatar},
};
use crate::{
    auth::AuthSession,
    error::AppError,
    extract::{resolve_user_id, JsonBody},
    projects::repo_types::ProjectFilter,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/me", get(get_me).patch(update_me))
        .route("/users/:id", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<Json<User>, AppError> {
    if !state.config.accepts_invite(payload.invite_code.as_deref()) {
        warn!("registration with invalid invite code");
        return Err(AppError::BadRequest("invalid invite code".into()));
    }

    let new = new_user_from(payload)?;
    let user = state.store.insert_user(new).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(user))
}

/// Accepts either a JSON body or a multipart form carrying an `avatar` file.
#[instrument(skip(state, auth, req), fields(user_id = %auth.user_id()))]
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthSession,
    req: Request,
) -> Result<Json<User>, AppError> {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let (changes, avatar) = if is_multipart {
        let mp = Multipart::from_request(req, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        read_multipart(mp).await?
    } else {
        let JsonBody(changes) = JsonBody::<UserChanges>::from_request(req, &state).await?;
        (changes, None)
    };

    let mut updated = apply_changes(&auth.user, changes)?;
    let mut replaced_key = None;
    if let Some(avatar) = avatar {
        let stored = upload_avatar(&state, &auth.user, avatar).await?;
        updated.avatar_url = Some(stored.url);
        replaced_key = stored.replaced_key;
    }

    let user = state.store.update_user(&updated).await?;
    if let Some(key) = replaced_key {
        discard_avatar(&state, &key).await;
    }
    info!("profile updated");
    Ok(Json(user))
}

#[instrument(skip(state, auth), fields(caller = %auth.user_id()))]
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let id = resolve_user_id(&id, auth.user_id())?;
    profile(&state, &auth, id).await.map(Json)
}

/// `/users/me` is a static route, so the alias also needs its own GET.
#[instrument(skip(state, auth), fields(caller = %auth.user_id()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<UserProfile>, AppError> {
    profile(&state, &auth, auth.user_id()).await.map(Json)
}

/// Expands the user's projects, plus both message boxes when the caller is
/// looking at their own profile.
async fn profile(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
) -> Result<UserProfile, AppError> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    let projects = state
        .store
        .list_projects(&ProjectFilter {
            author: Some(user.id),
            ..Default::default()
        })
        .await?;

    let (sent_messages, received_messages) = if user.id == auth.user_id() {
        (
            Some(state.store.list_sent_messages(user.id).await?),
            Some(state.store.list_received_messages(user.id).await?),
        )
    } else {
        (None, None)
    };

    Ok(UserProfile {
        user,
        projects,
        sent_messages,
        received_messages,
    })
}
