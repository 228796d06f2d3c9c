use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::LoginRequest;
use crate::{
    auth::{cookies, password::verify_password, AuthSession},
    error::AppError,
    extract::JsonBody,
    state::AppState,
    users::repo_types::User,
};

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/sessions", post(login).delete(logout))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<(HeaderMap, Json<User>), AppError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(AppError::BadRequest("missing email or password".into()));
    };
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("missing email or password".into()));
    }

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        warn!(%email, "login unknown email");
        return Err(AppError::Unauthorized("invalid credentials"));
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("invalid credentials"));
    }

    let session = state.store.insert_session(user.id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cookies::session_cookie(session.id, state.config.cookie_secure)?,
    );

    info!(user_id = %user.id, session_id = %session.id, "session created");
    Ok((headers, Json(user)))
}

#[instrument(skip(state, auth), fields(session_id = %auth.session_id))]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<(StatusCode, HeaderMap), AppError> {
    state.store.delete_session(auth.session_id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookies::expired_session_cookie());

    info!(user_id = %auth.user_id(), "session destroyed");
    Ok((StatusCode::NO_CONTENT, headers))
}
