use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, Method},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use super::cookies;
use crate::{
    error::AppError,
    state::AppState,
    users::repo_types::User,
};

/// Routes reachable without a session: registration and login.
const PUBLIC_ROUTES: [(Method, &str); 2] = [
    (Method::POST, "/api/users"),
    (Method::POST, "/api/sessions"),
];

fn is_public(method: &Method, path: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|(m, p)| m == method && *p == path)
}

/// The caller's session and user, resolved once per request.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: Uuid,
    pub user: User,
}

impl AuthSession {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}

/// Rejects every non-public request that does not carry a live session.
/// A missing cookie, a malformed id, an unknown session and a session whose
/// user is gone all produce the same 401.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let session_id = cookies::session_id(req.headers()).ok_or_else(AppError::unauthorized)?;
    let session = state
        .store
        .find_session(session_id)
        .await?
        .ok_or_else(AppError::unauthorized)?;
    let user = state
        .store
        .find_user(session.user_id)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    debug!(session_id = %session.id, user_id = %user.id, "session resolved");
    req.extensions_mut().insert(AuthSession {
        session_id: session.id,
        user,
    });
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_register_and_login_are_public() {
        assert!(is_public(&Method::POST, "/api/users"));
        assert!(is_public(&Method::POST, "/api/sessions"));
        assert!(!is_public(&Method::DELETE, "/api/sessions"));
        assert!(!is_public(&Method::GET, "/api/users"));
        assert!(!is_public(&Method::POST, "/api/users/me/messages"));
        assert!(!is_public(&Method::POST, "/api/users/"));
    }
}
