use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::CreateReviewRequest, repo_types::Review, services::new_review_from};
use crate::{
    auth::{ensure_owner, AuthSession},
    error::AppError,
    extract::{parse_id, JsonBody},
    projects::handlers::find as find_project,
    state::AppState,
};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/:id/reviews", post(create))
        .route("/projects/:id/reviews/:review_id", delete(destroy))
}

#[instrument(skip(state, auth, payload), fields(user_id = %auth.user_id()))]
pub async fn create(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(project_id): Path<String>,
    JsonBody(payload): JsonBody<CreateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    let project = find_project(&state, &project_id).await?;
    let new = new_review_from(payload, auth.user_id(), project.id)?;
    let review = state.store.insert_review(new).await?;
    info!(review_id = %review.id, project_id = %project.id, "review created");
    Ok(Json(review))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id()))]
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((project_id, review_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let project_id = parse_id(&project_id)?;
    let review = state
        .store
        .find_review(parse_id(&review_id)?)
        .await?
        .filter(|r| r.project_id == project_id)
        .ok_or(AppError::NotFound("Review not found"))?;
    ensure_owner(review.author_id, auth.user_id(), "Not your review")?;

    if !state.store.delete_review(review.id).await? {
        return Err(AppError::NotFound("Review not found"));
    }
    info!(review_id = %review.id, "review deleted");
    Ok(StatusCode::NO_CONTENT)
}
