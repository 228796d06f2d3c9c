use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CreateProjectRequest, ListQuery, ProjectChanges, ProjectDetail},
    repo_types::Project,
    services::{apply_changes, build_detail, new_project_from, parse_filter},
};
use crate::{
    auth::{ensure_owner, AuthSession},
    error::AppError,
    extract::{parse_id, JsonBody, QueryParams},
    state::AppState,
};

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list).post(create))
        .route(
            "/projects/:id",
            get(detail).patch(update).delete(destroy),
        )
}

#[instrument(skip(state, auth, payload), fields(user_id = %auth.user_id()))]
pub async fn create(
    State(state): State<AppState>,
    auth: AuthSession,
    JsonBody(payload): JsonBody<CreateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let new = new_project_from(payload, &auth.user)?;
    let project = state.store.insert_project(new).await?;
    info!(project_id = %project.id, "project created");
    Ok(Json(project))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Vec<Project>>, AppError> {
    let filter = parse_filter(query)?;
    let projects = state.store.list_projects(&filter).await?;
    Ok(Json(projects))
}

#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetail>, AppError> {
    let project = find(&state, &id).await?;
    build_detail(&state, project).await.map(Json)
}

#[instrument(skip(state, auth, payload), fields(user_id = %auth.user_id()))]
pub async fn update(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProjectChanges>,
) -> Result<Json<Project>, AppError> {
    let project = find(&state, &id).await?;
    ensure_owner(project.author_id, auth.user_id(), "Not your project")?;

    let updated = apply_changes(&project, payload)?;
    let project = state.store.update_project(&updated).await?;
    info!(project_id = %project.id, "project updated");
    Ok(Json(project))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id()))]
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let project = find(&state, &id).await?;
    ensure_owner(project.author_id, auth.user_id(), "Not your project")?;

    if !state.store.delete_project(project.id).await? {
        return Err(AppError::NotFound("Project not found"));
    }
    info!(project_id = %project.id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find(state: &AppState, raw_id: &str) -> Result<Project, AppError> {
    let id = parse_id(raw_id)?;
    state
        .store
        .find_project(id)
        .await?
        .ok_or(AppError::NotFound("Project not found"))
}
