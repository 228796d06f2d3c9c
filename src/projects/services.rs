use std::collections::HashMap;

use uuid::Uuid;

use super::dto::{CreateProjectRequest, ListQuery, ProjectChanges, ProjectDetail, ReviewWithAuthor};
use super::repo_types::{NewProject, Project, ProjectFilter};
use crate::{
    error::{AppError, FieldErrors},
    extract::parse_id,
    state::AppState,
    users::repo_types::User,
    validation::{as_int, check_format, clean, int_in_range, is_github_url, require},
};

pub const MAX_IMAGES: usize = 5;

fn clean_images(images: Vec<String>) -> Vec<String> {
    images
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

fn check_project(
    errors: &mut FieldErrors,
    title: &str,
    description: &str,
    github_repo: Option<&str>,
    images: &[String],
) {
    require(errors, "title", title);
    require(errors, "description", description);
    check_format(errors, "githubRepo", github_repo, is_github_url);
    if images.len() > MAX_IMAGES {
        errors.insert(
            "images",
            format!("A project can have a maximum of {MAX_IMAGES} images"),
        );
    }
}

/// Builds the row for a new project. Author and promotion always come from
/// the session user.
pub fn new_project_from(req: CreateProjectRequest, author: &User) -> Result<NewProject, AppError> {
    let title = req.title.unwrap_or_default().trim().to_string();
    let description = req.description.unwrap_or_default().trim().to_string();
    let github_repo = clean(req.github_repo);
    let images = clean_images(req.images);

    let mut errors = FieldErrors::new();
    let module = int_in_range(&mut errors, "module", req.module.as_ref(), 1..=3);
    check_project(&mut errors, &title, &description, github_repo.as_deref(), &images);
    AppError::check(errors)?;

    Ok(NewProject {
        title,
        description,
        module: module.unwrap_or_default(),
        github_repo,
        live_url: clean(req.live_url),
        images,
        author_id: author.id,
        promotion: author.promotion.clone(),
    })
}

/// Copies the allow-listed fields onto a copy of `project` and validates the
/// merged record.
pub fn apply_changes(project: &Project, changes: ProjectChanges) -> Result<Project, AppError> {
    let mut updated = project.clone();
    let mut errors = FieldErrors::new();

    if let Some(title) = changes.title {
        updated.title = title.trim().to_string();
    }
    if let Some(description) = changes.description {
        updated.description = description.trim().to_string();
    }
    if let Some(module) = changes.module {
        if let Some(m) = int_in_range(&mut errors, "module", Some(&module), 1..=3) {
            updated.module = m;
        }
    }
    if changes.github_repo.is_some() {
        updated.github_repo = clean(changes.github_repo);
    }
    if changes.live_url.is_some() {
        updated.live_url = clean(changes.live_url);
    }
    if let Some(images) = changes.images {
        updated.images = clean_images(images);
    }

    check_project(
        &mut errors,
        &updated.title,
        &updated.description,
        updated.github_repo.as_deref(),
        &updated.images,
    );
    AppError::check(errors)?;
    Ok(updated)
}

/// Casts the raw query. Blank values mean "no filter"; values of the wrong
/// type are treated as lookups that match nothing addressable (404).
pub fn parse_filter(query: ListQuery) -> Result<ProjectFilter, AppError> {
    let module = match clean(query.module) {
        Some(raw) => Some(
            as_int(&serde_json::Value::String(raw))
                .and_then(|m| i16::try_from(m).ok())
                .ok_or(AppError::NotFound("Resource not found"))?,
        ),
        None => None,
    };
    let author = match clean(query.author) {
        Some(raw) => Some(parse_id(&raw)?),
        None => None,
    };
    Ok(ProjectFilter {
        module,
        promotion: clean(query.promotion),
        author,
    })
}

/// Expands the project's reviews and each review's author.
pub async fn build_detail(st: &AppState, project: Project) -> Result<ProjectDetail, AppError> {
    let reviews = st.store.list_reviews_for_project(project.id).await?;

    let mut authors: HashMap<Uuid, User> = HashMap::new();
    for review in &reviews {
        if !authors.contains_key(&review.author_id) {
            if let Some(user) = st.store.find_user(review.author_id).await? {
                authors.insert(user.id, user);
            }
        }
    }

    let reviews = reviews
        .into_iter()
        .filter_map(|r| {
            let author = authors.get(&r.author_id)?.clone();
            Some(ReviewWithAuthor {
                id: r.id,
                comment: r.comment,
                rating: r.rating,
                author,
                project: r.project_id,
                created_at: r.created_at,
            })
        })
        .collect();

    Ok(ProjectDetail { project, reviews })
}
