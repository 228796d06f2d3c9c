use axum::async_trait;
use uuid::Uuid;

use super::repo_types::{NewProject, Project, ProjectFilter};
use crate::db::{DbResult, PgStore};

const PROJECT_COLUMNS: &str = "id, title, description, module, github_repo, live_url, images, \
     author_id, promotion, created_at, updated_at";

#[async_trait]
pub trait ProjectRepo: Send + Sync {
    async fn insert_project(&self, new: NewProject) -> DbResult<Project>;
    async fn find_project(&self, id: Uuid) -> DbResult<Option<Project>>;
    /// Newest first.
    async fn list_projects(&self, filter: &ProjectFilter) -> DbResult<Vec<Project>>;
    /// Saves the editable columns; `author_id` and `promotion` are never written.
    async fn update_project(&self, project: &Project) -> DbResult<Project>;
    async fn delete_project(&self, id: Uuid) -> DbResult<bool>;
}

#[async_trait]
impl ProjectRepo for PgStore {
    async fn insert_project(&self, new: NewProject) -> DbResult<Project> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (id, title, description, module, github_repo, live_url,
                                  images, author_id, promotion)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.module)
        .bind(&new.github_repo)
        .bind(&new.live_url)
        .bind(&new.images)
        .bind(new.author_id)
        .bind(&new.promotion)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn find_project(&self, id: Uuid) -> DbResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> DbResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
              FROM projects
             WHERE ($1::smallint IS NULL OR module = $1)
               AND ($2::text IS NULL OR promotion = $2)
               AND ($3::uuid IS NULL OR author_id = $3)
             ORDER BY created_at DESC
            "#
        ))
        .bind(filter.module)
        .bind(&filter.promotion)
        .bind(filter.author)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_project(&self, project: &Project) -> DbResult<Project> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects
               SET title = $2, description = $3, module = $4, github_repo = $5,
                   live_url = $6, images = $7, updated_at = now()
             WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.module)
        .bind(&project.github_repo)
        .bind(&project.live_url)
        .bind(&project.images)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> DbResult<bool> {
        let done = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
