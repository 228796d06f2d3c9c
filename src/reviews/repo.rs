use axum::async_trait;
use uuid::Uuid;

use super::repo_types::{NewReview, Review};
use crate::db::{DbResult, PgStore};

const REVIEW_COLUMNS: &str = "id, comment, rating, author_id, project_id, created_at";

#[async_trait]
pub trait ReviewRepo: Send + Sync {
    async fn insert_review(&self, new: NewReview) -> DbResult<Review>;
    async fn find_review(&self, id: Uuid) -> DbResult<Option<Review>>;
    /// Newest first.
    async fn list_reviews_for_project(&self, project_id: Uuid) -> DbResult<Vec<Review>>;
    async fn delete_review(&self, id: Uuid) -> DbResult<bool>;
}

#[async_trait]
impl ReviewRepo for PgStore {
    async fn insert_review(&self, new: NewReview) -> DbResult<Review> {
        let review = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (id, comment, rating, author_id, project_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.comment)
        .bind(new.rating)
        .bind(new.author_id)
        .bind(new.project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }

    async fn find_review(&self, id: Uuid) -> DbResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(review)
    }

    async fn list_reviews_for_project(&self, project_id: Uuid) -> DbResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE project_id = $1 ORDER BY created_at DESC"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_review(&self, id: Uuid) -> DbResult<bool> {
        let done = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
