use axum::async_trait;
use uuid::Uuid;

use super::repo_types::{NewUser, User};
use crate::db::{DbResult, PgStore};

const USER_COLUMNS: &str = "id, email, password_hash, name, bio, github_url, linkedin_url, \
     location, languages, avatar_url, promotion, created_at, updated_at";

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert_user(&self, new: NewUser) -> DbResult<User>;
    async fn find_user(&self, id: Uuid) -> DbResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>>;
    /// Persists every mutable column of `user` and bumps `updated_at`.
    async fn update_user(&self, user: &User) -> DbResult<User>;
}

#[async_trait]
impl UserRepo for PgStore {
    async fn insert_user(&self, new: NewUser) -> DbResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, bio, github_url, linkedin_url,
                               location, languages, avatar_url, promotion)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.name)
        .bind(&new.bio)
        .bind(&new.github_url)
        .bind(&new.linkedin_url)
        .bind(&new.location)
        .bind(&new.languages)
        .bind(&new.avatar_url)
        .bind(&new.promotion)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> DbResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET password_hash = $2, name = $3, bio = $4, github_url = $5,
                   linkedin_url = $6, location = $7, languages = $8, avatar_url = $9,
                   promotion = $10, updated_at = now()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.bio)
        .bind(&user.github_url)
        .bind(&user.linkedin_url)
        .bind(&user.location)
        .bind(&user.languages)
        .bind(&user.avatar_url)
        .bind(&user.promotion)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
