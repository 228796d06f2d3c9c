use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
pub use crate::{
    messages::repo::MessageRepo,
    projects::repo::ProjectRepo,
    reviews::repo::ReviewRepo,
    sessions::repo::SessionRepo,
    users::repo::UserRepo,
};

/// Everything the handlers need from persistence. Implemented by [`PgStore`]
/// and by the in-memory store used in tests.
pub trait Store: UserRepo + SessionRepo + ProjectRepo + ReviewRepo + MessageRepo {}

impl<T> Store for T where T: UserRepo + SessionRepo + ProjectRepo + ReviewRepo + MessageRepo {}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("unique constraint violated")]
    Conflict,
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e.as_database_error() {
            Some(db) if db.is_unique_violation() => DbError::Conflict,
            _ => DbError::Sqlx(e),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) {
        if let Err(e) = sqlx::migrate!("./migrations").run(&self.pool).await {
            tracing::warn!(
                error = %e,
                "migrations folder not found or migration failed; continuing"
            );
        }
    }

    /// Empties every table. Used by the seed binary only.
    pub async fn wipe(&self) -> DbResult<()> {
        sqlx::query("TRUNCATE messages, reviews, projects, sessions, users CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}
