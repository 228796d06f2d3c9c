use std::collections::BTreeMap;

use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::db::DbError;

/// Per-field validation failures, keyed by the public (camelCase) field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Resource already exist")]
    Conflict,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Unauthorized("unauthorized")
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fails with `Validation` when any field error was collected.
    pub fn check(errors: FieldErrors) -> Result<(), AppError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(errors) => {
                warn!(?errors, "validation failed");
                json!({ "message": self.to_string(), "errors": errors })
            }
            AppError::Internal(e) => {
                error!(error = ?e, "unhandled error");
                json!({ "message": "Internal server error" })
            }
            _ => json!({ "message": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict => AppError::Conflict,
            DbError::Sqlx(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_lists_each_field() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "invalid format".into());
        errors.insert("rating", "must be between 1 and 5".into());

        let res = AppError::Validation(errors).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["errors"]["email"], "invalid format");
        assert_eq!(body["errors"]["rating"], "must be between 1 and 5");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let res =
            AppError::Internal(anyhow::anyhow!("connection refused to 10.0.0.3")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("Not your project").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("Resource not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::from(DbError::Conflict).status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn query_rejection_is_json() {
        use axum::extract::{FromRequestParts, Query};

        let (mut parts, _) = axum::http::Request::builder()
            .uri("/projects?module=1&module=2")
            .body(())
            .unwrap()
            .into_parts();
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Filter {
            module: Option<String>,
        }

        let rejection = Query::<Filter>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        let res = AppError::from(rejection).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert!(body["message"].as_str().unwrap().contains("duplicate field"));
    }

    #[test]
    fn check_passes_when_empty() {
        assert!(AppError::check(FieldErrors::new()).is_ok());
    }
}
