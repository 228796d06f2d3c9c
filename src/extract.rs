use axum::extract::{FromRequest, FromRequestParts};
use uuid::Uuid;

use crate::error::AppError;

/// `Json<T>` whose rejection goes through [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Same for query strings.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// Ids that fail to parse are treated like ids that match nothing.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Resource not found"))
}

/// Resolves a user path segment, where `me` stands for the caller.
pub fn resolve_user_id(raw: &str, caller: Uuid) -> Result<Uuid, AppError> {
    if raw == "me" {
        Ok(caller)
    } else {
        parse_id(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn me_resolves_to_caller() {
        let caller = Uuid::new_v4();
        assert_eq!(resolve_user_id("me", caller).unwrap(), caller);
    }

    #[test]
    fn malformed_ids_are_not_found() {
        let err = parse_id("64f1c0ffee").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(resolve_user_id("ME", Uuid::new_v4()).is_err());
    }
}
