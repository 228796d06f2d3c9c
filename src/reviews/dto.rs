use serde::Deserialize;
use serde_json::Value;

/// Only `comment` and `rating` are read; author and project come from the
/// session and the path.
#[derive(Debug, Default, Deserialize)]
pub struct CreateReviewRequest {
    pub comment: Option<String>,
    pub rating: Option<Value>,
}
