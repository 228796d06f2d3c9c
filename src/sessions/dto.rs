use serde::Deserialize;

/// Request body for login. Both fields are optional here so that a missing
/// one is reported as "missing email or password" instead of a JSON error.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
