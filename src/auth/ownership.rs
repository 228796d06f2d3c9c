use tracing::warn;
use uuid::Uuid;

use crate::error::AppError;

/// Passes only when the acting user is the recorded owner.
pub fn ensure_owner(owner: Uuid, actor: Uuid, denied: &'static str) -> Result<(), AppError> {
    if owner == actor {
        Ok(())
    } else {
        warn!(%owner, %actor, reason = denied, "forbidden");
        Err(AppError::Forbidden(denied))
    }
}
