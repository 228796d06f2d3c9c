pub mod cookies;
pub mod middleware;
pub mod ownership;
pub mod password;

pub use middleware::{require_session, AuthSession};
pub use ownership::ensure_owner;
