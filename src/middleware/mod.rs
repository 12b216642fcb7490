pub mod auth;
pub mod capability;

pub use auth::{require_auth, CurrentUser};
pub use capability::require_capability;
