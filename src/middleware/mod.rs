pub mod auth;
pub mod response;

pub use auth::{require_basic_auth, CurrentUser};
pub use response::{ApiResponse, ApiResult};
