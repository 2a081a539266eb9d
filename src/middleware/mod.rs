pub mod account;
pub mod response;

pub use account::{validate_account_middleware, CurrentUser};
pub use response::{ApiResponse, ApiResult};
