pub mod auth;
pub mod request_counter;

pub use auth::{require_auth, AuthUser};
pub use request_counter::count_requests;
