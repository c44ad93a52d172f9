//! HTTP middleware

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::{api_key_middleware, auth_middleware, AuthenticatedUser};
pub use cors::cors_middleware;
pub use logging::logging_middleware;
