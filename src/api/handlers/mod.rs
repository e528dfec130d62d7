//! HTTP request handlers.

pub mod error_handler;
pub mod health_handler;
pub mod user_handler;

pub use error_handler::error_routes;
pub use health_handler::health;
pub use user_handler::user_routes;
