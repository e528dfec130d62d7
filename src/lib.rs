//! User Registry - user records behind a REST API
//!
//! Users carry a name, a CPF (Brazilian national ID, checksum-validated) and
//! an age. Listings are paginated and filterable, and every API error that
//! reaches a client is recorded in a persisted error catalog.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Database, repositories, pagination
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, filters, responses)
//! - **errors**: Centralized error handling and the error catalog
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Write the error catalog into an empty database
//! cargo run -- errors seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Profile, User, UserId};
pub use errors::{ApiError, AppError, AppResult};
