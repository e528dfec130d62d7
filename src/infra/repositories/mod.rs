//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
pub(crate) mod error_repository;
pub mod paginator;
pub(crate) mod user_repository;

pub use error_repository::{ErrorRepository, ErrorStore};
pub use paginator::{paginate, FilterableEntity};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use error_repository::MockErrorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
