//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod cpf;
pub mod error_record;
pub mod user;

pub use cpf::is_valid_cpf;
pub use error_record::ErrorRecord;
pub use user::{NewUser, Profile, User, UserChanges, UserId, UserLookup, UserResponse};
