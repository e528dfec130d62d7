//! Shared fixtures for integration tests.
//!
//! Each test gets its own in-memory SQLite database. The pool is capped at a
//! single connection because every SQLite memory connection is a separate
//! database.

#![allow(dead_code)]

use std::sync::Arc;

use user_registry::config::Config;
use user_registry::domain::{NewUser, Profile};
use user_registry::infra::Database;

/// CPFs with valid check digits
pub const VALID_CPFS: [&str; 5] = [
    "52998224725",
    "11144477735",
    "39053344705",
    "12345678909",
    "98765432100",
];

/// Eleven digits whose check digits do not match
pub const INVALID_CPF: &str = "52998224724";

/// Migrated, empty database
pub async fn test_database() -> Arc<Database> {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..Config::default()
    };

    let db = Database::connect(&config)
        .await
        .expect("in-memory database should migrate");
    Arc::new(db)
}

pub fn new_user(name: &str, cpf: &str, age: &str, profile: Profile) -> NewUser {
    NewUser {
        name: name.to_string(),
        cpf: cpf.to_string(),
        age: age.to_string(),
        profile,
    }
}
