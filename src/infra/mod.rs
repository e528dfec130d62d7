//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories and the generic paginator
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    paginate, ErrorRepository, ErrorStore, FilterableEntity, UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxErrorRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockErrorRepository, MockUserRepository};
