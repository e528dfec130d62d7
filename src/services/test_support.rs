//! Unit of Work over mocked repositories, for service unit tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    ErrorRepository, MockErrorRepository, MockUserRepository, TransactionContext, UnitOfWork,
    UserRepository,
};

pub struct MockUnitOfWork {
    users: Arc<MockUserRepository>,
    errors: Arc<MockErrorRepository>,
}

impl MockUnitOfWork {
    pub fn new(users: MockUserRepository, errors: MockErrorRepository) -> Self {
        Self {
            users: Arc::new(users),
            errors: Arc::new(errors),
        }
    }

    pub fn with_users(users: MockUserRepository) -> Self {
        Self::new(users, MockErrorRepository::new())
    }

    pub fn with_errors(errors: MockErrorRepository) -> Self {
        Self::new(MockUserRepository::new(), errors)
    }
}

#[async_trait]
impl UnitOfWork for MockUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn errors(&self) -> Arc<dyn ErrorRepository> {
        self.errors.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal(
            "transactions need a database; cover them in integration tests",
        ))
    }
}
