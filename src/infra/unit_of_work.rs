//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and the transaction lifecycle. Work done
//! through [`UnitOfWork::users`] or [`UnitOfWork::errors`] auto-commits per
//! statement; work done through a [`TransactionContext`] commits or rolls back
//! as one.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    error_repository as error_queries, user_repository as user_queries, ErrorRepository,
    ErrorStore, UserRepository, UserStore,
};
use crate::domain::{ErrorRecord, NewUser, User, UserChanges, UserId, UserLookup};
use crate::errors::{AppError, AppResult};
use crate::types::{FilterSpec, Paginated, PaginationParams};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method;
/// service tests implement it over mocked repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get error record repository
    fn errors(&self) -> Arc<dyn ErrorRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    /// Create a context over a transaction the caller owns and will finish.
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    /// Get error record repository for this transaction
    pub fn errors(&self) -> TxErrorRepository<'_> {
        TxErrorRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    error_repo: Arc<ErrorStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let error_repo = Arc::new(ErrorStore::new(db.clone()));
        Self {
            db,
            user_repo,
            error_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn errors(&self) -> Arc<dyn ErrorRepository> {
        self.error_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
///
/// Uses a borrowed transaction so it cannot outlive it.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl UserRepository for TxUserRepository<'_> {
    async fn find_by(&self, lookup: &UserLookup) -> AppResult<Option<User>> {
        user_queries::find_by(self.txn, lookup).await
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        user_queries::create(self.txn, data).await
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> AppResult<Option<User>> {
        user_queries::update(self.txn, id, changes).await
    }

    async fn set_activation(&self, id: UserId, active: bool) -> AppResult<Option<User>> {
        user_queries::set_activation(self.txn, id, active).await
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        user_queries::delete(self.txn, id).await
    }

    async fn paginate(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<User>> {
        user_queries::paginate(self.txn, filter, params).await
    }
}

/// Transaction-aware error record repository.
pub struct TxErrorRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxErrorRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl ErrorRepository for TxErrorRepository<'_> {
    async fn upsert(
        &self,
        api_code: &str,
        code: u16,
        name: &str,
        description: &str,
    ) -> AppResult<ErrorRecord> {
        error_queries::upsert(self.txn, api_code, code, name, description).await
    }

    async fn find_by_code(&self, api_code: &str) -> AppResult<Option<ErrorRecord>> {
        error_queries::find_by_code(self.txn, api_code).await
    }

    async fn insert_many(&self, records: Vec<ErrorRecord>) -> AppResult<u64> {
        error_queries::insert_many(self.txn, records).await
    }

    async fn count(&self) -> AppResult<u64> {
        error_queries::count(self.txn).await
    }

    async fn paginate(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<ErrorRecord>> {
        error_queries::paginate(self.txn, filter, params).await
    }
}

/// Run `$body` inside a transaction, with `$ctx` bound to its context.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
