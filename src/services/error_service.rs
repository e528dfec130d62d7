//! Error catalog service - seeding, lookup and recording of API error records.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::ErrorRecord;
use crate::errors::{catalog, ApiError, AppResult};
use crate::infra::{ErrorRepository, UnitOfWork};
use crate::types::{FilterSpec, Paginated, PaginationParams};
use crate::with_transaction;

/// Error catalog service trait for dependency injection.
#[async_trait]
pub trait ErrorCatalogService: Send + Sync {
    /// Insert every catalog entry in one transaction. Not an upsert.
    async fn seed_all(&self) -> AppResult<u64>;

    /// Seed only when no record exists yet. Returns how many were inserted.
    async fn seed_if_empty(&self) -> AppResult<u64>;

    /// Persisted record for `api_code`, or `ERROR_CODE_NOT_FOUND`
    async fn get_error(&self, api_code: &str) -> AppResult<ErrorRecord>;

    /// One page of persisted records matching `filter`
    async fn list_errors(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<ErrorRecord>>;

    /// Upsert the record for an occurrence of `error`. Never fails.
    async fn record(&self, error: &ApiError) -> ErrorRecord;
}

/// Concrete implementation of ErrorCatalogService using Unit of Work.
pub struct ErrorLog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ErrorLog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ErrorCatalogService for ErrorLog<U> {
    async fn seed_all(&self) -> AppResult<u64> {
        let records: Vec<ErrorRecord> = catalog::entries()
            .iter()
            .map(|entry| entry.to_record())
            .collect();

        let inserted =
            with_transaction!(self.uow, |ctx| ctx.errors().insert_many(records).await)?;
        tracing::info!(count = inserted, "Error catalog seeded");
        Ok(inserted)
    }

    async fn seed_if_empty(&self) -> AppResult<u64> {
        let existing = self.uow.errors().count().await?;
        if existing > 0 {
            tracing::debug!(existing, "Error catalog already seeded");
            return Ok(0);
        }
        self.seed_all().await
    }

    async fn get_error(&self, api_code: &str) -> AppResult<ErrorRecord> {
        self.uow
            .errors()
            .find_by_code(api_code)
            .await?
            .ok_or_else(|| ApiError::error_code_not_found(api_code).into())
    }

    async fn list_errors(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<ErrorRecord>> {
        self.uow.errors().paginate(filter, params).await
    }

    async fn record(&self, error: &ApiError) -> ErrorRecord {
        error.persist(self.uow.errors().as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockErrorRepository;
    use crate::services::test_support::MockUnitOfWork;
    use axum::http::StatusCode;
    use mockall::predicate::eq;
    use serde_json::json;

    fn service(repo: MockErrorRepository) -> ErrorLog<MockUnitOfWork> {
        ErrorLog::new(Arc::new(MockUnitOfWork::with_errors(repo)))
    }

    fn stored(api_code: &str, code: u16, name: &str, description: &str) -> ErrorRecord {
        ErrorRecord {
            code,
            api_code: api_code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            info: None,
        }
    }

    #[tokio::test]
    async fn test_seed_if_empty_skips_populated_store() {
        let mut repo = MockErrorRepository::new();
        repo.expect_count().times(1).returning(|| Ok(3));
        repo.expect_insert_many().times(0);

        let inserted = service(repo).seed_if_empty().await.unwrap();
        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn test_get_error_missing() {
        let mut repo = MockErrorRepository::new();
        repo.expect_find_by_code()
            .with(eq("NOPE"))
            .returning(|_| Ok(None));

        let err = service(repo).get_error("NOPE").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.api_code(), catalog::ERROR_CODE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_error_found() {
        let mut repo = MockErrorRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(stored(code, 404, "Not Found", "User doesn't exist."))));

        let record = service(repo).get_error(catalog::USER_NOT_FOUND).await.unwrap();
        assert_eq!(record.code, 404);
        assert!(record.info.is_none());
    }

    #[tokio::test]
    async fn test_record_upserts_and_attaches_info() {
        let mut repo = MockErrorRepository::new();
        repo.expect_upsert()
            .withf(|api_code, code, name, description| {
                api_code == catalog::PAGES_NOT_FOUND
                    && *code == 404
                    && name == "Not Found"
                    && description == "No page generated"
            })
            .times(1)
            .returning(|api_code, code, name, description| {
                Ok(stored(api_code, code, name, description))
            });

        let record = service(repo).record(&ApiError::pages_not_found(2, 1)).await;
        assert_eq!(record.api_code, catalog::PAGES_NOT_FOUND);
        assert_eq!(record.info, Some(json!({ "page": 2, "total_pages": 1 })));
    }

    #[tokio::test]
    async fn test_record_survives_store_failure() {
        let mut repo = MockErrorRepository::new();
        repo.expect_upsert()
            .returning(|_, _, _, _| Err(AppError::internal("store down")));

        let err = ApiError::new(StatusCode::CONFLICT, "x");
        let record = service(repo).record(&err).await;
        assert_eq!(record.api_code, "X");
        assert_eq!(record.code, 409);
        assert_eq!(record.name, "Conflict");
        assert_eq!(record.description, "x");
    }
}
