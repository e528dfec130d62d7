//! Error record repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};

use super::entities::error::{self, ActiveModel, Entity as ErrorEntity};
use super::paginator;
use crate::domain::ErrorRecord;
use crate::errors::{AppError, AppResult};
use crate::types::{FilterSpec, Paginated, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Error record repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ErrorRepository: Send + Sync {
    /// Record an occurrence of `api_code`.
    ///
    /// An existing record takes `description` and keeps its code and name.
    /// A missing one is inserted with all three.
    async fn upsert(
        &self,
        api_code: &str,
        code: u16,
        name: &str,
        description: &str,
    ) -> AppResult<ErrorRecord>;

    async fn find_by_code(&self, api_code: &str) -> AppResult<Option<ErrorRecord>>;

    /// Insert records as given. Returns how many were inserted.
    async fn insert_many(&self, records: Vec<ErrorRecord>) -> AppResult<u64>;

    async fn count(&self) -> AppResult<u64>;

    async fn paginate(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<ErrorRecord>>;
}

/// Concrete implementation of ErrorRepository
pub struct ErrorStore {
    db: DatabaseConnection,
}

impl ErrorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ErrorRepository for ErrorStore {
    async fn upsert(
        &self,
        api_code: &str,
        code: u16,
        name: &str,
        description: &str,
    ) -> AppResult<ErrorRecord> {
        let txn = self.db.begin().await?;
        let record = upsert(&txn, api_code, code, name, description).await?;
        txn.commit().await?;
        Ok(record)
    }

    async fn find_by_code(&self, api_code: &str) -> AppResult<Option<ErrorRecord>> {
        find_by_code(&self.db, api_code).await
    }

    async fn insert_many(&self, records: Vec<ErrorRecord>) -> AppResult<u64> {
        insert_many(&self.db, records).await
    }

    async fn count(&self) -> AppResult<u64> {
        count(&self.db).await
    }

    async fn paginate(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<ErrorRecord>> {
        paginate(&self.db, filter, params).await
    }
}

pub(crate) async fn upsert<C: ConnectionTrait>(
    conn: &C,
    api_code: &str,
    code: u16,
    name: &str,
    description: &str,
) -> AppResult<ErrorRecord> {
    let now = chrono::Utc::now();
    let existing = ErrorEntity::find()
        .filter(error::Column::ApiCode.eq(api_code))
        .one(conn)
        .await?;

    let model = match existing {
        Some(model) => {
            let mut active: ActiveModel = model.into();
            active.description = Set(description.to_string());
            active.updated_at = Set(now);
            active.update(conn).await.map_err(AppError::from)?
        }
        None => {
            tracing::debug!(api_code, "Recording new API error code");
            ActiveModel {
                api_code: Set(api_code.to_string()),
                code: Set(i32::from(code)),
                name: Set(name.to_string()),
                description: Set(description.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(AppError::from)?
        }
    };

    Ok(ErrorRecord::from(model))
}

pub(crate) async fn find_by_code<C: ConnectionTrait>(
    conn: &C,
    api_code: &str,
) -> AppResult<Option<ErrorRecord>> {
    let result = ErrorEntity::find()
        .filter(error::Column::ApiCode.eq(api_code))
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(ErrorRecord::from))
}

pub(crate) async fn insert_many<C: ConnectionTrait>(
    conn: &C,
    records: Vec<ErrorRecord>,
) -> AppResult<u64> {
    if records.is_empty() {
        return Ok(0);
    }

    let now = chrono::Utc::now();
    let total = records.len() as u64;
    let models = records.into_iter().map(|record| ActiveModel {
        api_code: Set(record.api_code),
        code: Set(i32::from(record.code)),
        name: Set(record.name),
        description: Set(record.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    });

    ErrorEntity::insert_many(models)
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    Ok(total)
}

pub(crate) async fn count<C: ConnectionTrait>(conn: &C) -> AppResult<u64> {
    ErrorEntity::find()
        .count(conn)
        .await
        .map_err(AppError::from)
}

pub(crate) async fn paginate<C: ConnectionTrait>(
    conn: &C,
    filter: &FilterSpec,
    params: &PaginationParams,
) -> AppResult<Paginated<ErrorRecord>> {
    let page = paginator::paginate(conn, ErrorEntity::find(), filter, params).await?;
    Ok(page.map(ErrorRecord::from))
}
