//! User repository implementation.
//!
//! The query functions are generic over [`ConnectionTrait`] so the same code
//! backs both the pooled [`UserStore`] and the transaction-bound repository
//! handed out by the unit of work.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::paginator;
use crate::domain::{NewUser, User, UserChanges, UserId, UserLookup};
use crate::errors::{ApiError, AppError, AppResult};
use crate::types::{FilterSpec, Paginated, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id or CPF
    async fn find_by(&self, lookup: &UserLookup) -> AppResult<Option<User>>;

    /// Insert a new, active user
    async fn create(&self, data: NewUser) -> AppResult<User>;

    /// Overwrite name, CPF and age. `None` when the user does not exist.
    async fn update(&self, id: UserId, changes: UserChanges) -> AppResult<Option<User>>;

    /// Set the activation flag. `None` when the user does not exist.
    async fn set_activation(&self, id: UserId, active: bool) -> AppResult<Option<User>>;

    /// Permanently remove a user. `false` when nothing was deleted.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// One page of users matching `filter`
    async fn paginate(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by(&self, lookup: &UserLookup) -> AppResult<Option<User>> {
        find_by(&self.db, lookup).await
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        create(&self.db, data).await
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> AppResult<Option<User>> {
        update(&self.db, id, changes).await
    }

    async fn set_activation(&self, id: UserId, active: bool) -> AppResult<Option<User>> {
        set_activation(&self.db, id, active).await
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        delete(&self.db, id).await
    }

    async fn paginate(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<User>> {
        paginate(&self.db, filter, params).await
    }
}

pub(crate) async fn find_by<C: ConnectionTrait>(
    conn: &C,
    lookup: &UserLookup,
) -> AppResult<Option<User>> {
    let query = match lookup {
        UserLookup::Id(id) => UserEntity::find_by_id(id.value()),
        UserLookup::Cpf(cpf) => UserEntity::find().filter(user::Column::Cpf.eq(cpf.as_str())),
    };

    let result = query.one(conn).await.map_err(AppError::from)?;
    Ok(result.map(User::from))
}

pub(crate) async fn create<C: ConnectionTrait>(conn: &C, data: NewUser) -> AppResult<User> {
    let now = chrono::Utc::now();
    let active_model = ActiveModel {
        name: Set(data.name),
        cpf: Set(data.cpf),
        age: Set(data.age),
        activation_status: Set(true),
        profile: Set(data.profile.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = active_model.insert(conn).await.map_err(map_write_error)?;
    Ok(User::from(model))
}

pub(crate) async fn update<C: ConnectionTrait>(
    conn: &C,
    id: UserId,
    changes: UserChanges,
) -> AppResult<Option<User>> {
    let Some(existing) = UserEntity::find_by_id(id.value()).one(conn).await? else {
        return Ok(None);
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(changes.name);
    active.cpf = Set(changes.cpf);
    active.age = Set(changes.age);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(conn).await.map_err(map_write_error)?;
    Ok(Some(User::from(model)))
}

pub(crate) async fn set_activation<C: ConnectionTrait>(
    conn: &C,
    id: UserId,
    active_flag: bool,
) -> AppResult<Option<User>> {
    let Some(existing) = UserEntity::find_by_id(id.value()).one(conn).await? else {
        return Ok(None);
    };

    let mut active: ActiveModel = existing.into();
    active.activation_status = Set(active_flag);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(conn).await.map_err(AppError::from)?;
    Ok(Some(User::from(model)))
}

pub(crate) async fn delete<C: ConnectionTrait>(conn: &C, id: UserId) -> AppResult<bool> {
    let result = UserEntity::delete_by_id(id.value())
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.rows_affected > 0)
}

pub(crate) async fn paginate<C: ConnectionTrait>(
    conn: &C,
    filter: &FilterSpec,
    params: &PaginationParams,
) -> AppResult<Paginated<User>> {
    let page = paginator::paginate(conn, UserEntity::find(), filter, params).await?;
    Ok(page.map(User::from))
}

/// The unique index on `cpf` backs the service's existence check.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::user_already_exists().into(),
        _ => AppError::from(err),
    }
}
