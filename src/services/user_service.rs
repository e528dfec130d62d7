//! User service - Handles user-related business logic.
//!
//! Orchestrates CPF validation, uniqueness checks and the activation rules
//! on top of the repositories exposed by the Unit of Work.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{is_valid_cpf, NewUser, Profile, User, UserChanges, UserId, UserLookup};
use crate::errors::{ApiError, AppResult};
use crate::infra::{TransactionContext, UnitOfWork, UserRepository};
use crate::types::{FilterSpec, Paginated, PaginationParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// First user matching `lookup`, or `USER_NOT_FOUND`
    async fn find_user_by(&self, lookup: UserLookup) -> AppResult<User>;

    /// Validate and insert a new user
    async fn create_user(&self, data: NewUser) -> AppResult<User>;

    /// Insert a new user on behalf of `requester`.
    ///
    /// A profile above USER needs an active requester of at least that rank,
    /// unless the registry is still empty.
    async fn create_user_as(&self, requester: Option<UserId>, data: NewUser) -> AppResult<User>;

    /// Replace name, CPF and age of an existing user
    async fn update_user(&self, id: UserId, changes: UserChanges) -> AppResult<User>;

    /// Mark `target` inactive on behalf of `requester`
    async fn deactivate_user(&self, requester: UserId, target: UserId) -> AppResult<()>;

    /// Mark `target` active again on behalf of `requester`
    async fn activate_user(&self, requester: UserId, target: UserId) -> AppResult<()>;

    /// Permanently remove a user
    async fn delete_user(&self, id: UserId) -> AppResult<()>;

    /// One page of users matching `filter`
    async fn list_users(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<User>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Create a user inside a transaction owned by the caller.
    ///
    /// Nothing is committed here; the insert becomes visible when the
    /// caller's transaction commits, and disappears if it rolls back.
    pub async fn create_user_in(
        &self,
        ctx: &TransactionContext<'_>,
        data: NewUser,
    ) -> AppResult<User> {
        create_with(&ctx.users(), data).await
    }

    /// Check that `requester` may hand out `profile`.
    ///
    /// The first user of an empty registry may take any profile.
    async fn authorize_profile(&self, requester: Option<UserId>, profile: Profile) -> AppResult<()> {
        let Some(requester) = requester else {
            let existing = self
                .uow
                .users()
                .paginate(&FilterSpec::default(), &PaginationParams::new(1, 1))
                .await?
                .meta
                .total;
            if existing == 0 {
                tracing::info!(%profile, "Registry is empty, first user takes requested profile");
                return Ok(());
            }
            return Err(ApiError::requester_not_identified().into());
        };

        let agent = self.acting_requester(requester).await?;
        if agent.profile.rank() < profile.rank() {
            tracing::warn!(requester = %agent.id, %profile, "Profile grant refused");
            return Err(ApiError::profile_forbidden_access().into());
        }
        Ok(())
    }

    /// Resolve the requester and refuse it when it may not act at all.
    async fn acting_requester(&self, requester: UserId) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by(&UserLookup::Id(requester))
            .await?
            .ok_or_else(ApiError::requester_not_identified)?;

        if !user.is_active() {
            return Err(ApiError::profile_forbidden_access().into());
        }
        Ok(user)
    }
}

async fn find_with<R: UserRepository + ?Sized>(repo: &R, lookup: UserLookup) -> AppResult<User> {
    match repo.find_by(&lookup).await? {
        Some(user) => Ok(user),
        None => Err(ApiError::user_not_found(&lookup).into()),
    }
}

async fn create_with<R: UserRepository + ?Sized>(repo: &R, data: NewUser) -> AppResult<User> {
    if !is_valid_cpf(&data.cpf) {
        return Err(ApiError::invalid_cpf().into());
    }

    if repo
        .find_by(&UserLookup::Cpf(data.cpf.clone()))
        .await?
        .is_some()
    {
        return Err(ApiError::user_already_exists().into());
    }

    let user = repo.create(data).await?;
    tracing::info!(user_id = %user.id, "User created");
    Ok(user)
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn find_user_by(&self, lookup: UserLookup) -> AppResult<User> {
        find_with(self.uow.users().as_ref(), lookup).await
    }

    async fn create_user(&self, data: NewUser) -> AppResult<User> {
        create_with(self.uow.users().as_ref(), data).await
    }

    async fn create_user_as(&self, requester: Option<UserId>, data: NewUser) -> AppResult<User> {
        if data.profile != Profile::User {
            self.authorize_profile(requester, data.profile).await?;
        }
        create_with(self.uow.users().as_ref(), data).await
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> AppResult<User> {
        if !is_valid_cpf(&changes.cpf) {
            return Err(ApiError::invalid_cpf().into());
        }

        let users = self.uow.users();
        let current = find_with(users.as_ref(), UserLookup::Id(id)).await?;

        if changes.cpf != current.cpf {
            let holder = users.find_by(&UserLookup::Cpf(changes.cpf.clone())).await?;
            if holder.is_some_and(|other| other.id != id) {
                return Err(ApiError::user_already_exists().into());
            }
        }

        users
            .update(id, changes)
            .await?
            .ok_or_else(|| ApiError::user_not_found(UserLookup::Id(id)).into())
    }

    async fn deactivate_user(&self, requester: UserId, target: UserId) -> AppResult<()> {
        let agent = self.acting_requester(requester).await?;
        let users = self.uow.users();
        let user = find_with(users.as_ref(), UserLookup::Id(target)).await?;

        if !agent.can_manage(&user) {
            tracing::warn!(requester = %agent.id, target = %user.id, "Deactivation refused");
            return Err(ApiError::deactivate_forbidden().into());
        }

        users
            .set_activation(target, false)
            .await?
            .ok_or_else(|| ApiError::user_not_found(UserLookup::Id(target)))?;
        tracing::info!(requester = %agent.id, target = %target, "User deactivated");
        Ok(())
    }

    async fn activate_user(&self, requester: UserId, target: UserId) -> AppResult<()> {
        let agent = self.acting_requester(requester).await?;
        let users = self.uow.users();
        let user = find_with(users.as_ref(), UserLookup::Id(target)).await?;

        if !agent.can_manage(&user) {
            return Err(ApiError::profile_forbidden_access().into());
        }
        if user.is_active() {
            return Err(ApiError::user_is_active().into());
        }

        users
            .set_activation(target, true)
            .await?
            .ok_or_else(|| ApiError::user_not_found(UserLookup::Id(target)))?;
        tracing::info!(requester = %agent.id, target = %target, "User activated");
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        let users = self.uow.users();
        find_with(users.as_ref(), UserLookup::Id(id)).await?;

        if !users.delete(id).await? {
            return Err(ApiError::user_not_found(UserLookup::Id(id)).into());
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn list_users(
        &self,
        filter: &FilterSpec,
        params: &PaginationParams,
    ) -> AppResult<Paginated<User>> {
        self.uow.users().paginate(filter, params).await
    }
}
