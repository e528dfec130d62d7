//! Service Container - Centralized service access.
//!
//! Depends on service traits, not implementations, so handlers can be
//! exercised against any wiring.

use std::sync::Arc;

use super::{ErrorCatalogService, ErrorLog, UserManager, UserService};
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get error catalog service
    fn errors(&self) -> Arc<dyn ErrorCatalogService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    error_service: Arc<dyn ErrorCatalogService>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(
        user_service: Arc<dyn UserService>,
        error_service: Arc<dyn ErrorCatalogService>,
    ) -> Self {
        Self {
            user_service,
            error_service,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let error_service = Arc::new(ErrorLog::new(uow));

        Self {
            user_service,
            error_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn errors(&self) -> Arc<dyn ErrorCatalogService> {
        self.error_service.clone()
    }
}
