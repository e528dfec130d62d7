//! Errors command - Error catalog management.

use std::sync::Arc;

use crate::cli::args::{ErrorsAction, ErrorsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{ErrorCatalogService, ErrorLog};

/// Execute the errors command
pub async fn execute(args: ErrorsArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        ErrorsAction::Seed => {
            let inserted = seed_catalog(&db).await?;
            if inserted == 0 {
                println!("Error catalog already present, nothing inserted");
            } else {
                println!("Inserted {} error records", inserted);
            }
        }
    }

    Ok(())
}

/// Insert the whole catalog when the errors table is empty.
///
/// Returns how many records were inserted, `0` when the table had any.
pub(crate) async fn seed_catalog(db: &Database) -> AppResult<u64> {
    let errors = ErrorLog::new(Arc::new(Persistence::new(db.get_connection())));
    errors.seed_if_empty().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::catalog;
    use crate::infra::{ErrorRepository, ErrorStore};

    async fn memory_db() -> Database {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Config::default()
        };
        Database::connect(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_seed_catalog_after_fresh_migrations() {
        let db = memory_db().await;
        let store = ErrorStore::new(db.get_connection());
        let total = catalog::entries().len() as u64;

        assert_eq!(seed_catalog(&db).await.unwrap(), total);
        assert_eq!(seed_catalog(&db).await.unwrap(), 0);

        db.fresh_migrations().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        assert_eq!(seed_catalog(&db).await.unwrap(), total);
        assert_eq!(store.count().await.unwrap(), total);
    }
}
