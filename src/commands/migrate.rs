//! Migrate command - Schema management for the users and errors tables.
//!
//! `up` and `fresh` leave the error catalog populated unless `--no-seed` is
//! given, since `fresh` drops the `errors` table along with everything else.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::commands::errors::seed_catalog;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Migrations are applied by hand here, not on connect
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let seed = args.action.seeds_catalog();

    match args.action {
        MigrateAction::Up { .. } => {
            db.run_migrations().await?;
            tracing::info!("Users and errors tables are up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("{:<48} {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh { .. } => {
            tracing::warn!("Dropping users and errors tables");
            db.fresh_migrations().await?;
            tracing::info!("Schema recreated from scratch");
        }
    }

    if seed {
        let inserted = seed_catalog(&db).await?;
        tracing::info!(inserted, "Error catalog checked after migration");
    }

    Ok(())
}
