//! Migrate command - Schema management for the branches table.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::{Config, StoreBackend};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    if config.store == StoreBackend::Memory {
        tracing::warn!("BRANCH_STORE=memory has no schema, migrating DATABASE_URL anyway");
    }

    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let outcome = match args.action {
        MigrateAction::Up => db.run_migrations().await.map(|_| "Migrations applied"),
        MigrateAction::Down => db.rollback_migration().await.map(|_| "Rolled back last migration"),
        MigrateAction::Fresh => {
            tracing::warn!("Dropping branches table and re-running all migrations");
            db.fresh_migrations().await.map(|_| "Database reset and migrations applied")
        }
        MigrateAction::Status => db.migration_status().await.map(|status| {
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
            "Migration status listed"
        }),
    };

    let message = outcome.map_err(|e| AppError::internal(e.to_string()))?;
    tracing::info!("{}", message);
    Ok(())
}
