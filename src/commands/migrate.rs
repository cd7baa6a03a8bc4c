//! Database migration command.

use murmur_core::error::AppError;
use murmur_database::DatabasePool;

use crate::output;

/// Apply every pending migration.
pub async fn execute(pool: &DatabasePool) -> Result<(), AppError> {
    pool.health_check().await?;
    println!("Running database migrations...");
    murmur_database::migration::run_migrations(pool.pool()).await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
