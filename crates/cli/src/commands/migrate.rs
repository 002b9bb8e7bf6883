//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! stallside-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migration files live in `crates/catalog/migrations/` and are embedded in
//! the binary at compile time.

use sqlx::PgPool;

use super::{CommandError, database_url};

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration cannot be applied.
pub async fn catalog() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to catalog database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running catalog migrations...");
    sqlx::migrate!("../catalog/migrations").run(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
