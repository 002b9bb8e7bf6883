//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors shared by database-touching commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Resolve the catalog database URL from the environment.
///
/// Loads `.env` if present, then tries `CATALOG_DATABASE_URL` with a
/// fallback to the generic `DATABASE_URL`.
pub(crate) fn database_url() -> Result<String, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("CATALOG_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("CATALOG_DATABASE_URL"))
}
