//! Database seeding command.
//!
//! Inserts a demo market, user, and vendor so the catalog API has an
//! identity to resolve during local development. Products are created
//! through the API itself.
//!
//! # Usage
//!
//! ```bash
//! stallside-cli seed
//! ```

use sqlx::PgPool;

use super::{CommandError, database_url};

const DEMO_MARKET: &str = "Riverside Market";
const DEMO_PHONE: &str = "+15551234567";
const DEMO_USER_NAME: &str = "Demo Vendor";
const DEMO_VENDOR_NAME: &str = "Riverside Fruit";

/// Seed the catalog database with demo data.
///
/// Idempotent for the user (keyed by phone); re-running creates a fresh
/// market and vendor.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing or any insert
/// fails.
pub async fn catalog() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to catalog database...");
    let pool = PgPool::connect(&database_url).await?;

    let market_id: i32 =
        sqlx::query_scalar("INSERT INTO catalog.market (name) VALUES ($1) RETURNING id")
            .bind(DEMO_MARKET)
            .fetch_one(&pool)
            .await?;

    let user_id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO catalog.app_user (phone, name)
        VALUES ($1, $2)
        ON CONFLICT (phone) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        ",
    )
    .bind(DEMO_PHONE)
    .bind(DEMO_USER_NAME)
    .fetch_one(&pool)
    .await?;

    let vendor_id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO catalog.vendor (user_id, market_id, display_name)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(user_id)
    .bind(market_id)
    .bind(DEMO_VENDOR_NAME)
    .fetch_one(&pool)
    .await?;

    tracing::info!(market_id, user_id, vendor_id, "Seed data created");
    Ok(())
}
