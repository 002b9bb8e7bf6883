//! Vendor repository for database operations.
//!
//! Vendors are provisioned externally; this repository only resolves them.

use sqlx::PgPool;

use stallside_core::Phone;

use super::RepositoryError;
use crate::models::Vendor;

/// Repository for vendor lookups.
pub struct VendorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VendorRepository<'a> {
    /// Create a new vendor repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the vendor owned by the user with the given phone number.
    ///
    /// Returns the first vendor (lowest id) when the user somehow owns more
    /// than one, and `None` when the user has no vendor account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_user_phone(
        &self,
        phone: &Phone,
    ) -> Result<Option<Vendor>, RepositoryError> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r"
            SELECT v.id, v.user_id, v.market_id, v.display_name,
                   v.created_at, v.updated_at
            FROM catalog.vendor v
            JOIN catalog.app_user u ON u.id = v.user_id
            WHERE u.phone = $1
            ORDER BY v.id
            LIMIT 1
            ",
        )
        .bind(phone.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(vendor)
    }
}
