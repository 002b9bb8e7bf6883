//! Product repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use stallside_core::{MarketId, ProductId, Tag, UserId, VendorId};

use super::RepositoryError;
use crate::models::{
    Market, NewProduct, Product, ProductPatch, ProductWithVendor, Vendor, VendorWithMarket,
};

/// Columns returned for a bare product row.
const PRODUCT_COLUMNS: &str =
    "id, name, description, tags, image, vendor_id, created_at, updated_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

/// Flat row for the listing query: product columns plus the joined vendor
/// and market, prefixed to keep the names unambiguous.
#[derive(FromRow)]
struct ProductListingRow {
    id: ProductId,
    name: String,
    description: String,
    tags: Vec<Tag>,
    image: String,
    vendor_id: VendorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    v_id: VendorId,
    v_user_id: UserId,
    v_market_id: MarketId,
    v_display_name: String,
    v_created_at: DateTime<Utc>,
    v_updated_at: DateTime<Utc>,
    m_id: MarketId,
    m_name: String,
    m_created_at: DateTime<Utc>,
    m_updated_at: DateTime<Utc>,
}

impl From<ProductListingRow> for ProductWithVendor {
    fn from(row: ProductListingRow) -> Self {
        Self {
            product: Product {
                id: row.id,
                name: row.name,
                description: row.description,
                tags: row.tags,
                image: row.image,
                vendor_id: row.vendor_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            vendor: VendorWithMarket {
                vendor: Vendor {
                    id: row.v_id,
                    user_id: row.v_user_id,
                    market_id: row.v_market_id,
                    display_name: row.v_display_name,
                    created_at: row.v_created_at,
                    updated_at: row.v_updated_at,
                },
                market: Market {
                    id: row.m_id,
                    name: row.m_name,
                    created_at: row.m_created_at,
                    updated_at: row.m_updated_at,
                },
            },
        }
    }
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally restricted to vendors of one market.
    ///
    /// Every result embeds the owning vendor and that vendor's market.
    /// No pagination or sorting beyond newest-first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        market: Option<MarketId>,
    ) -> Result<Vec<ProductWithVendor>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductListingRow>(
            r"
            SELECT p.id, p.name, p.description, p.tags, p.image, p.vendor_id,
                   p.created_at, p.updated_at,
                   v.id AS v_id, v.user_id AS v_user_id, v.market_id AS v_market_id,
                   v.display_name AS v_display_name,
                   v.created_at AS v_created_at, v.updated_at AS v_updated_at,
                   m.id AS m_id, m.name AS m_name,
                   m.created_at AS m_created_at, m.updated_at AS m_updated_at
            FROM catalog.product p
            JOIN catalog.vendor v ON v.id = p.vendor_id
            JOIN catalog.market m ON m.id = v.market_id
            WHERE $1::int4 IS NULL OR v.market_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            ",
        )
        .bind(market.map(|m| m.as_i32()))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Persist a new product.
    ///
    /// The stored tag collection is always the single resolved tag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the vendor reference is unknown.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            INSERT INTO catalog.product (name, description, tags, image, vendor_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(vec![new.tag])
        .bind(&new.image)
        .bind(new.vendor_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict("vendor does not exist".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(product)
    }

    /// Update a product's editable fields.
    ///
    /// Ownership (`vendor_id`) is never touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            UPDATE catalog.product
            SET name = $2, description = $3, tags = $4, image = $5, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(vec![patch.tag])
        .bind(&patch.image)
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }
}
