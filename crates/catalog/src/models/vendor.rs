//! Vendor and market models.
//!
//! Both entities are provisioned externally (at registration) and are
//! read-only in this service: products reference a vendor, and listings
//! traverse vendor → market for filtering and embedding.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use stallside_core::{MarketId, UserId, VendorId};

/// A marketplace a vendor sells in.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A seller entity owning products.
///
/// Belongs to exactly one [`Market`] and exactly one user account.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    pub user_id: UserId,
    pub market_id: MarketId,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
