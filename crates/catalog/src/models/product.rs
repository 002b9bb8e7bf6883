//! Product models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use stallside_core::{ProductId, Tag, VendorId};

use super::vendor::{Market, Vendor};

/// A catalog product.
///
/// `image` is always the durable secure URL returned by the media host,
/// never raw bytes or a client-local data URI. `vendor_id` is fixed at
/// creation and never updated.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub tags: Vec<Tag>,
    pub image: String,
    pub vendor_id: VendorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product with its owning vendor (and that vendor's market) embedded.
///
/// This is the listing shape: product fields at the top level, plus a
/// `vendor` object that itself embeds its `market`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithVendor {
    #[serde(flatten)]
    pub product: Product,
    pub vendor: VendorWithMarket,
}

/// A vendor with its market embedded.
#[derive(Debug, Clone, Serialize)]
pub struct VendorWithMarket {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub market: Market,
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub tag: Tag,
    pub image: String,
    pub vendor_id: VendorId,
}

/// Validated input for updating a product.
///
/// `image` is the resolved URL to store: either a freshly uploaded secure
/// URL or the product's existing one when the submission left the image
/// unchanged. Ownership (`vendor_id`) is not patchable.
#[derive(Debug, Clone)]
pub struct ProductPatch {
    pub name: String,
    pub description: String,
    pub tag: Tag,
    pub image: String,
}
