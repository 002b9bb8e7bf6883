//! HTTP route handlers for the catalog service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database ping)
//!
//! # Product API (JSON, session required)
//! GET  /products?marketId=<id>          - List products (vendor→market embedded)
//! POST /products                        - Create a product (multipart form)
//! GET  /products/{product_id}           - Fetch one product
//! PUT  /products/{product_id}           - Update a product (multipart form,
//!                                         image optional)
//!
//! # Dashboard (HTML, session required)
//! GET  /dashboard/products/{id}/edit    - Product edit form
//! POST /dashboard/products/{id}/edit    - Submit the edit form
//! ```

pub mod dashboard;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product API routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{product_id}",
            get(products::show).put(products::update),
        )
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route(
        "/products/{product_id}/edit",
        get(dashboard::edit_page).post(dashboard::submit_edit),
    )
}

/// Create all routes for the catalog service.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product API
        .nest("/products", product_routes())
        // Vendor dashboard
        .nest("/dashboard", dashboard_routes())
}
