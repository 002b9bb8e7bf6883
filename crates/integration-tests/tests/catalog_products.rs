//! Integration tests for the product catalog API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The catalog server running (cargo run -p stallside-catalog)
//! - A session cookie for a vendor-owning user in
//!   `CATALOG_TEST_SESSION_COOKIE` (sessions come from the external auth
//!   provider)
//!
//! Run with: cargo test -p stallside-integration-tests -- --ignored

use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use uuid::Uuid;

/// A 1x1 transparent PNG as a base64 data URI.
const SAMPLE_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// Base URL for the catalog API (configurable via environment).
fn catalog_base_url() -> String {
    std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a client with no session.
fn anonymous_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Create a client carrying the operator-provided session cookie.
fn authenticated_client() -> Client {
    let cookie = std::env::var("CATALOG_TEST_SESSION_COOKIE")
        .expect("CATALOG_TEST_SESSION_COOKIE must be set for authenticated tests");

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::COOKIE,
        format!("ss_session={cookie}")
            .parse()
            .expect("Invalid session cookie value"),
    );

    Client::builder()
        .cookie_store(true)
        .default_headers(headers)
        .build()
        .expect("Failed to create HTTP client")
}

/// Test helper: create a product via the API, returning the response body.
async fn create_product(client: &Client, name: &str, tag: Option<&str>) -> Value {
    let base_url = catalog_base_url();

    let mut form = reqwest::multipart::Form::new()
        .text("name", name.to_string())
        .text("description", "Created by integration test")
        .text("image", SAMPLE_IMAGE);
    if let Some(tag) = tag {
        form = form.text("tag", tag.to_string());
    }

    let resp = client
        .post(format!("{base_url}/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse created product")
}

fn error_message(body: &Value) -> &str {
    body["error"].as_str().expect("error body missing 'error'")
}

// ============================================================================
// Session Guard
// ============================================================================

#[tokio::test]
#[ignore = "Requires running catalog server"]
async fn test_health_endpoints() {
    let client = anonymous_client();
    let base_url = catalog_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running catalog server"]
async fn test_unauthenticated_requests_are_rejected() {
    let client = anonymous_client();
    let base_url = catalog_base_url();

    let resp = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let form = reqwest::multipart::Form::new()
        .text("name", "Mango")
        .text("description", "Fresh")
        .text("image", SAMPLE_IMAGE);
    let resp = client
        .post(format!("{base_url}/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post product");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{base_url}/products/1"))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let form = reqwest::multipart::Form::new()
        .text("name", "Mango")
        .text("description", "Fresh");
    let resp = client
        .put(format!("{base_url}/products/1"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to put product");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{base_url}/dashboard/products/1/edit"))
        .send()
        .await
        .expect("Failed to fetch edit page");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_create_requires_image() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    let form = reqwest::multipart::Form::new()
        .text("name", "Mango")
        .text("description", "Fresh");
    let resp = client
        .post(format!("{base_url}/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post product");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(error_message(&body), "Image is required");
}

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_create_requires_name_and_description() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    let form = reqwest::multipart::Form::new()
        .text("name", "Mango")
        .text("image", SAMPLE_IMAGE);
    let resp = client
        .post(format!("{base_url}/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post product");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(error_message(&body), "Name and description are required");
}

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_validation_checks_image_before_text_fields() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    // Everything missing: the image error must win.
    let form = reqwest::multipart::Form::new();
    let resp = client
        .post(format!("{base_url}/products"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post product");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(error_message(&body), "Image is required");
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_create_product_scenario() {
    let client = authenticated_client();

    let name = format!("Mango {}", Uuid::new_v4());
    let product = create_product(&client, &name, Some("PRODUCE")).await;

    assert_eq!(product["name"], name.as_str());
    assert_eq!(product["tags"], serde_json::json!(["PRODUCE"]));

    // The stored image is the hosted URL, never the submitted data URI
    let image = product["image"].as_str().expect("image missing");
    assert!(image.starts_with("http"));
    assert!(!image.starts_with("data:"));

    assert!(product["vendorId"].is_number());
}

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_create_defaults_tag_to_other() {
    let client = authenticated_client();

    let name = format!("Untagged {}", Uuid::new_v4());
    let product = create_product(&client, &name, None).await;

    assert_eq!(product["tags"], serde_json::json!(["OTHER"]));
}

// ============================================================================
// Read & List
// ============================================================================

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_read_unknown_product_returns_404() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    let resp = client
        .get(format!("{base_url}/products/2000000000"))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_listing_embeds_vendor_and_market() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    // Ensure at least one product exists
    let name = format!("Listed {}", Uuid::new_v4());
    create_product(&client, &name, None).await;

    let resp = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse listing");
    assert!(!products.is_empty());

    for product in &products {
        assert!(product["vendor"]["id"].is_number());
        assert!(product["vendor"]["market"]["id"].is_number());
    }
}

#[tokio::test]
#[ignore = "Requires running catalog server, session cookie, and CATALOG_TEST_MARKET_ID"]
async fn test_listing_filters_by_market() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    let market_id: i64 = std::env::var("CATALOG_TEST_MARKET_ID")
        .expect("CATALOG_TEST_MARKET_ID must be set")
        .parse()
        .expect("CATALOG_TEST_MARKET_ID must be an integer");

    // Ensure the vendor's market has at least one product
    let name = format!("Filtered {}", Uuid::new_v4());
    create_product(&client, &name, None).await;

    let resp = client
        .get(format!("{base_url}/products?marketId={market_id}"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse listing");
    assert!(!products.is_empty());
    for product in &products {
        assert_eq!(product["vendor"]["marketId"].as_i64(), Some(market_id));
    }

    // A market nobody belongs to filters everything out
    let resp = client
        .get(format!("{base_url}/products?marketId=2000000000"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Value> = resp.json().await.expect("Failed to parse listing");
    assert!(products.is_empty());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_update_retains_image_when_unchanged() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    let name = format!("Pre-update {}", Uuid::new_v4());
    let created = create_product(&client, &name, Some("PRODUCE")).await;
    let id = created["id"].as_i64().expect("id missing");
    let original_image = created["image"].as_str().expect("image missing").to_owned();

    // No image field: the stored URL must survive
    let form = reqwest::multipart::Form::new()
        .text("name", format!("{name} (updated)"))
        .text("description", "Updated by integration test")
        .text("tag", "BEVERAGES");
    let resp = client
        .put(format!("{base_url}/products/{id}"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = resp.json().await.expect("Failed to parse updated product");
    assert_eq!(updated["image"].as_str(), Some(original_image.as_str()));
    assert_eq!(updated["tags"], serde_json::json!(["BEVERAGES"]));
    assert_eq!(
        updated["name"].as_str(),
        Some(format!("{name} (updated)").as_str())
    );
}

#[tokio::test]
#[ignore = "Requires running catalog server and session cookie"]
async fn test_update_unknown_product_returns_404() {
    let client = authenticated_client();
    let base_url = catalog_base_url();

    let form = reqwest::multipart::Form::new()
        .text("name", "Ghost")
        .text("description", "Does not exist");
    let resp = client
        .put(format!("{base_url}/products/2000000000"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
