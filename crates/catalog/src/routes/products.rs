//! Product API route handlers.
//!
//! Every handler starts with the session guard, then validates the
//! submission, resolves the caller's vendor, uploads any new image, and
//! finally touches the catalog store. The upload must complete before the
//! record is written since the stored image is always the hosted URL.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use stallside_core::{MarketId, ProductId, Tag};

use crate::db::{ProductRepository, VendorRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{CurrentUser, NewProduct, Product, ProductPatch, Vendor};
use crate::state::AppState;

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict results to vendors of this market.
    #[serde(rename = "marketId")]
    pub market_id: Option<MarketId>,
}

/// Raw fields collected from a multipart product submission.
///
/// Empty and whitespace-only values are treated as missing, matching what
/// the validation messages promise the caller.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
    pub image: Option<String>,
}

/// Validated create submission.
#[derive(Debug)]
pub struct CreateInput {
    pub name: String,
    pub description: String,
    pub tag: Tag,
    pub image: String,
}

/// Validated update submission; `image` stays `None` when unchanged.
#[derive(Debug)]
pub struct UpdateInput {
    pub name: String,
    pub description: String,
    pub tag: Tag,
    pub image: Option<String>,
}

impl ProductForm {
    /// Collect the known text fields from a multipart body.
    ///
    /// Unknown fields are ignored. The image arrives as a data-URI string
    /// field, not a binary part.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the multipart stream is malformed.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed form submission: {e}")))?
        {
            let name = field.name().map(ToOwned::to_owned);
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Malformed form submission: {e}")))?;

            match name.as_deref() {
                Some("name") => form.name = non_empty(value),
                Some("description") => form.description = non_empty(value),
                Some("tag") => form.tag = non_empty(value),
                Some("image") => form.image = non_empty(value),
                _ => {}
            }
        }

        Ok(form)
    }

    /// Validate a create submission.
    ///
    /// The image check runs before the text-field check; the distinct
    /// error messages are part of the API contract.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` with "Image is required" or
    /// "Name and description are required".
    pub fn validate_create(self) -> Result<CreateInput> {
        let image = self
            .image
            .ok_or_else(|| AppError::BadRequest("Image is required".to_owned()))?;

        let (name, description) = require_text_fields(self.name, self.description)?;

        Ok(CreateInput {
            name,
            description,
            tag: resolve_tag(self.tag.as_deref()),
            image,
        })
    }

    /// Validate an update submission. Image is optional here; an absent
    /// image means "keep the stored URL".
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if name or description is missing.
    pub fn validate_update(self) -> Result<UpdateInput> {
        let (name, description) = require_text_fields(self.name, self.description)?;

        Ok(UpdateInput {
            name,
            description,
            tag: resolve_tag(self.tag.as_deref()),
            image: self.image,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn require_text_fields(
    name: Option<String>,
    description: Option<String>,
) -> Result<(String, String)> {
    match (name, description) {
        (Some(name), Some(description)) => Ok((name, description)),
        _ => Err(AppError::BadRequest(
            "Name and description are required".to_owned(),
        )),
    }
}

/// Resolve the submitted tag, falling back to the default category when the
/// tag is absent or not a known value.
fn resolve_tag(tag: Option<&str>) -> Tag {
    tag.and_then(|t| t.parse::<Tag>().ok()).unwrap_or_default()
}

/// Resolve the vendor owned by the authenticated user.
async fn resolve_vendor(state: &AppState, user: &CurrentUser) -> Result<Vendor> {
    VendorRepository::new(state.pool())
        .find_by_user_phone(&user.phone)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor account not found".to_owned()))
}

/// `GET /products` - List products, optionally filtered by market.
pub async fn list(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool())
        .list(query.market_id)
        .await?;

    Ok(Json(products))
}

/// `GET /products/{product_id}` - Fetch a single product.
pub async fn show(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// `POST /products` - Create a product for the caller's vendor.
pub async fn create(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = ProductForm::from_multipart(multipart).await?;
    let input = form.validate_create()?;

    let vendor = resolve_vendor(&state, &user).await?;

    // Upload first: the stored image is always the hosted URL. If the
    // insert below fails the uploaded media is orphaned; the upload log
    // line keeps it traceable.
    let image_url = state.media().upload_image(&input.image).await?;

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            name: input.name,
            description: input.description,
            tag: input.tag,
            image: image_url,
            vendor_id: vendor.id,
        })
        .await?;

    tracing::info!(product_id = %product.id, vendor_id = %vendor.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{product_id}` - Update a product.
pub async fn update(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    multipart: Multipart,
) -> Result<Json<Product>> {
    let form = ProductForm::from_multipart(multipart).await?;
    let input = form.validate_update()?;

    let product = apply_update(&state, &user, product_id, input).await?;

    Ok(Json(product))
}

/// Shared update path for the PUT API and the dashboard edit form.
///
/// Re-validates the caller's vendor, re-uploads only when a new image was
/// submitted, and retains the stored URL otherwise.
pub async fn apply_update(
    state: &AppState,
    user: &CurrentUser,
    product_id: ProductId,
    input: UpdateInput,
) -> Result<Product> {
    let _vendor = resolve_vendor(state, user).await?;

    let repo = ProductRepository::new(state.pool());
    let existing = repo
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    let image = match input.image {
        Some(data_uri) => state.media().upload_image(&data_uri).await?,
        None => existing.image,
    };

    let product = repo
        .update(
            product_id,
            &ProductPatch {
                name: input.name,
                description: input.description,
                tag: input.tag,
                image,
            },
        )
        .await?;

    tracing::info!(product_id = %product.id, "Product updated");

    Ok(product)
}
