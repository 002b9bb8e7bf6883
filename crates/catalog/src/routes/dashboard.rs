//! Dashboard route handlers (server-rendered vendor pages).
//!
//! The edit page loads an existing product into a form, lets the vendor
//! change fields and swap the image, and submits the same multipart shape
//! as the PUT API.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};

use stallside_core::{ProductId, Tag};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::Product;
use crate::state::AppState;

use super::products::ProductForm;

/// One entry in the category picker.
pub struct TagOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Product edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct EditProductTemplate {
    pub product: Product,
    pub tag_options: Vec<TagOption>,
}

fn tag_options_for(product: &Product) -> Vec<TagOption> {
    let selected = product.tags.first().copied().unwrap_or_default();

    Tag::ALL
        .iter()
        .map(|tag| TagOption {
            value: tag.as_str(),
            label: tag.label(),
            selected: *tag == selected,
        })
        .collect()
}

/// `GET /dashboard/products/{product_id}/edit` - Render the edit form.
pub async fn edit_page(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<EditProductTemplate> {
    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    let tag_options = tag_options_for(&product);

    Ok(EditProductTemplate {
        product,
        tag_options,
    })
}

/// `POST /dashboard/products/{product_id}/edit` - Handle the form submit.
///
/// Runs the same update path as the PUT API (image optional, stored URL
/// retained when unchanged), then sends the vendor back to the form.
pub async fn submit_edit(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = ProductForm::from_multipart(multipart).await?;
    let input = form.validate_update()?;

    let product = super::products::apply_update(&state, &user, product_id, input).await?;

    Ok(Redirect::to(&format!(
        "/dashboard/products/{}/edit",
        product.id
    )))
}
