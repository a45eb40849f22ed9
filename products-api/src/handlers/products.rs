//! Product resource handlers
//!
//! Handlers receive ids and payloads that already passed the validation
//! gate. Replace, toggle and delete look the product up first and only write
//! when it exists.

use axum::extract::State;

use super::{ApiError, ApiOperation, ItemResponse};
use crate::models::Product;
use crate::repository::ProductRepository;
use crate::state::AppState;
use crate::validation::{ProductId, ValidProductId, ValidProductPayload, ValidProductUpdate};

/// Message returned after a successful delete
pub const PRODUCT_DELETED: &str = "Product deleted";

async fn find_product<R: ProductRepository>(
    repository: &R,
    ProductId(id): ProductId,
    operation: ApiOperation,
) -> Result<Product, ApiError> {
    repository
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from(e).with_operation(operation))?
        .ok_or_else(|| ApiError::not_found(id).with_operation(operation))
}

/// `GET /` - every product, ordered by id
pub async fn list_products<R: ProductRepository>(
    State(state): State<AppState<R>>,
) -> Result<ItemResponse<Vec<Product>>, ApiError> {
    let products = state
        .repository()
        .find_all()
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::List))?;

    tracing::debug!(count = products.len(), "Listed products");
    Ok(ItemResponse::new(products))
}

/// `GET /{id}`
pub async fn get_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    ValidProductId(id): ValidProductId,
) -> Result<ItemResponse<Product>, ApiError> {
    let product = find_product(state.repository(), id, ApiOperation::Get).await?;

    tracing::debug!(product_id = product.id, "Fetched product");
    Ok(ItemResponse::new(product))
}

/// `POST /` - responds 201 with the stored product
pub async fn create_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    ValidProductPayload(payload): ValidProductPayload,
) -> Result<ItemResponse<Product>, ApiError> {
    let product = state
        .repository()
        .create(payload.into())
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Create))?;

    tracing::info!(product_id = product.id, name = %product.name, "Product created");
    Ok(ItemResponse::created(product))
}

/// `PUT /{id}` - overwrite name and price, and availability when given
pub async fn update_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    ValidProductUpdate { id, payload }: ValidProductUpdate,
) -> Result<ItemResponse<Product>, ApiError> {
    let repository = state.repository();
    let mut product = find_product(repository, id, ApiOperation::Update).await?;

    product.apply(&payload);
    let product = repository
        .save(product)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?;

    tracing::info!(product_id = product.id, "Product updated");
    Ok(ItemResponse::new(product))
}

/// `PATCH /{id}` - flip availability; the body is ignored
pub async fn update_availability<R: ProductRepository>(
    State(state): State<AppState<R>>,
    ValidProductId(id): ValidProductId,
) -> Result<ItemResponse<Product>, ApiError> {
    let repository = state.repository();
    let mut product = find_product(repository, id, ApiOperation::ToggleAvailability).await?;

    product.toggle_availability();
    let product = repository
        .save(product)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::ToggleAvailability))?;

    tracing::info!(
        product_id = product.id,
        availability = product.availability,
        "Product availability toggled"
    );
    Ok(ItemResponse::new(product))
}

/// `DELETE /{id}`
pub async fn delete_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    ValidProductId(id): ValidProductId,
) -> Result<ItemResponse<&'static str>, ApiError> {
    let repository = state.repository();
    let product = find_product(repository, id, ApiOperation::Delete).await?;
    let product_id = product.id;

    repository
        .destroy(product)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Delete))?;

    tracing::info!(product_id, "Product deleted");
    Ok(ItemResponse::new(PRODUCT_DELETED))
}
