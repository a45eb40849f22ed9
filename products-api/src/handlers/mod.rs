//! HTTP handlers for the product resource
//!
//! - [`products`]: list, get, create, replace, toggle availability, delete
//! - [`ApiError`]: failure envelope with status code mapping
//! - [`ItemResponse`]: `{ "data": ... }` success envelope

pub mod error;
pub mod products;
pub mod response;

pub use error::{ApiError, ApiErrorKind, ApiOperation, ValidationErrorResponse};
pub use products::{
    create_product, delete_product, get_product, list_products, update_availability,
    update_product, PRODUCT_DELETED,
};
pub use response::ItemResponse;
