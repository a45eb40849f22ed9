//! Success envelope for product handlers
//!
//! # Example
//!
//! ```rust
//! use products_api::handlers::ItemResponse;
//!
//! let response = ItemResponse::created("Product deleted");
//! assert_eq!(response.data, "Product deleted");
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// `{ "data": ... }` with a 200 or 201 status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    /// The response data
    pub data: T,
    #[serde(skip)]
    status: Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Status {
    #[default]
    Ok,
    Created,
}

impl<T> ItemResponse<T> {
    /// 200 response
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: Status::Ok,
        }
    }

    /// 201 response
    pub fn created(data: T) -> Self {
        Self {
            data,
            status: Status::Created,
        }
    }

    /// Status code this response is sent with
    pub fn status_code(&self) -> StatusCode {
        match self.status {
            Status::Ok => StatusCode::OK,
            Status::Created => StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for ItemResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_data_only() {
        let json = serde_json::to_value(ItemResponse::created(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [1, 2] }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ItemResponse::new(()).into_response().status(), StatusCode::OK);
        assert_eq!(
            ItemResponse::created(()).into_response().status(),
            StatusCode::CREATED
        );
    }
}
