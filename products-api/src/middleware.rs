//! Request tracking middleware
//!
//! Request id generation and propagation, plus masking of sensitive headers
//! in trace output.

use axum::http::{HeaderValue, Request};
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

/// Prefix of generated request ids
pub const REQUEST_ID_PREFIX: &str = "req_";

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Generates `req_<uuid>` ids for requests that arrive without `x-request-id`
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeProductsRequestId;

impl MakeRequestId for MakeProductsRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("{}{}", REQUEST_ID_PREFIX, uuid::Uuid::new_v4().simple());
        let header_value = HeaderValue::from_str(&id).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Set `x-request-id` when the client did not send one
pub fn request_id_layer() -> SetRequestIdLayer<MakeProductsRequestId> {
    SetRequestIdLayer::x_request_id(MakeProductsRequestId)
}

/// Copy `x-request-id` from the request onto the response
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    let headers = SENSITIVE_HEADERS
        .iter()
        .map(|h| h.parse().expect("valid header name"))
        .collect::<Vec<_>>();

    SetSensitiveRequestHeadersLayer::new(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_request_id() {
        let mut maker = MakeProductsRequestId;
        let request = Request::builder().body(()).unwrap();

        let id = maker.make_request_id(&request).unwrap();
        let header_value = id.into_header_value();
        let id_str = header_value.to_str().unwrap();

        assert!(id_str.starts_with(REQUEST_ID_PREFIX));
        assert_eq!(id_str.len(), REQUEST_ID_PREFIX.len() + 32);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let mut maker = MakeProductsRequestId;
        let request = Request::builder().body(()).unwrap();

        let a = maker.make_request_id(&request).unwrap().into_header_value();
        let b = maker.make_request_id(&request).unwrap().into_header_value();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sensitive_headers_constant() {
        assert!(SENSITIVE_HEADERS.contains(&"authorization"));
        assert!(SENSITIVE_HEADERS.contains(&"cookie"));
    }
}
