//! Validation gate extractors
//!
//! Each extractor runs the rules bound to its route and rejects with
//! [`ApiError`] before the handler is entered. Handlers only ever see parsed
//! values.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use serde_json::Value;

use super::rules::{validate_id, validate_payload, ProductId};
use super::ValidationError;
use crate::handlers::{ApiError, ApiErrorKind, ApiOperation};
use crate::models::ProductPayload;

/// Path `id` that passed the integer rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidProductId(pub ProductId);

/// Create body that passed every payload rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProductPayload(pub ProductPayload);

/// Replace request: path `id` and body checked together
///
/// Errors from both are reported in one response, id first.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProductUpdate {
    pub id: ProductId,
    pub payload: ProductPayload,
}

async fn raw_id<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<String, ApiError> {
    Path::<String>::from_request_parts(parts, state)
        .await
        .map(|Path(raw)| raw)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// `Some(id)` for a usable id, `None` when no stored product can match
fn check_id(raw: &str, errors: &mut Vec<ValidationError>) -> Option<ProductId> {
    match validate_id(raw) {
        Ok(id) => id,
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

impl<S> FromRequestParts<S> for ValidProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_id(parts, state).await?;

        let mut errors = Vec::new();
        match check_id(&raw, &mut errors) {
            Some(id) => Ok(Self(id)),
            None if !errors.is_empty() => Err(ApiError::validation_failed(errors)),
            None => Err(ApiError::unknown_id()),
        }
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Read the request body as JSON
///
/// A body without a JSON content type, or an empty one, reads as `{}`.
/// Rejections are tagged with `operation`.
async fn json_body<S: Send + Sync>(
    req: Request,
    state: &S,
    operation: ApiOperation,
) -> Result<Value, ApiError> {
    let is_json = is_json_content_type(req.headers());

    let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
        let kind = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiErrorKind::PayloadTooLarge
        } else {
            ApiErrorKind::BadRequest
        };
        ApiError::new(operation, kind, rejection.body_text())
    })?;

    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| {
            ApiError::bad_request(format!("Malformed JSON body: {}", e)).with_operation(operation)
        })
}

impl<S> FromRequest<S> for ValidProductPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = json_body(req, state, ApiOperation::Create).await?;

        validate_payload(&body)
            .map(Self)
            .map_err(ApiError::validation_failed)
    }
}

impl<S> FromRequest<S> for ValidProductUpdate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let raw = raw_id(&mut parts, state).await?;
        let req = Request::from_parts(parts, body);
        let body = json_body(req, state, ApiOperation::Update).await?;

        let mut errors = Vec::new();
        let id = check_id(&raw, &mut errors);
        let payload = match validate_payload(&body) {
            Ok(payload) => Some(payload),
            Err(body_errors) => {
                errors.extend(body_errors);
                None
            }
        };

        if !errors.is_empty() {
            return Err(ApiError::validation_failed(errors).with_operation(ApiOperation::Update));
        }

        match (id, payload) {
            (Some(id), Some(payload)) => Ok(Self { id, payload }),
            _ => Err(ApiError::unknown_id().with_operation(ApiOperation::Update)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(&headers("application/json")));
        assert!(is_json_content_type(&headers("application/json; charset=utf-8")));
        assert!(is_json_content_type(&headers("Application/JSON")));
        assert!(is_json_content_type(&headers("application/merge-patch+json")));
        assert!(!is_json_content_type(&headers("text/plain")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn test_non_json_body_reads_as_empty_object() {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "text/plain")
            .body(axum::body::Body::from("name=Monitor"))
            .unwrap();
        let body = json_body(req, &(), ApiOperation::Create).await.unwrap();
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{\"name\":"))
            .unwrap();
        let err = json_body(req, &(), ApiOperation::Create).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::BadRequest);
        assert_eq!(err.operation, ApiOperation::Create);
        assert!(err.message.starts_with("Malformed JSON body"));
    }

    #[tokio::test]
    async fn test_malformed_update_body_is_tagged_update() {
        let req = Request::builder()
            .method("PUT")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{\"price\": }"))
            .unwrap();
        let err = json_body(req, &(), ApiOperation::Update).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::BadRequest);
        assert_eq!(err.operation, ApiOperation::Update);
        assert!(err.to_string().contains("during update"));
    }

    #[tokio::test]
    async fn test_payload_extractor_rejects_with_rule_errors() {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(r#"{"name":"Monitor","price":"abc"}"#))
            .unwrap();
        let err = ValidProductPayload::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::ValidationFailed);
        assert_eq!(err.errors.len(), 2);
    }
}
