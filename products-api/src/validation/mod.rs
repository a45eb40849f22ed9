//! Request validation
//!
//! [`rules`] holds the per-field checks as pure functions; [`gate`] wires them
//! into axum extractors whose rejection is the 400 response. Every rule bound
//! to a request runs, and each failing rule yields exactly one
//! [`ValidationError`] in declaration order.

pub mod gate;
pub mod rules;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use gate::{ValidProductId, ValidProductPayload, ValidProductUpdate};
pub use rules::{validate_id, validate_payload, ProductId};

/// Where the offending value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// A path parameter
    Params,
    /// The JSON request body
    Body,
}

/// One failed rule
///
/// Serialized as `{ "type": "field", "value", "msg", "path", "location" }`;
/// `value` is omitted when the field was absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl ValidationError {
    pub fn new(
        location: Location,
        path: impl Into<String>,
        value: Option<Value>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            kind: "field".to_string(),
            value,
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }
}
