//! Field rules for product requests
//!
//! Rules look at raw JSON values and coerce them the way a loosely typed
//! client expects: a price of `"20"` is as good as `20`, and `0` is present
//! but not positive.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

use super::{Location, ValidationError};
use crate::models::ProductPayload;

static INT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("integer regex is valid"));

static NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("numeric regex is valid"));

static DECIMAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+[.]?[0-9]*|[.][0-9]+)([eE][+-]?[0-9]+)?$")
        .expect("decimal regex is valid")
});

/// Product id taken from the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub i64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single body rule: the field it reads, the check, and the message on failure
struct Rule {
    field: &'static str,
    check: fn(Option<&Value>) -> bool,
    msg: &'static str,
}

/// Create and replace rules, in the order their errors are reported
const PAYLOAD_RULES: [Rule; 4] = [
    Rule {
        field: "name",
        check: not_empty,
        msg: "Product name is empty",
    },
    Rule {
        field: "price",
        check: is_numeric,
        msg: "Price value must be numeric",
    },
    Rule {
        field: "price",
        check: not_empty,
        msg: "Product price is empty",
    },
    Rule {
        field: "price",
        check: is_positive,
        msg: "Price can not be negative",
    },
];

/// String form of a value as the rules see it
///
/// Absent and `null` values read as empty; arrays and objects read as a
/// non-empty, non-numeric string.
pub fn text_view(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(number_text(n)),
        Some(Value::Bool(b)) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Some(Value::Array(_) | Value::Object(_)) => Cow::Borrowed("[object Object]"),
    }
}

/// Decimal text of a JSON number
///
/// Integers print as-is. Floats print plain between `1e-7` and `1e21` and in
/// `e+`/`e-` exponent form outside that range, so `0.000001` reads as
/// `"0.000001"` rather than `"1e-6"`.
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(x) if n.is_f64() => float_text(x),
        _ => n.to_string(),
    }
}

fn float_text(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return if x.is_nan() {
            "NaN".to_string()
        } else if x > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let sign = if x < 0.0 { "-" } else { "" };
    // Shortest round-trip digits, e.g. "1.2345e2"
    let scientific = format!("{:e}", x.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp_sign = if n - 1 < 0 { "-" } else { "+" };
        let head = &digits[..1];
        let tail = &digits[1..];
        if tail.is_empty() {
            format!("{}e{}{}", head, exp_sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", head, tail, exp_sign, (n - 1).abs())
        }
    };

    format!("{}{}", sign, body)
}

/// Loose numeric reading of a value, `NaN` when it has none
pub fn loose_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number_text(s),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Null) => 0.0,
        None | Some(Value::Array(_) | Value::Object(_)) => f64::NAN,
    }
}

fn parse_number_text(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if DECIMAL_REGEX.is_match(text) => text.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Text view has at least one character (whitespace counts)
pub fn not_empty(value: Option<&Value>) -> bool {
    !text_view(value).is_empty()
}

/// Text view is a plain decimal number
pub fn is_numeric(value: Option<&Value>) -> bool {
    NUMERIC_REGEX.is_match(&text_view(value))
}

/// Loose numeric reading is strictly greater than zero
pub fn is_positive(value: Option<&Value>) -> bool {
    loose_number(value) > 0.0
}

/// Check the raw `id` path segment
///
/// `Ok(None)` means the segment is a well-formed integer that no stored
/// product can carry (outside the `i64` range).
pub fn validate_id(raw: &str) -> Result<Option<ProductId>, ValidationError> {
    if !INT_REGEX.is_match(raw) {
        return Err(ValidationError::new(
            Location::Params,
            "id",
            Some(Value::String(raw.to_string())),
            "ID not valid",
        ));
    }
    Ok(raw.parse::<i64>().ok().map(ProductId))
}

/// Run every payload rule against a request body
///
/// Bodies that are not JSON objects are treated as having no fields.
pub fn validate_payload(body: &Value) -> Result<ProductPayload, Vec<ValidationError>> {
    let field = |name: &str| body.as_object().and_then(|map| map.get(name));

    let errors: Vec<ValidationError> = PAYLOAD_RULES
        .iter()
        .filter_map(|rule| {
            let value = field(rule.field);
            (!(rule.check)(value))
                .then(|| ValidationError::new(Location::Body, rule.field, value.cloned(), rule.msg))
        })
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductPayload {
        name: text_view(field("name")).into_owned(),
        price: loose_number(field("price")),
        availability: field("availability").and_then(Value::as_bool),
    })
}
