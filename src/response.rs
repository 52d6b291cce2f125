//! Structural checks on the raw status payload.
//!
//! Nothing downstream reads a field of the response until `validate` has
//! confirmed the top-level shape. A well-formed response with no homeworks is
//! a normal outcome and comes back as `Homeworks::Empty`, not as an error.
use crate::error::ResponseError;
use serde_json::Value;

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";

/// Result of validating a status response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Homeworks<'a> {
    /// `homeworks` is present and empty: no new statuses since `from_date`.
    Empty,
    /// The most recent review item (first element of `homeworks`).
    Latest(&'a Value),
}

/// Check the response shape and pick out the most recent review item.
pub fn validate(response: &Value) -> Result<Homeworks<'_>, ResponseError> {
    let object = response.as_object().ok_or(ResponseError::DataType {
        field: "response",
        expected: "object",
        found: json_type(response),
    })?;
    let homeworks = object.get(HOMEWORKS_KEY).ok_or(ResponseError::NoKey)?;
    let items = homeworks.as_array().ok_or(ResponseError::DataType {
        field: HOMEWORKS_KEY,
        expected: "array",
        found: json_type(homeworks),
    })?;
    Ok(match items.first() {
        Some(item) => Homeworks::Latest(item),
        None => Homeworks::Empty,
    })
}

/// The server-side timestamp to use as the next `from_date`, if reported.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE_KEY).and_then(Value::as_i64)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
