use serde_json::Value;
use thiserror::Error;

/// Problems with the `form_data` payload as a whole.
///
/// These are the only failures that stop a fill pass before it starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FormDataError {
    #[error("form_data is missing")]
    Missing,
    #[error("form_data must be an object, got {found}")]
    NotAnObject { found: &'static str },
}

pub type Result<T> = std::result::Result<T, FormDataError>;

/// Describes the JSON type of a value for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
