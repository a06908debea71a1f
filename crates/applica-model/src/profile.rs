//! Profile records as delivered by the backend in `form_data`.
//!
//! A profile is a flat, ordered set of answers keyed by the backend's field
//! names. Key order is the caller's order and is preserved end to end: it
//! decides which field claims a form control first when two could match.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{FormDataError, Result, json_kind};
use crate::field::FieldKey;

/// A single `form_data` value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl FieldValue {
    /// Converts a JSON value.
    ///
    /// Arrays and objects become the text a page would render for them:
    /// array items joined with `,` (null items empty, nested arrays
    /// flattened the same way), objects as `[object Object]`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => FieldValue::Number(n.clone()),
            Value::String(s) => FieldValue::Text(s.clone()),
            nested => FieldValue::Text(rendered_text(nested)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The text written into text-like controls.
    ///
    /// `true` becomes `"yes"`, `false` becomes `""`, numbers use their decimal
    /// form, strings are trimmed.
    pub fn fill_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(true) => "yes".to_string(),
            FieldValue::Bool(false) => String::new(),
            FieldValue::Number(n) => number_text(n),
            FieldValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Checked state for checkboxes and radios.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Decimal text of a JSON number as a page would show it.
///
/// Integers print exactly. Floats use the shortest round-trip digits: plain
/// notation for magnitudes in `[1e-6, 1e21)`, exponent notation outside
/// (`1.5e-7`, `1e+21`). Integral floats have no fractional part.
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map_or_else(|| n.to_string(), float_text)
}

fn float_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return f.to_string();
    }
    let sign = if f < 0.0 { "-" } else { "" };
    // Shortest round-trip digits, e.g. "1.5e-7" or "1e21".
    let scientific = format!("{:e}", f.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digit string.
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let exp_sign = if n - 1 < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{}", (n - 1).abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{}", (n - 1).abs())
        }
    };
    format!("{sign}{body}")
}

/// Text rendering of an array or object value.
fn rendered_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(rendered_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// One key/value pair of a profile, in caller order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub key: String,
    pub value: FieldValue,
}

impl ProfileEntry {
    /// The known field this entry answers, if any.
    pub fn field(&self) -> Option<FieldKey> {
        FieldKey::from_key(&self.key)
    }
}

/// Ordered `form_data` record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ProfileRecord {
    entries: Vec<ProfileEntry>,
}

impl ProfileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a bare `form_data` object; `null` counts as missing.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            Value::Null => Err(FormDataError::Missing),
            other => Err(FormDataError::NotAnObject {
                found: json_kind(other),
            }),
        }
    }

    /// Builds a record from a backend response carrying a `form_data` member.
    pub fn from_response(value: &Value) -> Result<Self> {
        value
            .get("form_data")
            .map_or(Err(FormDataError::Missing), Self::from_json)
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let entries = map
            .iter()
            .map(|(key, value)| ProfileEntry {
                key: key.clone(),
                value: FieldValue::from_json(value),
            })
            .collect();
        Self { entries }
    }

    /// Builder-style insert, mainly for tests and callers assembling records by hand.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Replaces the value in place when the key exists, otherwise appends it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(ProfileEntry { key, value }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn get_field(&self, field: FieldKey) -> Option<&FieldValue> {
        self.get(field.as_str())
    }

    /// True when the key is missing or explicitly null.
    pub fn is_absent(&self, key: &str) -> bool {
        self.get(key).is_none_or(FieldValue::is_null)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ProfileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with a non-null value.
    pub fn non_null_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.value.is_null())
            .count()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|entry| (entry.key.clone(), entry.value.to_json()))
                .collect(),
        )
    }
}

impl TryFrom<Value> for ProfileRecord {
    type Error = FormDataError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(&value)
    }
}

impl Serialize for ProfileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value.to_json())?;
        }
        map.end()
    }
}
