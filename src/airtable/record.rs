use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a remote table: the source's opaque record id plus a free-form
/// field map.
///
/// The accessors below implement the crate's field coercion policy: a field
/// that is missing, empty, or of the wrong shape yields `None` (or an empty
/// collection), never an error. Numeric accessors never produce NaN.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Non-empty string value of a field.
    pub fn string_field(&self, name: &str) -> Option<String> {
        match self.fields.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Finite numeric value of a field; numbers and numeric strings both
    /// coerce, anything else is absent.
    pub fn number_field(&self, name: &str) -> Option<f64> {
        let value = match self.fields.get(name) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// Non-negative integer value of a field (counts, years).
    pub fn count_field(&self, name: &str) -> Option<u32> {
        self.number_field(name)
            .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64)
            .map(|v| v as u32)
    }

    /// Boolean value of a field; anything but an explicit `true` is `false`.
    pub fn bool_field(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(Value::Bool(true)))
    }

    /// First id of a linked-record field (an array of record id strings).
    pub fn linked_id(&self, name: &str) -> Option<String> {
        match self.fields.get(name) {
            Some(Value::Array(ids)) => ids.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }

    /// URL of a field holding either a plain string or an attachment list
    /// (`[{ "url": ... }, ...]`), as the source stores uploaded images.
    pub fn attachment_url(&self, name: &str) -> Option<String> {
        match self.fields.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Array(attachments)) => attachments
                .first()
                .and_then(|a| a.get("url"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    /// Comma-separated list field, split, trimmed, empties dropped.
    pub fn list_field(&self, name: &str) -> Vec<String> {
        self.string_field(name)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
