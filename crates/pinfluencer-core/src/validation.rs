//! Payload validation against record descriptors.
//!
//! A [`PayloadValidator`] checks an incoming JSON body against the
//! [`Schema`] of the request view it will be mapped into: required fields,
//! value types, enum membership and numeric ranges. Unknown fields are
//! accepted here and dropped later by the mapper.
//!
//! # Example
//!
//! ```
//! use pinfluencer_core::schema::Describe;
//! use pinfluencer_core::validation::PayloadValidator;
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Default, Serialize, Deserialize, Describe)]
//! struct Notification {
//!     receiver_id: String,
//!     title: String,
//! }
//!
//! let validator = PayloadValidator::for_record::<Notification>().require(&["receiver_id"]);
//!
//! assert!(validator.validate(&json!({"receiver_id": "abc"})).is_ok());
//! assert!(validator.validate(&json!({"title": "hi"})).is_err());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::DateTime;
use serde_json::Value;
use thiserror::Error;

use crate::schema::{Kind, Record, Schema};

/// A validation error from schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation error at '{path}': {message}")]
pub struct ValidationError {
    /// The JSON path where the error occurred.
    pub path: String,
    /// The error message.
    pub message: String,
}

impl ValidationError {
    fn at(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Validates JSON payloads against a record descriptor.
#[derive(Debug, Clone)]
pub struct PayloadValidator {
    schema: &'static Schema,
    required: BTreeSet<&'static str>,
    ranges: BTreeMap<&'static str, (f64, f64)>,
}

impl PayloadValidator {
    /// Creates a validator for the fields of `T`; nothing is required yet.
    #[must_use]
    pub fn for_record<T: Record>() -> Self {
        Self {
            schema: T::schema(),
            required: BTreeSet::new(),
            ranges: BTreeMap::new(),
        }
    }

    /// Marks fields as required (present and non-null).
    #[must_use]
    pub fn require(mut self, fields: &[&'static str]) -> Self {
        self.required.extend(fields.iter().copied());
        self
    }

    /// Marks every declared field as required.
    #[must_use]
    pub fn require_all(mut self) -> Self {
        self.required.extend(self.schema.field_names());
        self
    }

    /// Constrains a numeric field to the inclusive range `[min, max]`.
    #[must_use]
    pub fn range(mut self, field: &'static str, min: f64, max: f64) -> Self {
        self.ranges.insert(field, (min, max));
        self
    }

    /// Returns the descriptor being validated against.
    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Validates a payload.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in field declaration order.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationError> {
        let Value::Object(fields) = payload else {
            return Err(ValidationError::at(
                "$",
                format!("expected object, got {}", value_type_name(payload)),
            ));
        };

        for name in &self.required {
            if self.schema.field(name).is_none() {
                return Err(ValidationError::at(
                    "$",
                    format!("required field '{name}' is not declared by {}", self.schema.name()),
                ));
            }
            if fields.get(*name).map_or(true, Value::is_null) {
                return Err(ValidationError::at(
                    &format!("$.{name}"),
                    "required field is missing",
                ));
            }
        }

        for field in self.schema.fields() {
            let Some(value) = fields.get(field.name) else {
                continue;
            };
            let path = format!("$.{}", field.name);
            validate_kind(value, &field.kind, &path)?;

            if let Some((min, max)) = self.ranges.get(field.name) {
                if let Some(n) = value.as_f64() {
                    if n < *min || n > *max {
                        return Err(ValidationError::at(
                            &path,
                            format!("value {n} is outside [{min}, {max}]"),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn validate_kind(value: &Value, kind: &Kind, path: &str) -> Result<(), ValidationError> {
    if value.is_null() {
        return Ok(());
    }

    let mismatch = || {
        ValidationError::at(
            path,
            format!(
                "expected {}, got {}",
                kind.type_name(),
                value_type_name(value)
            ),
        )
    };

    match kind {
        Kind::Str => value.as_str().map(|_| ()).ok_or_else(mismatch),
        Kind::Int => {
            if value.is_i64() || value.is_u64() {
                Ok(())
            } else {
                Err(mismatch())
            }
        }
        Kind::Float => {
            if value.is_number() {
                Ok(())
            } else {
                Err(mismatch())
            }
        }
        Kind::Bool => value.as_bool().map(|_| ()).ok_or_else(mismatch),
        Kind::DateTime => {
            let s = value.as_str().ok_or_else(mismatch)?;
            DateTime::parse_from_rfc3339(s)
                .map(|_| ())
                .map_err(|e| ValidationError::at(path, format!("invalid timestamp: {e}")))
        }
        Kind::Enum(tags) => {
            let s = value.as_str().ok_or_else(mismatch)?;
            if tags.contains(&s) {
                Ok(())
            } else {
                Err(ValidationError::at(
                    path,
                    format!("'{s}' is not one of {}", tags.join(", ")),
                ))
            }
        }
        Kind::Optional(inner) => validate_kind(value, inner, path),
        Kind::List(item) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .enumerate()
                .try_for_each(|(i, element)| validate_kind(element, item, &format!("{path}[{i}]")))
        }
        Kind::Record(schema) => {
            let fields = value.as_object().ok_or_else(mismatch)?;
            schema().fields().iter().try_for_each(|field| {
                fields.get(field.name).map_or(Ok(()), |nested| {
                    validate_kind(nested, &field.kind, &format!("{path}.{}", field.name))
                })
            })
        }
        Kind::Any => Ok(()),
    }
}

/// Returns a human-readable name for a JSON value's type.
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Describe;
    use chrono::Utc;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Describe)]
    enum Category {
        #[default]
        Food,
        Fashion,
    }

    #[derive(Debug, Default, Serialize, Deserialize, Describe)]
    struct Image {
        key: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize, Describe)]
    struct Payload {
        name: String,
        count: i64,
        split: f64,
        active: bool,
        created: chrono::DateTime<Utc>,
        categories: Vec<Category>,
        image: Option<Image>,
    }

    fn validator() -> PayloadValidator {
        PayloadValidator::for_record::<Payload>()
            .require(&["name", "categories"])
            .range("split", 0.0, 1.0)
    }

    fn valid() -> Value {
        json!({
            "name": "acme",
            "count": 3,
            "split": 0.5,
            "active": true,
            "created": "2024-01-01T00:00:00Z",
            "categories": ["Food", "Fashion"],
            "image": {"key": "brands/1/logo.png"}
        })
    }

    #[test]
    fn test_valid_payload() {
        assert!(validator().validate(&valid()).is_ok());
    }

    #[test]
    fn test_unknown_fields_accepted() {
        let mut payload = valid();
        payload["unexpected"] = json!(1);
        assert!(validator().validate(&payload).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let err = validator()
            .validate(&json!({"categories": []}))
            .unwrap_err();
        assert_eq!(err.path, "$.name");
        assert!(err.message.contains("missing"));
    }

    #[test]
    fn test_null_required_field() {
        let mut payload = valid();
        payload["name"] = Value::Null;
        assert!(validator().validate(&payload).is_err());
    }

    #[test]
    fn test_wrong_type() {
        let mut payload = valid();
        payload["count"] = json!("three");
        let err = validator().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.count");
        assert!(err.message.contains("expected integer"));
    }

    #[test]
    fn test_enum_membership() {
        let mut payload = valid();
        payload["categories"] = json!(["Food", "Cars"]);
        let err = validator().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.categories[1]");
        assert!(err.message.contains("'Cars'"));
    }

    #[test]
    fn test_nested_record_type_checked() {
        let mut payload = valid();
        payload["image"] = json!({"key": 5});
        let err = validator().validate(&payload).unwrap_err();
        assert_eq!(err.path, "$.image.key");
    }

    #[test]
    fn test_invalid_timestamp() {
        let mut payload = valid();
        payload["created"] = json!("yesterday");
        assert!(validator().validate(&payload).is_err());
    }

    #[test]
    fn test_range() {
        let mut payload = valid();
        payload["split"] = json!(1.5);
        let err = validator().validate(&payload).unwrap_err();
        assert!(err.message.contains("outside"));
    }

    #[test]
    fn test_non_object_payload() {
        let err = validator().validate(&json!([1])).unwrap_err();
        assert_eq!(err.path, "$");
    }

    #[test]
    fn test_require_all() {
        let validator = PayloadValidator::for_record::<Image>().require_all();
        assert!(validator.validate(&json!({})).is_err());
        assert!(validator.validate(&json!({"key": "k"})).is_ok());
    }

    #[test]
    fn test_undeclared_required_field() {
        let validator = PayloadValidator::for_record::<Image>().require(&["nope"]);
        let err = validator.validate(&json!({"key": "k"})).unwrap_err();
        assert!(err.message.contains("not declared"));
    }
}
