//! Structural object mapping between records.
//!
//! [`ObjectMapper`] copies fields by name from a source record (or a JSON
//! mapping) into a freshly defaulted destination record, driven entirely by
//! the destination's [`Schema`]:
//!
//! - a field present in both is copied,
//! - a field only in the destination keeps its default,
//! - a field only in the source is dropped,
//! - a record-typed field (or a list or option of records) is mapped
//!   recursively with the same rule lookup instead of being copied.
//!
//! Pairs that need more than field-by-name copying register a conversion in
//! [`MappingRules`]. Rules are consulted for the top-level pair and for every
//! nested pair whose source type is known.
//!
//! # Example
//!
//! ```
//! use pinfluencer_core::mapper::ObjectMapper;
//! use pinfluencer_core::schema::Describe;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Describe)]
//! struct BrandRequest {
//!     brand_name: String,
//!     first_name: String,
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Describe)]
//! struct Brand {
//!     id: String,
//!     brand_name: String,
//! }
//!
//! let mapper = ObjectMapper::default();
//! let request = BrandRequest { brand_name: "acme".into(), first_name: "ann".into() };
//! let brand: Brand = mapper.map(&request).unwrap();
//!
//! assert_eq!(brand.brand_name, "acme");
//! assert_eq!(brand.id, "");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{Kind, Record, Schema};

/// Errors raised while mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The source of a record mapping was not a JSON object.
    #[error("cannot map {target}: source is not a record")]
    NotARecord {
        /// Destination record name.
        target: &'static str,
    },

    /// A registered rule rejected its input.
    #[error("mapping rule {from} -> {to} failed: {message}")]
    Rule {
        /// Source record name.
        from: &'static str,
        /// Destination record name.
        to: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The mapped value did not fit the destination type.
    #[error("mapped value does not fit destination: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A type-erased conversion between two record types.
pub type RuleFn = Arc<dyn Fn(&Value, &ObjectMapper) -> Result<Value, MappingError> + Send + Sync>;

/// Registered conversions keyed by `(source, destination)` record name.
///
/// Built once at startup and read-only afterwards.
#[derive(Default, Clone)]
pub struct MappingRules {
    rules: HashMap<(&'static str, &'static str), RuleFn>,
}

impl MappingRules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a typed conversion from `F` to `T`.
    ///
    /// The rule receives the mapper so it can delegate nested fields back to
    /// structural mapping.
    pub fn add<F, T, R>(&mut self, rule: R) -> &mut Self
    where
        F: Record,
        T: Record,
        R: Fn(F, &ObjectMapper) -> Result<T, MappingError> + Send + Sync + 'static,
    {
        let erased: RuleFn = Arc::new(move |source: &Value, mapper: &ObjectMapper| {
            let typed: F = serde_json::from_value(source.clone())?;
            let mapped = rule(typed, mapper)?;
            Ok(serde_json::to_value(mapped)?)
        });
        self.rules
            .insert((F::schema().name(), T::schema().name()), erased);
        self
    }

    /// Looks up the rule for a pair of record names.
    #[must_use]
    pub fn get(&self, from: &'static str, to: &'static str) -> Option<&RuleFn> {
        self.rules.get(&(from, to))
    }

    /// Returns `true` if a rule exists for `F -> T`.
    #[must_use]
    pub fn contains<F: Record, T: Record>(&self) -> bool {
        self.get(F::schema().name(), T::schema().name()).is_some()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for MappingRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.rules.keys().collect();
        pairs.sort_unstable();
        f.debug_struct("MappingRules").field("pairs", &pairs).finish()
    }
}

/// Stateless structural mapper, shared process-wide.
#[derive(Debug, Default, Clone)]
pub struct ObjectMapper {
    rules: Arc<MappingRules>,
}

impl ObjectMapper {
    /// Creates a mapper consulting `rules`.
    #[must_use]
    pub fn new(rules: MappingRules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn rules(&self) -> &MappingRules {
        &self.rules
    }

    /// Maps a record into a new instance of `T`.
    pub fn map<F: Record, T: Record>(&self, from: &F) -> Result<T, MappingError> {
        let source = serde_json::to_value(from)?;
        let mapped = self.map_value(&source, Some(F::schema()), T::schema())?;
        Ok(serde_json::from_value(mapped)?)
    }

    /// Maps a JSON mapping into a new instance of `T`.
    ///
    /// The source has no descriptor, so only structural copying applies.
    pub fn map_from_dict<T: Record>(&self, from: &Value) -> Result<T, MappingError> {
        let mapped = self.map_value(from, None, T::schema())?;
        Ok(serde_json::from_value(mapped)?)
    }

    /// Maps every element of a slice.
    pub fn map_all<F: Record, T: Record>(&self, from: &[F]) -> Result<Vec<T>, MappingError> {
        from.iter().map(|item| self.map(item)).collect()
    }

    /// Maps a JSON value against a destination schema.
    pub fn map_value(
        &self,
        source: &Value,
        source_schema: Option<&'static Schema>,
        target: &'static Schema,
    ) -> Result<Value, MappingError> {
        if let Some(rule) = source_schema.and_then(|s| self.rules.get(s.name(), target.name())) {
            return rule(source, self);
        }

        let Value::Object(fields) = source else {
            return Err(MappingError::NotARecord {
                target: target.name(),
            });
        };

        let mut mapped = match target.defaults() {
            Value::Object(defaults) => defaults,
            _ => Map::new(),
        };

        for field in target.fields() {
            let Some(value) = fields.get(field.name) else {
                continue;
            };
            let source_kind = source_schema
                .and_then(|schema| schema.field(field.name))
                .map(|f| &f.kind);
            let converted = self.convert(value, source_kind, &field.kind)?;
            mapped.insert(field.name.to_string(), converted);
        }

        Ok(Value::Object(mapped))
    }

    fn convert(
        &self,
        value: &Value,
        source_kind: Option<&Kind>,
        target_kind: &Kind,
    ) -> Result<Value, MappingError> {
        match target_kind {
            Kind::Optional(inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    self.convert(value, source_kind.map(Kind::unwrap_optional), inner)
                }
            }
            Kind::Record(schema) => {
                let schema = schema();
                if value.is_null() {
                    return Ok(schema.defaults());
                }
                let source_schema = source_kind.and_then(Kind::record_schema);
                self.map_value(value, source_schema, schema)
            }
            Kind::List(item) if item.is_structured() => match value {
                Value::Array(items) => {
                    let source_item = source_kind.and_then(Kind::item);
                    items
                        .iter()
                        .map(|element| self.convert(element, source_item, item))
                        .collect::<Result<Vec<_>, _>>()
                        .map(Value::Array)
                }
                other => Ok(other.clone()),
            },
            _ => Ok(value.clone()),
        }
    }
}
