//! Test data generation over record descriptors.
//!
//! [`AutoFixture`] fills every declared field of a [`Record`] either with
//! predictable values derived from a seed and a number, so tests can assert
//! exact values, or with bounded random values.
//!
//! # Example
//!
//! ```
//! use pinfluencer_core::fixtures::AutoFixture;
//! use pinfluencer_core::schema::Describe;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Describe)]
//! struct Brand {
//!     brand_name: String,
//!     values: Vec<String>,
//! }
//!
//! let brand: Brand = AutoFixture::new().seed("x").num(2).create().unwrap();
//! assert_eq!(brand.brand_name, "brand_namex");
//! assert_eq!(brand.values, vec!["valuesx0", "valuesx1"]);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::schema::{Kind, Record, Schema};

/// Default upper bound for random list lengths.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Default record nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Errors raised while generating fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A seed was given without a number.
    #[error("seed and num must be both set to create predictable data")]
    IncompleteSeed,

    /// The generated value does not deserialize into the target type.
    #[error("generated value does not fit the target type: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Generates populated records.
#[derive(Debug, Clone)]
pub struct AutoFixture {
    seed: Option<String>,
    num: Option<usize>,
    list_limit: usize,
    max_depth: usize,
}

impl Default for AutoFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoFixture {
    /// Creates a generator producing random data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seed: None,
            num: None,
            list_limit: DEFAULT_LIST_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the seed for predictable data.
    #[must_use]
    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Sets the number for predictable data.
    #[must_use]
    pub fn num(mut self, num: usize) -> Self {
        self.num = Some(num);
        self
    }

    /// Sets the upper bound for random list lengths.
    #[must_use]
    pub fn list_limit(mut self, list_limit: usize) -> Self {
        self.list_limit = list_limit;
        self
    }

    /// Sets how deep nested records are populated.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Creates one populated `T`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::IncompleteSeed`] when only a seed was given.
    pub fn create<T: Record>(&self) -> Result<T, FixtureError> {
        let value = self.create_value(T::schema())?;
        Ok(serde_json::from_value(value)?)
    }

    /// Creates `amount` populated values of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::IncompleteSeed`] when only a seed was given.
    pub fn create_many<T: Record>(&self, amount: usize) -> Result<Vec<T>, FixtureError> {
        (0..amount).map(|_| self.create()).collect()
    }

    /// Creates a populated JSON object for `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::IncompleteSeed`] when only a seed was given.
    pub fn create_value(&self, schema: &'static Schema) -> Result<Value, FixtureError> {
        let mode = match (&self.seed, self.num) {
            (Some(seed), Some(num)) => Mode::Predictable { seed, num },
            (Some(_), None) => return Err(FixtureError::IncompleteSeed),
            _ => Mode::Random {
                list_limit: self.list_limit,
            },
        };
        Ok(Generator {
            mode,
            max_depth: self.max_depth,
        }
        .record(schema, 0))
    }
}

enum Mode<'a> {
    Predictable { seed: &'a str, num: usize },
    Random { list_limit: usize },
}

struct Generator<'a> {
    mode: Mode<'a>,
    max_depth: usize,
}

impl Generator<'_> {
    fn record(&self, schema: &'static Schema, nest: usize) -> Value {
        if nest > self.max_depth {
            return schema.defaults();
        }
        let fields = schema
            .fields()
            .iter()
            .map(|field| (field.name.to_string(), self.field(field.name, &field.kind, nest)))
            .collect::<Map<String, Value>>();
        Value::Object(fields)
    }

    fn field(&self, key: &str, kind: &Kind, nest: usize) -> Value {
        match kind {
            Kind::Optional(inner) => self.field(key, inner, nest),
            Kind::List(item) => {
                let len = match self.mode {
                    Mode::Predictable { num, .. } => num,
                    Mode::Random { list_limit } => random_below(list_limit + 1),
                };
                if matches!(item.unwrap_optional(), Kind::Record(_)) && nest >= self.max_depth {
                    return json!([]);
                }
                Value::Array((0..len).map(|i| self.item(key, item, i, nest)).collect())
            }
            scalar => self.scalar(key, scalar, nest),
        }
    }

    fn item(&self, key: &str, kind: &Kind, index: usize, nest: usize) -> Value {
        match (&self.mode, kind.unwrap_optional()) {
            (Mode::Predictable { seed, .. }, Kind::Str) => json!(format!("{key}{seed}{index}")),
            (Mode::Predictable { num, .. }, Kind::Int) => json!(num + index),
            (Mode::Predictable { .. }, Kind::DateTime) => json!(fixed_timestamp()),
            (_, Kind::List(_)) => json!([]),
            (_, other) => self.scalar(key, other, nest),
        }
    }

    fn scalar(&self, key: &str, kind: &Kind, nest: usize) -> Value {
        match &self.mode {
            Mode::Predictable { seed, num } => {
                let num = *num;
                match kind {
                    Kind::Str => json!(format!("{key}{seed}")),
                    Kind::Int => json!(num),
                    Kind::Float => json!(predictable_float(num)),
                    Kind::Bool => json!(num != 0),
                    Kind::DateTime => json!(predictable_timestamp(num)),
                    Kind::Enum(tags) => json!(tags[num % tags.len()]),
                    Kind::Record(schema) => self.record(schema(), nest + 1),
                    Kind::Optional(_) | Kind::List(_) | Kind::Any => Value::Null,
                }
            }
            Mode::Random { .. } => match kind {
                Kind::Str => json!(format!("{key}{}", random_word())),
                Kind::Int => json!(random_below(101)),
                Kind::Float => json!(random_unit() * 100.0),
                Kind::Bool => json!(random_below(2) == 1),
                Kind::DateTime => json!(Utc::now()),
                Kind::Enum(tags) => json!(tags[random_below(tags.len())]),
                Kind::Record(schema) => self.record(schema(), nest + 1),
                Kind::Optional(_) | Kind::List(_) | Kind::Any => Value::Null,
            },
        }
    }
}

/// `num` followed by `num` repetitions of itself as decimals, e.g. 2 -> 2.22.
fn predictable_float(num: usize) -> f64 {
    let decimals = num.to_string().repeat(num);
    let decimals = if decimals.is_empty() { "0".to_string() } else { decimals };
    format!("{num}.{decimals}").parse().unwrap_or_default()
}

fn predictable_timestamp(num: usize) -> DateTime<Utc> {
    let n = u32::try_from(num).unwrap_or(u32::MAX);
    let year = i32::try_from(num.clamp(1, 9999)).unwrap_or(1);
    Utc.with_ymd_and_hms(
        year,
        (n.saturating_sub(1) % 12) + 1,
        (n.saturating_sub(1) % 28) + 1,
        n % 24,
        n % 60,
        n % 60,
    )
    .single()
    .unwrap_or_default()
}

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2, 2, 2, 2, 2, 2)
        .single()
        .unwrap_or_default()
}

fn random_u64() -> u64 {
    let bits = Uuid::new_v4().as_u128();
    (bits >> 64) as u64 ^ bits as u64
}

fn random_below(bound: usize) -> usize {
    if bound == 0 {
        return 0;
    }
    (random_u64() % bound as u64) as usize
}

fn random_unit() -> f64 {
    random_u64() as f64 / u64::MAX as f64
}

fn random_word() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
