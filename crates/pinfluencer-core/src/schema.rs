//! Compile-time record descriptors.
//!
//! Every wire view and domain model derives [`Describe`], which emits a
//! static [`Schema`] listing its fields and their [`Kind`]. The object
//! mapper, the payload validator and the fixture generator all walk these
//! descriptors instead of inspecting values at runtime.
//!
//! # Example
//!
//! ```
//! use pinfluencer_core::schema::{Describe, Kind, Record};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Describe)]
//! struct Address {
//!     street: String,
//!     number: i64,
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Describe)]
//! struct Person {
//!     name: String,
//!     tags: Vec<String>,
//!     address: Address,
//! }
//!
//! let schema = Person::schema();
//! assert_eq!(schema.name(), "Person");
//! assert_eq!(schema.field_names(), vec!["name", "tags", "address"]);
//! assert!(schema.field("address").unwrap().kind.is_structured());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use pinfluencer_macros::Describe;

/// The declared type of a record field.
#[derive(Clone)]
pub enum Kind {
    /// Text.
    Str,
    /// Integer number.
    Int,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// UTC timestamp.
    DateTime,
    /// Unit enum, listed by its tags.
    Enum(&'static [&'static str]),
    /// Nullable value.
    Optional(Box<Kind>),
    /// Homogeneous list.
    List(Box<Kind>),
    /// Nested record.
    Record(fn() -> &'static Schema),
    /// Untyped JSON.
    Any,
}

impl Kind {
    /// Returns the kind wrapped by `Optional`, or `self`.
    #[must_use]
    pub fn unwrap_optional(&self) -> &Kind {
        match self {
            Self::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }

    /// Returns the item kind of a list, looking through `Optional`.
    #[must_use]
    pub fn item(&self) -> Option<&Kind> {
        match self.unwrap_optional() {
            Self::List(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the nested schema of a record, looking through `Optional`.
    #[must_use]
    pub fn record_schema(&self) -> Option<&'static Schema> {
        match self.unwrap_optional() {
            Self::Record(schema) => Some(schema()),
            _ => None,
        }
    }

    /// Returns `true` for records and lists or options containing records.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        match self.unwrap_optional() {
            Self::Record(_) => true,
            Self::List(item) => item.is_structured(),
            _ => false,
        }
    }

    /// Short name used in validation messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Bool => "boolean",
            Self::DateTime => "datetime",
            Self::Enum(_) => "enum",
            Self::Optional(inner) => inner.type_name(),
            Self::List(_) => "array",
            Self::Record(_) => "object",
            Self::Any => "any",
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum(tags) => f.debug_tuple("Enum").field(tags).finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Self::List(item) => f.debug_tuple("List").field(item).finish(),
            Self::Record(schema) => f.debug_tuple("Record").field(&schema().name()).finish(),
            other => f.write_str(other.type_name()),
        }
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str, Self::Str)
            | (Self::Int, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::Bool, Self::Bool)
            | (Self::DateTime, Self::DateTime)
            | (Self::Any, Self::Any) => true,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Optional(a), Self::Optional(b)) | (Self::List(a), Self::List(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a().name() == b().name(),
            _ => false,
        }
    }
}

/// A named, typed field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name as it appears in JSON.
    pub name: &'static str,
    /// Declared kind.
    pub kind: Kind,
}

impl Field {
    /// Creates a field descriptor.
    #[must_use]
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self { name, kind }
    }
}

/// The descriptor of one record type.
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
    defaults: fn() -> Value,
}

impl Schema {
    /// Creates a descriptor. Called from derived code.
    #[must_use]
    pub fn new(name: &'static str, fields: Vec<Field>, defaults: fn() -> Value) -> Self {
        Self {
            name,
            fields,
            defaults,
        }
    }

    /// Returns the record type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the field names in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    /// Returns the serialized `Default` instance of the record.
    #[must_use]
    pub fn defaults(&self) -> Value {
        (self.defaults)()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Types that can report their [`Kind`].
pub trait Describe {
    /// Returns the kind of this type.
    fn describe() -> Kind;
}

/// Structured records with a static descriptor.
pub trait Record: Describe + Serialize + DeserializeOwned + Default + 'static {
    /// Returns the descriptor of this record type.
    fn schema() -> &'static Schema;
}

/// Unit enums carried on the wire by their variant names.
pub trait Tagged: Sized + 'static {
    /// Variant names in declaration order.
    const TAGS: &'static [&'static str];

    /// Returns the variant name of this value.
    fn tag(&self) -> &'static str;

    /// Parses a variant name.
    fn from_tag(tag: &str) -> Option<Self>;
}

/// Serializes the default instance of `T`. Used as the `defaults` hook of derived schemas.
#[must_use]
pub fn defaults_of<T: Default + Serialize>() -> Value {
    serde_json::to_value(T::default()).unwrap_or(Value::Null)
}

macro_rules! describe_as {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> Kind {
                    $kind
                }
            }
        )+
    };
}

describe_as!(Kind::Str => String, uuid::Uuid);
describe_as!(Kind::Int => i8, i16, i32, i64, u8, u16, u32, u64, usize);
describe_as!(Kind::Float => f32, f64);
describe_as!(Kind::Bool => bool);
describe_as!(Kind::DateTime => DateTime<Utc>);
describe_as!(Kind::Any => Value);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> Kind {
        Kind::Optional(Box::new(T::describe()))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> Kind {
        Kind::List(Box::new(T::describe()))
    }
}

impl<T: Describe> Describe for BTreeMap<String, T> {
    fn describe() -> Kind {
        Kind::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Describe)]
    enum Colour {
        #[default]
        Red,
        Green,
    }

    #[derive(Debug, Default, Serialize, Deserialize, Describe)]
    struct Leaf {
        label: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize, Describe)]
    struct Tree {
        id: String,
        created: DateTime<Utc>,
        weight: f64,
        colour: Colour,
        colours: Vec<Colour>,
        leaf: Leaf,
        leaves: Vec<Leaf>,
        parent: Option<Leaf>,
    }

    #[test]
    fn test_schema_fields_in_order() {
        let schema = Tree::schema();
        assert_eq!(schema.name(), "Tree");
        assert_eq!(
            schema.field_names(),
            vec!["id", "created", "weight", "colour", "colours", "leaf", "leaves", "parent"]
        );
    }

    #[test]
    fn test_field_kinds() {
        let schema = Tree::schema();
        assert_eq!(schema.field("id").unwrap().kind, Kind::Str);
        assert_eq!(schema.field("created").unwrap().kind, Kind::DateTime);
        assert_eq!(schema.field("weight").unwrap().kind, Kind::Float);
        assert_eq!(
            schema.field("colour").unwrap().kind,
            Kind::Enum(&["Red", "Green"])
        );
        assert!(schema.field("leaf").unwrap().kind.is_structured());
        assert!(schema.field("leaves").unwrap().kind.is_structured());
        assert!(schema.field("parent").unwrap().kind.is_structured());
        assert!(!schema.field("colours").unwrap().kind.is_structured());
    }

    #[test]
    fn test_nested_schema_lookup() {
        let leaf = Tree::schema().field("parent").unwrap().kind.record_schema();
        assert_eq!(leaf.unwrap().name(), "Leaf");
    }

    #[test]
    fn test_schema_is_static() {
        assert!(std::ptr::eq(Tree::schema(), Tree::schema()));
    }

    #[test]
    fn test_defaults() {
        let defaults = Tree::schema().defaults();
        assert_eq!(defaults["id"], "");
        assert_eq!(defaults["colour"], "Red");
        assert_eq!(defaults["leaves"], serde_json::json!([]));
    }

    #[test]
    fn test_tagged_enum() {
        assert_eq!(Colour::TAGS, &["Red", "Green"]);
        assert_eq!(Colour::Green.tag(), "Green");
        assert_eq!(Colour::from_tag("Red"), Some(Colour::Red));
        assert_eq!(Colour::from_tag("Blue"), None);
    }

    #[test]
    fn test_kind_debug() {
        let kind = Vec::<Leaf>::describe();
        assert_eq!(format!("{kind:?}"), "List(Record(\"Leaf\"))");
    }
}
