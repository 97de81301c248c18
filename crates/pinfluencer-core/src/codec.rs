//! JSON body codecs.
//!
//! Inbound bodies arrive with camelCase keys and are handled internally in
//! snake_case; outbound bodies are converted back. Keys are rewritten
//! recursively through nested objects and arrays, values are never touched.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Serializes an outbound response body.
pub trait BodySerializer: Send + Sync {
    /// Renders `data` as the wire body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be rendered.
    fn serialize(&self, data: &Value) -> Result<String, serde_json::Error>;
}

/// Deserializes an inbound request body.
pub trait BodyDeserializer: Send + Sync {
    /// Parses the wire body.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not valid JSON.
    fn deserialize(&self, data: &str) -> Result<Value, serde_json::Error>;
}

/// Renders snake_case keys as camelCase.
///
/// ```
/// use pinfluencer_core::codec::{BodySerializer, JsonSnakeToCamelSerializer};
/// use serde_json::json;
///
/// let body = JsonSnakeToCamelSerializer
///     .serialize(&json!({"brand_name": "acme", "insta_handle": "@acme"}))
///     .unwrap();
/// assert_eq!(body, r#"{"brandName":"acme","instaHandle":"@acme"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnakeToCamelSerializer;

impl BodySerializer for JsonSnakeToCamelSerializer {
    fn serialize(&self, data: &Value) -> Result<String, serde_json::Error> {
        serde_json::to_string(&transform_keys(data, &snake_key_to_camel))
    }
}

/// Parses camelCase keys into snake_case.
///
/// ```
/// use pinfluencer_core::codec::{BodyDeserializer, JsonCamelToSnakeDeserializer};
///
/// let body = JsonCamelToSnakeDeserializer
///     .deserialize(r#"{"brandName": "acme", "value2To3Values": 2}"#)
///     .unwrap();
/// assert_eq!(body["brand_name"], "acme");
/// assert_eq!(body["value_2_to_3_values"], 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCamelToSnakeDeserializer;

impl BodyDeserializer for JsonCamelToSnakeDeserializer {
    fn deserialize(&self, data: &str) -> Result<Value, serde_json::Error> {
        let raw: Value = serde_json::from_str(data)?;
        Ok(transform_keys(&raw, &camel_key_to_snake))
    }
}

/// Rewrites every object key in `value` with `convert`.
#[must_use]
pub fn transform_keys(value: &Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, nested)| (convert(key), transform_keys(nested, convert)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| transform_keys(item, convert))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Converts one snake_case key to camelCase.
///
/// The first component is kept as is; every following component is
/// title-cased.
#[must_use]
pub fn snake_key_to_camel(key: &str) -> String {
    let mut components = key.split('_');
    let mut camel = components.next().unwrap_or_default().to_string();
    for component in components {
        camel.push_str(&title_case(component));
    }
    camel
}

/// Converts one camelCase key to snake_case.
///
/// Runs of capitals are kept together as one word, except that the last
/// capital of a run followed by lowercase letters starts the next word.
/// Digit runs always form their own word.
#[must_use]
pub fn camel_key_to_snake(key: &str) -> String {
    let mut words = Vec::new();
    for found in word_pattern().find_iter(key) {
        let word = found.as_str();
        let upper = word.chars().take_while(char::is_ascii_uppercase).count();
        if upper >= 2 && upper < word.len() {
            words.push(word[..upper - 1].to_ascii_lowercase());
            words.push(word[upper - 1..].to_ascii_lowercase());
        } else {
            words.push(word.to_ascii_lowercase());
        }
    }
    words.join("_")
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Z]*[a-z]+|[A-Z]+|\d+").expect("valid regex"))
}

fn title_case(component: &str) -> String {
    let mut titled = String::with_capacity(component.len());
    let mut after_letter = false;
    for c in component.chars() {
        if after_letter {
            titled.extend(c.to_lowercase());
        } else {
            titled.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    titled
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_snake_to_camel_keys() {
        assert_eq!(snake_key_to_camel("name"), "name");
        assert_eq!(snake_key_to_camel("snake_in_value"), "snakeInValue");
        assert_eq!(snake_key_to_camel("value_2_to_3_values"), "value2To3Values");
        assert_eq!(
            snake_key_to_camel("audience_age_65_plus_split"),
            "audienceAge65PlusSplit"
        );
    }

    #[test]
    fn test_camel_to_snake_keys() {
        assert_eq!(camel_key_to_snake("name"), "name");
        assert_eq!(camel_key_to_snake("snakeInValue"), "snake_in_value");
        assert_eq!(camel_key_to_snake("value2To3Values"), "value_2_to_3_values");
        assert_eq!(camel_key_to_snake("capitalLETTERSValue"), "capital_letters_value");
        assert_eq!(camel_key_to_snake("brandID"), "brand_id");
        assert_eq!(
            camel_key_to_snake("audienceAge13To17Split"),
            "audience_age_13_to_17_split"
        );
    }

    #[test]
    fn test_serialize_nested() {
        let data = json!({
            "name": "adam raymond",
            "snake_in_value": "snake_in_value",
            "nested_object": {"snake_value": 3},
            "array_value": ["apples", {"inner_key": 1}]
        });

        let wire: Value =
            serde_json::from_str(&JsonSnakeToCamelSerializer.serialize(&data).unwrap()).unwrap();

        assert_eq!(
            wire,
            json!({
                "name": "adam raymond",
                "snakeInValue": "snake_in_value",
                "nestedObject": {"snakeValue": 3},
                "arrayValue": ["apples", {"innerKey": 1}]
            })
        );
    }

    #[test]
    fn test_serialize_list() {
        let data = json!([{"brand_name": "a"}, {"brand_name": "b"}]);
        let wire = JsonSnakeToCamelSerializer.serialize(&data).unwrap();
        assert_eq!(wire, r#"[{"brandName":"a"},{"brandName":"b"}]"#);
    }

    #[test]
    fn test_deserialize_leaves_values_untouched() {
        let body = JsonCamelToSnakeDeserializer
            .deserialize(r#"{"snakeInValue": "camelValue", "nestedObject": {"snakeValue": 3}}"#)
            .unwrap();

        assert_eq!(
            body,
            json!({"snake_in_value": "camelValue", "nested_object": {"snake_value": 3}})
        );
    }

    #[test]
    fn test_deserialize_invalid_json() {
        assert!(JsonCamelToSnakeDeserializer.deserialize("{not json").is_err());
    }

    proptest! {
        #[test]
        fn prop_snake_keys_survive_round_trip(words in prop::collection::vec("[a-z]{2,8}", 1..5)) {
            let key = words.join("_");
            prop_assert_eq!(camel_key_to_snake(&snake_key_to_camel(&key)), key);
        }
    }
}
