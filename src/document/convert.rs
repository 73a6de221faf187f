//! Conversion between the element tree and the generic values of the text engines.
//!
//! `serde_yaml` and `serde_json` both parse text into a plain nested value
//! (maps, lists and scalars). This module maps those values to [`Element`]s
//! and back. All conversions are total and side-effect free.
//!
//! Map keys that are not strings are coerced to their natural text form
//! (`true`, `1`, `2.5`, `null`; collections use the element's flow
//! rendering). When two keys coerce to the same text the last value wins
//! and the key keeps the position of its first occurrence.
//!
//! # Example
//!
//! ```
//! use yamlkit::document::convert::{to_element, to_yaml_value};
//!
//! let value: serde_yaml::Value = serde_yaml::from_str("a: {b: 1}").unwrap();
//! let element = to_element(&value);
//! assert_eq!(to_yaml_value(&element), value);
//! ```

use super::element::{Element, Number, Object, Primitive};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Converts a `serde_yaml` value into an element. YAML tags are dropped.
pub fn to_element(value: &YamlValue) -> Element {
    match value {
        YamlValue::Null => Element::Null,
        YamlValue::Bool(b) => Element::from(*b),
        YamlValue::Number(n) => Element::from(yaml_number(n)),
        YamlValue::String(s) => Element::from(s.as_str()),
        YamlValue::Sequence(items) => Element::Array(items.iter().map(to_element).collect()),
        YamlValue::Mapping(map) => {
            let mut entries = Object::new();
            for (key, value) in map {
                entries.insert(yaml_key_text(key), to_element(value));
            }
            Element::Object(entries)
        }
        YamlValue::Tagged(tagged) => to_element(&tagged.value),
    }
}

/// Converts an element into a `serde_yaml` value. Characters become strings.
pub fn to_yaml_value(element: &Element) -> YamlValue {
    match element {
        Element::Null => YamlValue::Null,
        Element::Primitive(Primitive::Bool(b)) => YamlValue::Bool(*b),
        Element::Primitive(Primitive::Number(Number::Integer(i))) => {
            YamlValue::Number(serde_yaml::Number::from(*i))
        }
        Element::Primitive(Primitive::Number(Number::Float(f))) => {
            YamlValue::Number(serde_yaml::Number::from(*f))
        }
        Element::Primitive(Primitive::Char(c)) => YamlValue::String(c.to_string()),
        Element::Primitive(Primitive::String(s)) => YamlValue::String(s.clone()),
        Element::Array(items) => YamlValue::Sequence(items.iter().map(to_yaml_value).collect()),
        Element::Object(entries) => {
            let map: serde_yaml::Mapping = entries
                .iter()
                .map(|(k, v)| (YamlValue::String(k.clone()), to_yaml_value(v)))
                .collect();
            YamlValue::Mapping(map)
        }
    }
}

/// Converts a `serde_json` value into an element.
pub fn json_to_element(value: &JsonValue) -> Element {
    match value {
        JsonValue::Null => Element::Null,
        JsonValue::Bool(b) => Element::from(*b),
        JsonValue::Number(n) => Element::from(json_number(n)),
        JsonValue::String(s) => Element::from(s.as_str()),
        JsonValue::Array(items) => Element::Array(items.iter().map(json_to_element).collect()),
        JsonValue::Object(map) => Element::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_element(v)))
                .collect(),
        ),
    }
}

/// Converts an element into a `serde_json` value.
///
/// JSON has no representation for NaN or infinities; those become `null`.
pub fn to_json_value(element: &Element) -> JsonValue {
    match element {
        Element::Null => JsonValue::Null,
        Element::Primitive(Primitive::Bool(b)) => JsonValue::Bool(*b),
        Element::Primitive(Primitive::Number(Number::Integer(i))) => JsonValue::from(*i),
        Element::Primitive(Primitive::Number(Number::Float(f))) => {
            serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number)
        }
        Element::Primitive(Primitive::Char(c)) => JsonValue::String(c.to_string()),
        Element::Primitive(Primitive::String(s)) => JsonValue::String(s.clone()),
        Element::Array(items) => JsonValue::Array(items.iter().map(to_json_value).collect()),
        Element::Object(entries) => object_to_json_value(entries),
    }
}

/// Converts an object into a `serde_json` object without wrapping it in an
/// [`Element`] first.
pub fn object_to_json_value(entries: &Object) -> JsonValue {
    JsonValue::Object(
        entries
            .iter()
            .map(|(k, v)| (k.clone(), to_json_value(v)))
            .collect(),
    )
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Number::Float(u as f64)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_key_text(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Tagged(tagged) => yaml_key_text(&tagged.value),
        other => to_element(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> YamlValue {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let element = to_element(&yaml("1: one\ntrue: yes\n2.5: half\n~: nothing\n"));
        let obj = element.as_object().unwrap();
        let keys: Vec<_> = obj.keys().cloned().collect();
        assert_eq!(keys, vec!["1", "true", "2.5", "null"]);
    }

    #[test]
    fn test_colliding_keys_last_write_wins() {
        let element = to_element(&yaml("1: first\n\"1\": second\nother: x\n"));
        let obj = element.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("1"), Some(&Element::from("second")));
        assert_eq!(obj.keys().next().map(String::as_str), Some("1"));
    }

    #[test]
    fn test_complex_key_uses_flow_text() {
        let element = to_element(&yaml("? [a, b]\n: pair\n"));
        let obj = element.as_object().unwrap();
        assert_eq!(obj.get("[a, b]"), Some(&Element::from("pair")));
    }

    #[test]
    fn test_tags_are_dropped() {
        let element = to_element(&yaml("value: !custom hello\n"));
        assert_eq!(
            element.as_object().unwrap().get("value"),
            Some(&Element::from("hello"))
        );
    }

    #[test]
    fn test_non_finite_float_is_null_in_json() {
        assert_eq!(to_json_value(&Element::from(f64::NAN)), JsonValue::Null);
        assert_eq!(to_json_value(&Element::from(1.5)), serde_json::json!(1.5));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let value: JsonValue = serde_json::from_str(r#"{"z": 1, "a": [true, null]}"#).unwrap();
        let element = json_to_element(&value);
        assert_eq!(to_json_value(&element), value);
        let keys: Vec<_> = element.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }
}
