//! JSON text output.

use crate::config::Config;
use crate::document::convert::{object_to_json_value, to_json_value};
use crate::document::element::{Element, Object};
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Writes an element as JSON.
///
/// Output is pretty-printed with `indent` spaces when `json_pretty` is set,
/// compact otherwise. Non-finite floats are written as `null`.
pub fn emit_json(element: &Element, config: &Config) -> Result<String> {
    write_json(&to_json_value(element), config)
}

/// Writes an object root as JSON. See [`emit_json`].
pub fn emit_json_object(object: &Object, config: &Config) -> Result<String> {
    write_json(&object_to_json_value(object), config)
}

fn write_json(value: &serde_json::Value, config: &Config) -> Result<String> {
    if !config.json_pretty {
        return serde_json::to_string(&value).map_err(|e| Error::Message(e.to_string()));
    }

    let indent = " ".repeat(config.indent.clamp(2, 9));
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value
        .serialize(&mut ser)
        .map_err(|e| Error::Message(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| Error::Message(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    #[test]
    fn test_compact() {
        let root = parse_yaml("a:\n  b: 1\n  c: [true, null]\n").unwrap();
        let config = Config {
            json_pretty: false,
            ..Config::default()
        };
        assert_eq!(
            emit_json(&root, &config).unwrap(),
            r#"{"a":{"b":1,"c":[true,null]}}"#
        );
    }

    #[test]
    fn test_pretty_uses_indent() {
        let root = parse_yaml("a: 1\n").unwrap();
        let config = Config {
            indent: 4,
            ..Config::default()
        };
        assert_eq!(emit_json(&root, &config).unwrap(), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_object_root_matches_element_output() {
        let root = parse_yaml("a: [1, 2]
b: x
").unwrap();
        let object = root.as_object().unwrap();
        let config = Config::default();
        assert_eq!(
            emit_json_object(object, &config).unwrap(),
            emit_json(&root, &config).unwrap()
        );
    }
}
