//! YAML and JSON text parsing into the element tree.
//!
//! Parsing is delegated to `serde_yaml` and `serde_json`, which produce a
//! generic nested value; [`convert`](super::convert) turns that value into an
//! [`Element`].
//!
//! # Example
//!
//! ```
//! use yamlkit::document::parser::parse_yaml;
//!
//! let root = parse_yaml("name: Alice\nage: 30\n").unwrap();
//! assert!(root.is_object());
//! ```

use super::convert::{json_to_element, to_element};
use super::element::Element;
use crate::error::Result;
use serde::Deserialize;

/// Parses a single YAML document.
///
/// An empty document parses as [`Element::Null`].
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::error::Error::Parse) when the text is not
/// valid YAML or contains more than one document.
pub fn parse_yaml(text: &str) -> Result<Element> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(to_element(&value))
}

/// Parses every document of a YAML stream, in order.
///
/// Documents are separated by `---`. A stream without any content yields no
/// documents.
pub fn parse_yaml_all(text: &str) -> Result<Vec<Element>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = serde_yaml::Value::deserialize(document)?;
        documents.push(to_element(&value));
    }
    Ok(documents)
}

/// Parses a JSON document.
pub fn parse_json(text: &str) -> Result<Element> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(json_to_element(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::element::Primitive;
    use crate::error::Error;

    #[test]
    fn test_parse_simple_string() {
        let root = parse_yaml("hello").unwrap();
        assert_eq!(root.as_str(), Some("hello"));
    }

    #[test]
    fn test_parse_number() {
        match parse_yaml("42.5").unwrap() {
            Element::Primitive(Primitive::Number(n)) => assert_eq!(n.as_f64(), 42.5),
            other => panic!("Expected number, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_flow_and_block_agree() {
        let block = parse_yaml("a:\n  - 1\n  - 2\nb: x\n").unwrap();
        let flow = parse_yaml("{a: [1, 2], b: x}").unwrap();
        assert_eq!(block, flow);
    }

    #[test]
    fn test_parse_empty_document_is_null() {
        assert_eq!(parse_yaml("").unwrap(), Element::Null);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_yaml("key: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Parse { format: "YAML", .. }));
    }

    #[test]
    fn test_parse_multi_document() {
        let docs = parse_yaml_all("---\nname: first\n---\nname: second\n").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(
            docs[1].as_object().unwrap().get("name").unwrap().as_str(),
            Some("second")
        );
    }

    #[test]
    fn test_parse_json_matches_yaml() {
        let json = parse_json(r#"{"a": {"b": 1, "c": true}}"#).unwrap();
        let yaml = parse_yaml("a:\n  b: 1\n  c: true\n").unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_json(r#"{"unclosed": "#).unwrap_err();
        assert!(matches!(err, Error::Parse { format: "JSON", .. }));
    }
}
