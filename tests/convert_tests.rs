//! Tests for the element tree and its conversion to and from the text engines.

use proptest::prelude::*;
use yamlkit::document::convert::{json_to_element, to_element, to_json_value, to_yaml_value};
use yamlkit::document::parser::{parse_json, parse_yaml};
use yamlkit::{Array, Element, Error, Number, Object, Primitive};

fn arb_element() -> impl Strategy<Value = Element> {
    let leaf = prop_oneof![
        Just(Element::Null),
        any::<bool>().prop_map(Element::from),
        any::<i64>().prop_map(Element::from),
        (-1.0e9f64..1.0e9).prop_map(Element::from),
        any::<char>().prop_map(Element::from),
        ".{0,12}".prop_map(Element::from),
    ];
    leaf.prop_recursive(4, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(|items| Element::Array(items.into())),
            prop::collection::vec((".{0,6}", inner), 0..5)
                .prop_map(|entries| Element::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Converting to the YAML engine's value, back to an element and out
    /// again is stable.
    #[test]
    fn yaml_conversion_is_idempotent(element in arb_element()) {
        let native = to_yaml_value(&element);
        prop_assert_eq!(to_yaml_value(&to_element(&native)), native);
    }

    #[test]
    fn json_conversion_is_idempotent(element in arb_element()) {
        let native = to_json_value(&element);
        prop_assert_eq!(to_json_value(&json_to_element(&native)), native);
    }
}

// ============================================================================
// Numeric equality
// ============================================================================

#[test]
fn test_integer_and_float_compare_equal() {
    assert_eq!(Primitive::from(1), Primitive::from(1.0));
    assert_eq!(Element::from(1), Element::from(1.0));
    assert_ne!(Primitive::from(1), Primitive::from(1.5));
}

#[test]
fn test_nan_equals_nan() {
    assert_eq!(Primitive::from(f64::NAN), Primitive::from(f64::NAN));
    assert_eq!(
        Element::Primitive(Primitive::Number(Number::Float(f64::NAN))),
        Element::from(f64::NAN)
    );
}

#[test]
fn test_primitive_kinds_are_distinct() {
    assert_ne!(Primitive::from('a'), Primitive::from("a"));
    assert_ne!(Primitive::from(true), Primitive::from(1));
}

// ============================================================================
// Primitive construction
// ============================================================================

#[test]
fn test_from_any_accepts_scalars() {
    assert_eq!(Primitive::from_any(&true).unwrap(), Primitive::Bool(true));
    assert_eq!(Primitive::from_any(&3.5f32).unwrap(), Primitive::from(3.5));
    assert_eq!(Primitive::from_any(&'z').unwrap(), Primitive::Char('z'));
    assert_eq!(
        Primitive::from_any(&String::from("s")).unwrap(),
        Primitive::from("s")
    );
}

#[test]
fn test_from_any_rejects_collections() {
    let err = Primitive::from_any(&vec![1u8]).unwrap_err();
    assert!(matches!(err, Error::InvalidPrimitive { .. }));
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_preserves_structure() {
    let root = parse_yaml("list: [1, two, 3.5, null, false]\nmap: {k: v}\n").unwrap();
    let root = root.as_object().unwrap();

    let list = root.get("list").and_then(Element::as_array).unwrap();
    let expected: Array = vec![
        Element::from(1),
        Element::from("two"),
        Element::from(3.5),
        Element::Null,
        Element::from(false),
    ]
    .into();
    assert_eq!(list, &expected);

    let map = root.get("map").and_then(Element::as_object).unwrap();
    assert_eq!(map.get("k").and_then(Element::as_str), Some("v"));
}

#[test]
fn test_non_string_keys_become_text() {
    let root = parse_yaml("1: one\ntrue: yes\n2.5: half\n").unwrap();
    let keys: Vec<&String> = root.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["1", "true", "2.5"]);
}

#[test]
fn test_colliding_keys_keep_last_value() {
    let root = parse_yaml("1: int\n\"1\": text\n").unwrap();
    let root = root.as_object().unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root.get("1").and_then(Element::as_str), Some("text"));
}

#[test]
fn test_yaml_tags_are_dropped() {
    let root = parse_yaml("value: !custom text\n").unwrap();
    assert_eq!(
        root.as_object().and_then(|o| o.get("value")),
        Some(&Element::from("text"))
    );
}

#[test]
fn test_json_nested_order() {
    let root = parse_json(r#"{"z": 1, "a": {"y": 2, "b": 3}}"#).unwrap();
    let root = root.as_object().unwrap();
    assert_eq!(root.keys().collect::<Vec<_>>(), vec!["z", "a"]);
    let inner = root.get("a").and_then(Element::as_object).unwrap();
    assert_eq!(inner.keys().collect::<Vec<_>>(), vec!["y", "b"]);
}

#[test]
fn test_object_insert_keeps_first_position() {
    let mut obj: Object = [("a", 1), ("b", 2)].into_iter().collect();
    obj.insert("a", 3);
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(obj.get("a"), Some(&Element::from(3)));
}
