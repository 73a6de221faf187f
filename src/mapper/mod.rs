//! Serde plumbing between native values and the element tree.
//!
//! - [`ser`] - a `Serializer` that builds elements
//! - [`de`] - a `Deserializer` that reads elements
//! - [`key`] - map key text conversion
//!
//! Both directions consult the [`Dispatcher`] at every node, so registered
//! type adapters apply at any depth of a value.

pub mod de;
pub mod key;
pub mod ser;

use crate::adapter::Dispatcher;
use crate::document::element::Element;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use de::ElementDeserializer;
pub use ser::ElementSerializer;

/// Serializes `value` into an element.
pub fn to_element<T: Serialize + ?Sized>(value: &T, dispatcher: &Dispatcher<'_>) -> Result<Element> {
    value.serialize(ElementSerializer::new(dispatcher))
}

/// Deserializes an element into `T`.
pub fn from_element<T: DeserializeOwned>(element: Element, dispatcher: &Dispatcher<'_>) -> Result<T> {
    T::deserialize(ElementDeserializer::new(element, dispatcher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterRegistry, TypeHierarchy};
    use crate::config::Config;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Shape {
        Dot,
        Circle { r: f64 },
        Line(Point, Point),
    }

    fn roundtrip<T>(value: &T) -> (Element, T)
    where
        T: Serialize + DeserializeOwned,
    {
        let config = Config::default();
        let hierarchy = TypeHierarchy::empty();
        let registry = AdapterRegistry::new();
        let dispatcher = Dispatcher::new(&registry, &config, &hierarchy);
        let element = to_element(value, &dispatcher).unwrap();
        let back = from_element(element.clone(), &dispatcher).unwrap();
        (element, back)
    }

    #[test]
    fn test_struct_roundtrip() {
        let (element, back) = roundtrip(&Point { x: 1, y: -2 });
        let obj = element.as_object().unwrap();
        assert_eq!(obj.keys().cloned().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(back, Point { x: 1, y: -2 });
    }

    #[test]
    fn test_enum_variants_roundtrip() {
        for shape in [
            Shape::Dot,
            Shape::Circle { r: 1.5 },
            Shape::Line(Point { x: 0, y: 0 }, Point { x: 1, y: 1 }),
        ] {
            let (_, back) = roundtrip(&shape);
            assert_eq!(back, shape);
        }
    }

    #[test]
    fn test_unit_variant_is_qualified() {
        let (element, _) = roundtrip(&Shape::Dot);
        assert_eq!(element, Element::from("Shape.Dot"));
    }

    #[test]
    fn test_integer_map_keys() {
        let mut ports = BTreeMap::new();
        ports.insert(80u16, "http".to_string());
        ports.insert(443u16, "https".to_string());
        let (element, back) = roundtrip(&ports);
        assert!(element.as_object().unwrap().contains_key("443"));
        assert_eq!(back, ports);
    }

    #[test]
    fn test_option_and_vec() {
        let value: Vec<Option<u8>> = vec![Some(1), None, Some(3)];
        let (element, back) = roundtrip(&value);
        assert_eq!(element.as_array().unwrap().get(1), Some(&Element::Null));
        assert_eq!(back, value);
    }
}
