//! `Serialize` and `Deserialize` for the element tree, so elements can be
//! embedded in native records and handed to any serde format.

use super::element::{Array, Element, Number, Object, Primitive};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Null => serializer.serialize_unit(),
            Element::Primitive(p) => p.serialize(serializer),
            Element::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Element::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Primitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Primitive::Bool(b) => serializer.serialize_bool(*b),
            Primitive::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Primitive::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Primitive::Char(c) => serializer.serialize_char(*c),
            Primitive::String(s) => serializer.serialize_str(s),
        }
    }
}

struct ElementVisitor;

impl<'de> Visitor<'de> for ElementVisitor {
    type Value = Element;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Element, E> {
        Ok(Element::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Element, E> {
        Ok(Element::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Element, E> {
        Ok(Element::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Element, E> {
        Ok(Element::from(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Element, E> {
        Ok(Element::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Element, E> {
        Ok(Element::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Element, E> {
        Ok(Element::from(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Element, E> {
        Ok(Element::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Element, E> {
        Ok(Element::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Element, D::Error> {
        Element::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Element, A::Error> {
        let mut items = Array::new();
        while let Some(item) = seq.next_element::<Element>()? {
            items.push(item);
        }
        Ok(Element::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Element, A::Error> {
        let mut entries = Object::new();
        while let Some((key, value)) = map.next_entry::<String, Element>()? {
            entries.insert(key, value);
        }
        Ok(Element::Object(entries))
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ElementVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_through_serde_json() {
        let element: Element = serde_json::from_str(r#"{"a": [1, 2.5, "x", null]}"#).unwrap();
        let obj = element.as_object().unwrap();
        let items = obj.get("a").unwrap().as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items.get(1), Some(&Element::from(2.5)));

        let text = serde_json::to_string(&element).unwrap();
        assert_eq!(text, r#"{"a":[1,2.5,"x",null]}"#);
    }
}
