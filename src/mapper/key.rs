//! Map key handling.
//!
//! Object keys are always strings. When writing, any key value is rendered
//! to text; when reading, the text is parsed back into whatever scalar the
//! target key type asks for.

use crate::document::element::{Element, Primitive};
use crate::error::{Error, Result};
use serde::de::value::StringDeserializer;
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Text for a serialized map key. Strings are taken as-is, everything else
/// uses the compact flow rendering.
pub fn key_text(key: Element) -> String {
    match key {
        Element::Primitive(Primitive::String(s)) => s,
        other => other.to_string(),
    }
}

/// Deserializes a map key from its text.
pub struct KeyDeserializer {
    key: String,
}

impl KeyDeserializer {
    pub fn new(key: String) -> Self {
        Self { key }
    }

    fn parse<T: std::str::FromStr>(&self, expected: &'static str) -> Result<T> {
        self.key.parse().map_err(|_| Error::TypeMismatch {
            expected,
            found: "string",
        })
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $ty:ty, $visit:ident, $expected:literal;)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                let value: $ty = self.parse($expected)?;
                visitor.$visit(value)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_string(self.key)
    }

    deserialize_parsed! {
        deserialize_bool => bool, visit_bool, "boolean key";
        deserialize_i8 => i8, visit_i8, "integer key";
        deserialize_i16 => i16, visit_i16, "integer key";
        deserialize_i32 => i32, visit_i32, "integer key";
        deserialize_i64 => i64, visit_i64, "integer key";
        deserialize_u8 => u8, visit_u8, "integer key";
        deserialize_u16 => u16, visit_u16, "integer key";
        deserialize_u32 => u32, visit_u32, "integer key";
        deserialize_u64 => u64, visit_u64, "integer key";
        deserialize_f32 => f32, visit_f32, "number key";
        deserialize_f64 => f64, visit_f64, "number key";
        deserialize_char => char, visit_char, "character key";
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let variant: StringDeserializer<Error> = self.key.into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        i128 u128 str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_numeric_key_parses() {
        let n = u16::deserialize(KeyDeserializer::new("8080".to_string())).unwrap();
        assert_eq!(n, 8080);
    }

    #[test]
    fn test_non_numeric_key_fails() {
        let err = i32::deserialize(KeyDeserializer::new("port".to_string())).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_key_text_uses_flow_form() {
        assert_eq!(key_text(Element::from(true)), "true");
        assert_eq!(key_text(Element::from("plain")), "plain");
        assert_eq!(key_text(Element::Null), "null");
    }
}
