//! Deserializing elements into native values.
//!
//! Each node is passed through the [`Dispatcher`] first, which turns its
//! document form back into the reflected form that serde's derived visitors
//! expect, and is then visited.
//!
//! Strings are read leniently: a number, boolean or character is accepted
//! where a string is expected, using its text.

use super::key::KeyDeserializer;
use crate::adapter::{Dispatcher, Target};
use crate::document::element::{Element, Number, Object, Primitive};
use crate::error::{Error, Result};
use serde::de::value::StringDeserializer;
use serde::de::{
    self, DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess, Unexpected,
    VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;

/// A serde deserializer reading from an owned [`Element`].
pub struct ElementDeserializer<'a> {
    element: Element,
    dispatcher: &'a Dispatcher<'a>,
}

impl<'a> ElementDeserializer<'a> {
    pub fn new(element: Element, dispatcher: &'a Dispatcher<'a>) -> Self {
        Self {
            element,
            dispatcher,
        }
    }

    fn adapt(self, target: &Target<'_>) -> Result<Self> {
        let element = self.dispatcher.deserialize(self.element, target)?;
        Ok(Self {
            element,
            dispatcher: self.dispatcher,
        })
    }

    fn primitive(self, name: &'static str) -> Result<Self> {
        self.adapt(&Target::primitive(name))
    }

    fn visit_array<'de, V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.element {
            Element::Array(items) => {
                let mut seq = ElementSeq {
                    iter: items.into_vec().into_iter(),
                    dispatcher: self.dispatcher,
                };
                let value = visitor.visit_seq(&mut seq)?;
                match seq.iter.len() {
                    0 => Ok(value),
                    remaining => Err(de::Error::custom(format!(
                        "{} trailing elements in sequence",
                        remaining
                    ))),
                }
            }
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn visit_object<'de, V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.element {
            Element::Object(entries) => visitor.visit_map(ElementMap::new(entries, self.dispatcher)),
            other => Err(invalid_type(&other, &visitor)),
        }
    }
}

fn unexpected(element: &Element) -> Unexpected<'_> {
    match element {
        Element::Null => Unexpected::Unit,
        Element::Primitive(Primitive::Bool(b)) => Unexpected::Bool(*b),
        Element::Primitive(Primitive::Number(Number::Integer(i))) => Unexpected::Signed(*i),
        Element::Primitive(Primitive::Number(Number::Float(f))) => Unexpected::Float(*f),
        Element::Primitive(Primitive::Char(c)) => Unexpected::Char(*c),
        Element::Primitive(Primitive::String(s)) => Unexpected::Str(s),
        Element::Array(_) => Unexpected::Seq,
        Element::Object(_) => Unexpected::Map,
    }
}

fn invalid_type<'de, V: Visitor<'de>>(element: &Element, visitor: &V) -> Error {
    de::Error::invalid_type(unexpected(element), visitor)
}

impl<'de, 'a> de::Deserializer<'de> for ElementDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.element {
            Element::Null => visitor.visit_unit(),
            Element::Primitive(Primitive::Bool(b)) => visitor.visit_bool(b),
            Element::Primitive(Primitive::Number(Number::Integer(i))) => visitor.visit_i64(i),
            Element::Primitive(Primitive::Number(Number::Float(f))) => visitor.visit_f64(f),
            Element::Primitive(Primitive::Char(c)) => visitor.visit_char(c),
            Element::Primitive(Primitive::String(s)) => visitor.visit_string(s),
            Element::Array(_) => self.visit_array(visitor),
            Element::Object(_) => self.visit_object(visitor),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("bool")?.deserialize_any(visitor)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("i8")?.deserialize_any(visitor)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("i16")?.deserialize_any(visitor)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("i32")?.deserialize_any(visitor)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("i64")?.deserialize_any(visitor)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("u8")?.deserialize_any(visitor)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("u16")?.deserialize_any(visitor)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("u32")?.deserialize_any(visitor)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = self.primitive("u64")?;
        match this.element {
            // Values above i64::MAX are stored as floats.
            Element::Primitive(Primitive::Number(Number::Float(f)))
                if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 =>
            {
                visitor.visit_u64(f as u64)
            }
            _ => this.deserialize_any(visitor),
        }
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("f32")?.deserialize_any(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.primitive("f64")?.deserialize_any(visitor)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = self.primitive("char")?;
        match this.element {
            Element::Primitive(Primitive::String(s)) if s.chars().count() == 1 => {
                match s.chars().next() {
                    Some(c) => visitor.visit_char(c),
                    None => visitor.visit_string(s),
                }
            }
            _ => this.deserialize_any(visitor),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = self.primitive("String")?;
        match this.element {
            Element::Primitive(Primitive::String(s)) => visitor.visit_string(s),
            Element::Primitive(p) => visitor.visit_string(p.to_string()),
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.element {
            Element::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.element {
            Element::Null => visitor.visit_unit(),
            other => Err(invalid_type(&other, &visitor)),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.adapt(&Target::wrapper(name))?.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self.adapt(&Target::wrapper(name))?)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.adapt(&Target::collection())?.visit_array(visitor)
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.adapt(&Target::wrapper(name))?.visit_array(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.adapt(&Target::map())?.visit_object(visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.adapt(&Target::object(name, fields))?.visit_object(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let this = self.adapt(&Target::enumeration(name, variants))?;
        let dispatcher = this.dispatcher;
        let (variant, payload) = match this.element {
            Element::Primitive(Primitive::String(variant)) => (variant, None),
            Element::Object(tagged) if tagged.len() == 1 => {
                match tagged.into_iter().next() {
                    Some((variant, payload)) => (variant, Some(payload)),
                    None => return Err(de::Error::custom("empty enum object")),
                }
            }
            other => return Err(invalid_type(&other, &visitor)),
        };
        visitor.visit_enum(ElementEnum {
            name,
            variant,
            payload,
            dispatcher,
        })
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128 identifier
    }
}

struct ElementSeq<'a> {
    iter: std::vec::IntoIter<Element>,
    dispatcher: &'a Dispatcher<'a>,
}

impl<'de> SeqAccess<'de> for ElementSeq<'_> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        match self.iter.next() {
            Some(element) => seed
                .deserialize(ElementDeserializer::new(element, self.dispatcher))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct ElementMap<'a> {
    iter: indexmap::map::IntoIter<String, Element>,
    value: Option<Element>,
    dispatcher: &'a Dispatcher<'a>,
}

impl<'a> ElementMap<'a> {
    fn new(entries: Object, dispatcher: &'a Dispatcher<'a>) -> Self {
        Self {
            iter: entries.into_map().into_iter(),
            value: None,
            dispatcher,
        }
    }
}

impl<'de> MapAccess<'de> for ElementMap<'_> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        match self.value.take() {
            Some(value) => seed.deserialize(ElementDeserializer::new(value, self.dispatcher)),
            None => Err(de::Error::custom("map value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct ElementEnum<'a> {
    name: &'static str,
    variant: String,
    payload: Option<Element>,
    dispatcher: &'a Dispatcher<'a>,
}

impl<'de, 'a> EnumAccess<'de> for ElementEnum<'a> {
    type Error = Error;
    type Variant = ElementVariant<'a>;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, ElementVariant<'a>)> {
        let variant_name: StringDeserializer<Error> = self.variant.clone().into_deserializer();
        let value = seed.deserialize(variant_name)?;
        Ok((
            value,
            ElementVariant {
                record_name: format!("{}::{}", self.name, self.variant),
                payload: self.payload,
                dispatcher: self.dispatcher,
            },
        ))
    }
}

struct ElementVariant<'a> {
    record_name: String,
    payload: Option<Element>,
    dispatcher: &'a Dispatcher<'a>,
}

impl ElementVariant<'_> {
    fn missing_payload(expected: &str) -> Error {
        de::Error::invalid_type(Unexpected::UnitVariant, &expected)
    }
}

impl<'de> VariantAccess<'de> for ElementVariant<'_> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.payload {
            None | Some(Element::Null) => Ok(()),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        match self.payload {
            Some(payload) => seed.deserialize(ElementDeserializer::new(payload, self.dispatcher)),
            None => Err(Self::missing_payload("newtype variant")),
        }
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        match self.payload {
            Some(payload) => ElementDeserializer::new(payload, self.dispatcher).visit_array(visitor),
            None => Err(Self::missing_payload("tuple variant")),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.payload {
            Some(payload) => {
                let target = Target::object(&self.record_name, fields);
                ElementDeserializer::new(payload, self.dispatcher)
                    .adapt(&target)?
                    .visit_object(visitor)
            }
            None => Err(Self::missing_payload("struct variant")),
        }
    }
}
