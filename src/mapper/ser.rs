//! Serializing native values into elements.

use super::key::key_text;
use crate::adapter::{Dispatcher, Target};
use crate::document::element::{Array, Element, Object};
use crate::error::{Error, Result};
use serde::ser::{self, Serialize};

/// A serde serializer producing [`Element`]s. Every finished node is passed
/// through the [`Dispatcher`] before it is handed to its parent.
#[derive(Clone, Copy)]
pub struct ElementSerializer<'a> {
    dispatcher: &'a Dispatcher<'a>,
}

impl<'a> ElementSerializer<'a> {
    pub fn new(dispatcher: &'a Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    fn primitive(self, value: impl Into<Element>, name: &'static str) -> Result<Element> {
        self.dispatcher.serialize(value.into(), &Target::primitive(name))
    }

    fn tagged(variant: &str, payload: Element) -> Element {
        let mut tagged = Object::new();
        tagged.insert(variant, payload);
        Element::Object(tagged)
    }
}

impl<'a> ser::Serializer for ElementSerializer<'a> {
    type Ok = Element;
    type Error = Error;

    type SerializeSeq = SerializeArray<'a>;
    type SerializeTuple = SerializeArray<'a>;
    type SerializeTupleStruct = SerializeArray<'a>;
    type SerializeTupleVariant = SerializeArray<'a>;
    type SerializeMap = SerializeMap<'a>;
    type SerializeStruct = SerializeRecord<'a>;
    type SerializeStructVariant = SerializeRecord<'a>;

    fn serialize_bool(self, v: bool) -> Result<Element> {
        self.primitive(v, "bool")
    }

    fn serialize_i8(self, v: i8) -> Result<Element> {
        self.primitive(v, "i8")
    }

    fn serialize_i16(self, v: i16) -> Result<Element> {
        self.primitive(v, "i16")
    }

    fn serialize_i32(self, v: i32) -> Result<Element> {
        self.primitive(v, "i32")
    }

    fn serialize_i64(self, v: i64) -> Result<Element> {
        self.primitive(v, "i64")
    }

    fn serialize_u8(self, v: u8) -> Result<Element> {
        self.primitive(v, "u8")
    }

    fn serialize_u16(self, v: u16) -> Result<Element> {
        self.primitive(v, "u16")
    }

    fn serialize_u32(self, v: u32) -> Result<Element> {
        self.primitive(v, "u32")
    }

    fn serialize_u64(self, v: u64) -> Result<Element> {
        self.primitive(v, "u64")
    }

    fn serialize_f32(self, v: f32) -> Result<Element> {
        self.primitive(v, "f32")
    }

    fn serialize_f64(self, v: f64) -> Result<Element> {
        self.primitive(v, "f64")
    }

    fn serialize_char(self, v: char) -> Result<Element> {
        self.primitive(v, "char")
    }

    fn serialize_str(self, v: &str) -> Result<Element> {
        self.primitive(v, "String")
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Element> {
        let bytes: Array = v.iter().copied().collect();
        self.dispatcher
            .serialize(Element::Array(bytes), &Target::collection())
    }

    fn serialize_none(self) -> Result<Element> {
        Ok(Element::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Element> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Element> {
        Ok(Element::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Element> {
        self.dispatcher.serialize(Element::Null, &Target::wrapper(name))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Element> {
        self.dispatcher
            .serialize(Element::from(variant), &Target::enumeration(name, &[]))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Element> {
        let inner = value.serialize(self)?;
        self.dispatcher.serialize(inner, &Target::wrapper(name))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Element> {
        let payload = value.serialize(self)?;
        self.dispatcher.serialize(
            Self::tagged(variant, payload),
            &Target::enumeration(name, &[]),
        )
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeArray<'a>> {
        Ok(SerializeArray::new(self, len.unwrap_or(0), ArrayKind::Seq))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray<'a>> {
        Ok(SerializeArray::new(self, len, ArrayKind::Seq))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize) -> Result<SerializeArray<'a>> {
        Ok(SerializeArray::new(self, len, ArrayKind::Wrapper(name)))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeArray<'a>> {
        Ok(SerializeArray::new(self, len, ArrayKind::Variant(name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap<'a>> {
        Ok(SerializeMap {
            ser: self,
            entries: Object::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeRecord<'a>> {
        Ok(SerializeRecord {
            ser: self,
            name,
            variant: None,
            fields: Object::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord<'a>> {
        Ok(SerializeRecord {
            ser: self,
            name,
            variant: Some(variant),
            fields: Object::new(),
        })
    }
}

#[derive(Clone, Copy)]
enum ArrayKind {
    Seq,
    Wrapper(&'static str),
    Variant(&'static str, &'static str),
}

pub struct SerializeArray<'a> {
    ser: ElementSerializer<'a>,
    items: Vec<Element>,
    kind: ArrayKind,
}

impl<'a> SerializeArray<'a> {
    fn new(ser: ElementSerializer<'a>, len: usize, kind: ArrayKind) -> Self {
        Self {
            ser,
            items: Vec::with_capacity(len),
            kind,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn finish(self) -> Result<Element> {
        let dispatcher = self.ser.dispatcher;
        let items = Element::Array(Array::from(self.items));
        match self.kind {
            ArrayKind::Seq => dispatcher.serialize(items, &Target::collection()),
            ArrayKind::Wrapper(name) => dispatcher.serialize(items, &Target::wrapper(name)),
            ArrayKind::Variant(name, variant) => dispatcher.serialize(
                ElementSerializer::tagged(variant, items),
                &Target::enumeration(name, &[]),
            ),
        }
    }
}

impl ser::SerializeSeq for SerializeArray<'_> {
    type Ok = Element;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Element> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeArray<'_> {
    type Ok = Element;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Element> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeArray<'_> {
    type Ok = Element;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Element> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeArray<'_> {
    type Ok = Element;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Element> {
        self.finish()
    }
}

pub struct SerializeMap<'a> {
    ser: ElementSerializer<'a>,
    entries: Object,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap<'_> {
    type Ok = Element;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.next_key = Some(key_text(key.serialize(self.ser)?));
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::Message("map value serialized before its key".to_string()))?;
        self.entries.insert(key, value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Element> {
        self.ser
            .dispatcher
            .serialize(Element::Object(self.entries), &Target::map())
    }
}

/// Collects struct and struct-variant fields in declaration order.
pub struct SerializeRecord<'a> {
    ser: ElementSerializer<'a>,
    name: &'static str,
    variant: Option<&'static str>,
    fields: Object,
}

impl SerializeRecord<'_> {
    fn field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.fields.insert(key, value.serialize(self.ser)?);
        Ok(())
    }

    fn finish(self) -> Result<Element> {
        let dispatcher = self.ser.dispatcher;
        let fields = Element::Object(self.fields);
        match self.variant {
            None => dispatcher.serialize(fields, &Target::object(self.name, &[])),
            Some(variant) => {
                let record_name = format!("{}::{}", self.name, variant);
                let record = dispatcher.serialize(fields, &Target::object(&record_name, &[]))?;
                dispatcher.serialize(
                    ElementSerializer::tagged(variant, record),
                    &Target::enumeration(self.name, &[]),
                )
            }
        }
    }
}

impl ser::SerializeStruct for SerializeRecord<'_> {
    type Ok = Element;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.field(key, value)
    }

    fn end(self) -> Result<Element> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeRecord<'_> {
    type Ok = Element;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.field(key, value)
    }

    fn end(self) -> Result<Element> {
        self.finish()
    }
}
