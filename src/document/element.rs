//! The element tree: an in-memory representation of any YAML value.
//!
//! Every YAML value is one of four kinds of [`Element`]: `Null`, a
//! [`Primitive`] (boolean, number, character or string), an [`Array`] of
//! elements or an [`Object`] mapping string keys to elements. Arrays and
//! objects keep insertion order.
//!
//! # Example
//!
//! ```
//! use yamlkit::document::element::{Array, Element, Object, Primitive};
//!
//! let mut server = Object::new();
//! server.insert("host", "localhost");
//! server.insert("port", 8080);
//!
//! let mut ports = Array::new();
//! ports.push(80);
//! ports.push(443);
//! server.insert("ports", ports);
//!
//! assert_eq!(server.len(), 3);
//! assert_eq!(server.get("port"), Some(&Element::from(8080)));
//! assert_eq!(Primitive::from(1), Primitive::from(1.0));
//! ```

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// What a single-key setter does when it is handed `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullPolicy {
    /// Setting `Null` removes the key.
    #[default]
    RemoveOnNull,
    /// Setting `Null` stores an explicit `Null` element.
    StoreNull,
}

/// A YAML number (integer or float).
///
/// Equality compares the numbers as `f64`, so `1` equals `1.0`, and NaN
/// equals NaN. Two integers compare exactly.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// Returns the value as `i64` when it is an integer or an integral float.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) if f.fract() == 0.0 && f.abs() < 9.2e18 => Some(*f as i64),
            Number::Float(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

/// Numeric equality with NaN equal to NaN.
///
/// An integer equals a float only when the float holds exactly that integer,
/// so equality stays transitive for integers beyond 2^53.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Number::Integer(i), Number::Float(f)) | (Number::Float(f), Number::Integer(i)) => {
                float_is_exactly(*f, *i)
            }
        }
    }
}

fn float_is_exactly(f: f64, i: i64) -> bool {
    // i64::MIN is -2^63; 2^63 itself is out of range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => write!(f, ".nan"),
            Number::Float(fl) if fl.is_infinite() => {
                write!(f, "{}", if *fl > 0.0 { ".inf" } else { "-.inf" })
            }
            Number::Float(fl) => write!(f, "{:?}", fl),
        }
    }
}

/// An immutable scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Number(Number),
    Char(char),
    String(String),
}

impl Primitive {
    /// Builds a primitive from a value whose type is only known at runtime.
    ///
    /// Succeeds for `bool`, every integer and float type, `char`, `String`
    /// and `&'static str`; anything else is an [`Error::InvalidPrimitive`].
    ///
    /// # Example
    ///
    /// ```
    /// use yamlkit::document::element::Primitive;
    ///
    /// assert_eq!(Primitive::from_any(&42u8).unwrap(), Primitive::from(42));
    /// assert!(Primitive::from_any(&vec![1, 2]).is_err());
    /// ```
    pub fn from_any<T: Any>(value: &T) -> Result<Self> {
        let any = value as &dyn Any;

        macro_rules! downcast {
            ($($ty:ty),*) => {
                $(
                    if let Some(v) = any.downcast_ref::<$ty>() {
                        return Ok(Primitive::from(*v));
                    }
                )*
            };
        }

        downcast!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

        if let Some(s) = any.downcast_ref::<String>() {
            return Ok(Primitive::String(s.clone()));
        }
        if let Some(s) = any.downcast_ref::<&'static str>() {
            return Ok(Primitive::String((*s).to_string()));
        }

        Err(Error::InvalidPrimitive {
            type_name: std::any::type_name::<T>().to_string(),
        })
    }

    /// Returns the name of the scalar kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Bool(_) => "boolean",
            Primitive::Number(_) => "number",
            Primitive::Char(_) => "character",
            Primitive::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Number(n) => write!(f, "{}", n),
            Primitive::Char(c) => write!(f, "{}", c),
            Primitive::String(s) => write!(f, "{}", s),
        }
    }
}

macro_rules! primitive_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    Primitive::Number(Number::Integer(i64::from(value)))
                }
            }
        )*
    };
}

macro_rules! primitive_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(i) => Primitive::Number(Number::Integer(i)),
                        Err(_) => Primitive::Number(Number::Float(value as f64)),
                    }
                }
            }
        )*
    };
}

primitive_from_int!(i8, i16, i32, i64, u8, u16, u32);
primitive_from_wide_int!(isize, u64, usize);

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<f32> for Primitive {
    fn from(value: f32) -> Self {
        Primitive::Number(Number::Float(f64::from(value)))
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Number(Number::Float(value))
    }
}

impl From<char> for Primitive {
    fn from(value: char) -> Self {
        Primitive::Char(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

impl From<Number> for Primitive {
    fn from(value: Number) -> Self {
        Primitive::Number(value)
    }
}

/// An ordered sequence of elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(Vec<Element>);

impl Array {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an element to the end of the array.
    pub fn push(&mut self, value: impl Into<Element>) {
        self.0.push(value.into());
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// down. Returns `None` when the index is out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Element> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.0.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.0.iter()
    }

    /// Borrows the backing storage without copying.
    pub fn as_slice(&self) -> &[Element] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Element> {
        self.0
    }
}

impl From<Vec<Element>> for Array {
    fn from(items: Vec<Element>) -> Self {
        Self(items)
    }
}

impl<T: Into<Element>> FromIterator<T> for Array {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for Array {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An ordered mapping from string keys to elements.
///
/// Keys are unique; re-inserting an existing key replaces its value and keeps
/// its position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object(IndexMap<String, Element>);

impl Object {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.0.get_mut(key)
    }

    /// Stores `value` under `key` as-is, including explicit `Null`s.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Element>) -> Option<Element> {
        self.0.insert(key.into(), value.into())
    }

    /// Single-key setter honouring a [`NullPolicy`].
    ///
    /// # Example
    ///
    /// ```
    /// use yamlkit::document::element::{Element, NullPolicy, Object};
    ///
    /// let mut obj = Object::new();
    /// obj.insert("a", 1);
    /// obj.set("a", Element::Null, NullPolicy::RemoveOnNull);
    /// assert!(!obj.contains_key("a"));
    ///
    /// obj.set("b", Element::Null, NullPolicy::StoreNull);
    /// assert_eq!(obj.get("b"), Some(&Element::Null));
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: Element, policy: NullPolicy) {
        let key = key.into();
        if value.is_null() && policy == NullPolicy::RemoveOnNull {
            self.0.shift_remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Element> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Element> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Element> {
        self.0.keys()
    }

    /// Borrows the backing map without copying.
    pub fn as_map(&self) -> &IndexMap<String, Element> {
        &self.0
    }

    pub fn into_map(self) -> IndexMap<String, Element> {
        self.0
    }
}

impl From<IndexMap<String, Element>> for Object {
    fn from(map: IndexMap<String, Element>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Element>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Object {
    type Item = (String, Element);
    type IntoIter = indexmap::map::IntoIter<String, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Element);
    type IntoIter = indexmap::map::Iter<'a, String, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A node in the YAML value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Element {
    #[default]
    Null,
    Primitive(Primitive),
    Array(Array),
    Object(Object),
}

impl Element {
    pub fn is_null(&self) -> bool {
        matches!(self, Element::Null)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Element::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Element::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Element::Object(_))
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Element::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Element::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Element::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Element::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Object> {
        match self {
            Element::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_primitive().and_then(Primitive::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Element::Primitive(Primitive::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Element::Primitive(Primitive::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Element::Primitive(Primitive::Number(n)) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Returns the name of the element kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Null => "null",
            Element::Primitive(p) => p.kind_name(),
            Element::Array(_) => "array",
            Element::Object(_) => "object",
        }
    }
}

/// Compact single-line flow rendering. Strings are written unquoted.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Null => write!(f, "null"),
            Element::Primitive(p) => write!(f, "{}", p),
            Element::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Element::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<Primitive> for Element {
    fn from(value: Primitive) -> Self {
        Element::Primitive(value)
    }
}

impl From<Array> for Element {
    fn from(value: Array) -> Self {
        Element::Array(value)
    }
}

impl From<Object> for Element {
    fn from(value: Object) -> Self {
        Element::Object(value)
    }
}

impl<T: Into<Element>> From<Option<T>> for Element {
    fn from(value: Option<T>) -> Self {
        value.map_or(Element::Null, Into::into)
    }
}

macro_rules! element_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::Primitive(Primitive::from(value))
                }
            }
        )*
    };
}

element_from_scalar!(
    bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, &str, String,
    Number
);
