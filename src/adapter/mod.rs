//! Type adapters: per-type strategies between native values and elements.
//!
//! Native values reach yamlkit through serde. The [`mapper`](crate::mapper)
//! serializer turns every serde node into its *reflected form* (structs become
//! objects keyed by field name, sequences become arrays, unit enum variants
//! become the variant name, and so on) and hands it to the [`Dispatcher`]. The
//! dispatcher resolves a [`TypeAdapter`] for the node's [`Target`] and lets it
//! rewrite the reflected form into the document form that is stored in the
//! tree. Loading runs the same pipeline backwards.
//!
//! Adapters are resolved in this order:
//!
//! 1. an adapter registered under the node's type name,
//! 2. an adapter registered under the nearest declared ancestor of that name
//!    (see [`hierarchy`]),
//! 3. the adapter registered for the node's [`Kind`],
//! 4. the reflective [`ObjectAdapter`](reflect::ObjectAdapter).
//!
//! # Example
//!
//! ```
//! use yamlkit::adapter::{Context, Target, TypeAdapter};
//! use yamlkit::document::Element;
//! use yamlkit::Result;
//!
//! /// Stores a `Celsius` newtype as a string such as `"21.5C"`.
//! struct CelsiusAdapter;
//!
//! impl TypeAdapter for CelsiusAdapter {
//!     fn serialize(&self, value: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
//!         Ok(Element::from(format!("{}C", value)))
//!     }
//!
//!     fn deserialize(&self, element: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
//!         let text = element.as_str().unwrap_or_default().trim_end_matches('C');
//!         Ok(text.parse::<f64>().map(Element::from).unwrap_or(Element::Null))
//!     }
//! }
//! ```

pub mod builtin;
pub mod hierarchy;
pub mod reflect;
pub mod registry;

use crate::config::Config;
use crate::document::element::Element;
use crate::error::Result;
use std::fmt;
use tracing::trace;

pub use builtin::{CollectionAdapter, EnumAdapter, MapAdapter, PrimitiveAdapter};
pub use hierarchy::{HierarchyBuilder, Relation, TypeHierarchy};
pub use reflect::ObjectAdapter;
pub use registry::{AdapterRegistry, Resolution};

/// The structural kind of a serde node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Booleans, numbers, characters and strings. Named after the Rust
    /// primitive (`"i64"`, `"bool"`, `"String"`).
    Primitive,
    /// Sequences and tuples.
    Collection,
    /// Maps with arbitrary keys.
    Map,
    /// Enums. Named after the enum.
    Enum,
    /// Structs and struct variants. Named after the struct, or
    /// `Enum::Variant` for struct variants.
    Object,
    /// Newtype, tuple and unit structs. Named after the struct.
    Wrapper,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Primitive => "primitive",
            Kind::Collection => "collection",
            Kind::Map => "map",
            Kind::Enum => "enum",
            Kind::Object => "object",
            Kind::Wrapper => "wrapper",
        };
        write!(f, "{}", name)
    }
}

/// A registry key: either a whole kind or one named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Kind(Kind),
    Named(String),
}

impl From<Kind> for TypeKey {
    fn from(kind: Kind) -> Self {
        TypeKey::Kind(kind)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        TypeKey::Named(name.to_string())
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        TypeKey::Named(name)
    }
}

/// Describes the native type on the other side of one conversion.
///
/// During serialization only `kind` and `name` are known. During
/// deserialization serde also reports the declared `fields` of structs and
/// the declared `variants` of enums.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub kind: Kind,
    pub name: Option<&'a str>,
    pub fields: &'static [&'static str],
    pub variants: &'static [&'static str],
}

impl<'a> Target<'a> {
    pub fn new(kind: Kind, name: Option<&'a str>) -> Self {
        Self {
            kind,
            name,
            fields: &[],
            variants: &[],
        }
    }

    pub fn primitive(name: &'a str) -> Self {
        Self::new(Kind::Primitive, Some(name))
    }

    pub fn collection() -> Self {
        Self::new(Kind::Collection, None)
    }

    pub fn map() -> Self {
        Self::new(Kind::Map, None)
    }

    pub fn wrapper(name: &'a str) -> Self {
        Self::new(Kind::Wrapper, Some(name))
    }

    pub fn object(name: &'a str, fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            ..Self::new(Kind::Object, Some(name))
        }
    }

    pub fn enumeration(name: &'a str, variants: &'static [&'static str]) -> Self {
        Self {
            variants,
            ..Self::new(Kind::Enum, Some(name))
        }
    }

    /// The name used in error messages.
    pub fn display_name(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => self.kind.to_string(),
        }
    }
}

/// Read-only state shared with every adapter call.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a Config,
    pub hierarchy: &'a TypeHierarchy,
}

/// A conversion strategy between reflected form and document form.
///
/// Both directions take ownership of the element so that pass-through
/// adapters cost nothing.
pub trait TypeAdapter: Send + Sync {
    /// Converts the reflected form of a native value into document form.
    fn serialize(&self, value: Element, target: &Target<'_>, ctx: &Context<'_>) -> Result<Element>;

    /// Converts document form back into the reflected form serde expects.
    fn deserialize(&self, element: Element, target: &Target<'_>, ctx: &Context<'_>)
        -> Result<Element>;
}

/// Routes each node to the adapter resolved for its target.
pub struct Dispatcher<'a> {
    registry: &'a AdapterRegistry,
    ctx: Context<'a>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a AdapterRegistry, config: &'a Config, hierarchy: &'a TypeHierarchy) -> Self {
        Self {
            registry,
            ctx: Context { config, hierarchy },
        }
    }

    pub fn context(&self) -> &Context<'a> {
        &self.ctx
    }

    pub fn serialize(&self, value: Element, target: &Target<'_>) -> Result<Element> {
        let (adapter, resolution) = self.registry.resolve(target, self.ctx.hierarchy);
        trace!(target = %target.display_name(), ?resolution, "serialize");
        adapter.serialize(value, target, &self.ctx)
    }

    pub fn deserialize(&self, element: Element, target: &Target<'_>) -> Result<Element> {
        let (adapter, resolution) = self.registry.resolve(target, self.ctx.hierarchy);
        trace!(target = %target.display_name(), ?resolution, "deserialize");
        adapter.deserialize(element, target, &self.ctx)
    }
}
