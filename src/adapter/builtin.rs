//! Built-in adapters for primitives, collections, maps and enums.

use super::{Context, Target, TypeAdapter};
use crate::document::element::{Array, Element, Object, Primitive};
use crate::error::{Error, Result};

/// Passes scalars through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveAdapter;

impl PrimitiveAdapter {
    fn check(element: Element) -> Result<Element> {
        match element {
            Element::Null | Element::Primitive(_) => Ok(element),
            other => Err(Error::TypeMismatch {
                expected: "primitive",
                found: other.kind_name(),
            }),
        }
    }
}

impl TypeAdapter for PrimitiveAdapter {
    fn serialize(&self, value: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
        Self::check(value)
    }

    fn deserialize(&self, element: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
        Self::check(element)
    }
}

/// Passes arrays through. A missing collection loads as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionAdapter;

impl TypeAdapter for CollectionAdapter {
    fn serialize(&self, value: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
        Ok(value)
    }

    fn deserialize(&self, element: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
        match element {
            Element::Null => Ok(Element::Array(Array::new())),
            Element::Array(_) => Ok(element),
            other => Err(Error::TypeMismatch {
                expected: "array",
                found: other.kind_name(),
            }),
        }
    }
}

/// Passes objects through. A missing map loads as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapAdapter;

impl TypeAdapter for MapAdapter {
    fn serialize(&self, value: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
        Ok(value)
    }

    fn deserialize(&self, element: Element, _: &Target<'_>, _: &Context<'_>) -> Result<Element> {
        match element {
            Element::Null => Ok(Element::Object(Object::new())),
            Element::Object(_) => Ok(element),
            other => Err(Error::TypeMismatch {
                expected: "object",
                found: other.kind_name(),
            }),
        }
    }
}

/// Writes enum constants by name.
///
/// A unit variant `Green` of enum `Color` is written as `"Color.Green"`, or
/// `"Green"` when `only_enum_name_mentioned` is set. Variants carrying data
/// become a single-key object under the same name. Renamed variants
/// (`#[serde(rename = "...")]`) use their serialized name.
///
/// Loading accepts both the qualified and the bare form.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumAdapter;

impl EnumAdapter {
    fn qualify(variant: &str, target: &Target<'_>, ctx: &Context<'_>) -> String {
        match target.name {
            Some(name) if !ctx.config.only_enum_name_mentioned => format!("{}.{}", name, variant),
            _ => variant.to_string(),
        }
    }

    fn resolve(constant: String, target: &Target<'_>) -> Result<String> {
        let variant = match target.name {
            Some(name) => constant
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(str::to_string),
            None => None,
        }
        .unwrap_or_else(|| constant.clone());

        if !target.variants.is_empty() && !target.variants.iter().any(|v| *v == variant) {
            return Err(Error::UnknownEnumConstant {
                enum_name: target.display_name(),
                constant,
            });
        }
        Ok(variant)
    }
}

impl TypeAdapter for EnumAdapter {
    fn serialize(&self, value: Element, target: &Target<'_>, ctx: &Context<'_>) -> Result<Element> {
        match value {
            Element::Primitive(Primitive::String(variant)) => {
                Ok(Element::from(Self::qualify(&variant, target, ctx)))
            }
            Element::Object(tagged) if tagged.len() == 1 => Ok(Element::Object(
                tagged
                    .into_iter()
                    .map(|(variant, payload)| (Self::qualify(&variant, target, ctx), payload))
                    .collect(),
            )),
            other => Err(Error::TypeMismatch {
                expected: "enum variant",
                found: other.kind_name(),
            }),
        }
    }

    fn deserialize(&self, element: Element, target: &Target<'_>, _: &Context<'_>) -> Result<Element> {
        match element {
            Element::Primitive(Primitive::String(constant)) => {
                Ok(Element::from(Self::resolve(constant, target)?))
            }
            Element::Object(tagged) if tagged.len() == 1 => {
                let mut out = Object::new();
                for (constant, payload) in tagged {
                    out.insert(Self::resolve(constant, target)?, payload);
                }
                Ok(Element::Object(out))
            }
            other => Err(Error::TypeMismatch {
                expected: "enum variant",
                found: other.kind_name(),
            }),
        }
    }
}
