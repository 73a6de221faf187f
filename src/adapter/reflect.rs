//! The reflective record adapter.
//!
//! Records reach this adapter as objects keyed by field name, in declaration
//! order, produced by serde's derived `Serialize`. Fields marked
//! `#[serde(skip)]` never appear. On the way back the object is handed to
//! serde's derived visitor, which writes each field straight into the record
//! without running any user constructor.
//!
//! Loading is strict: the object's keys must be exactly the record's fields.
//! A record that would be only partially populated is rejected with
//! [`Error::SchemaMismatch`] listing both the missing fields and the
//! unexpected keys.
//!
//! Two configuration flags shape the mapping:
//!
//! * `exclude_null_values` drops null fields when writing, and accepts
//!   missing fields (as null) when reading.
//! * `only_exposed_fields` keeps only the fields declared with
//!   [`expose`](super::hierarchy::TypeDeclaration::expose), in both
//!   directions. Unexposed fields are left to `#[serde(default)]`.

use super::{Context, Kind, Target, TypeAdapter};
use crate::document::element::{Element, Object};
use crate::error::{Error, Result};
use tracing::trace;

/// Maps records to objects by field name. Also the fallback adapter: for any
/// target that is not a record it passes elements through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectAdapter;

impl ObjectAdapter {
    fn exposure_filter<'c>(target: &Target<'_>, ctx: &Context<'c>) -> Option<&'c [String]> {
        if !ctx.config.only_exposed_fields {
            return None;
        }
        Some(target.name.map_or(&[][..], |name| ctx.hierarchy.exposed_fields(name)))
    }
}

impl TypeAdapter for ObjectAdapter {
    fn serialize(&self, value: Element, target: &Target<'_>, ctx: &Context<'_>) -> Result<Element> {
        let fields = match value {
            Element::Object(fields) if target.kind == Kind::Object => fields,
            other => return Ok(other),
        };

        let exposed = Self::exposure_filter(target, ctx);
        let exclude_null = ctx.config.exclude_null_values;

        let out: Object = fields
            .into_iter()
            .filter(|(key, _)| exposed.map_or(true, |names| names.iter().any(|n| n == key)))
            .filter(|(_, value)| !(exclude_null && value.is_null()))
            .collect();
        Ok(Element::Object(out))
    }

    fn deserialize(&self, element: Element, target: &Target<'_>, ctx: &Context<'_>) -> Result<Element> {
        if target.kind != Kind::Object {
            return Ok(element);
        }
        let entries = match element {
            Element::Object(entries) => entries,
            other => {
                return Err(Error::TypeMismatch {
                    expected: "object",
                    found: other.kind_name(),
                })
            }
        };

        let exposed = Self::exposure_filter(target, ctx);
        let is_visible = |name: &str| exposed.map_or(true, |names| names.iter().any(|n| n == name));

        let mut entries: Object = entries
            .into_iter()
            .filter(|(key, _)| {
                let keep = is_visible(key.as_str());
                if !keep {
                    trace!(field = %key, "dropping unexposed key");
                }
                keep
            })
            .collect();

        let expected: Vec<&str> = target.fields.iter().copied().filter(|&f| is_visible(f)).collect();

        let mut missing: Vec<String> = expected
            .iter()
            .filter(|&&f| !entries.contains_key(f))
            .map(|f| f.to_string())
            .collect();
        let unexpected: Vec<String> = entries
            .keys()
            .filter(|k| !expected.iter().any(|f| *f == k.as_str()))
            .cloned()
            .collect();

        if ctx.config.exclude_null_values && unexpected.is_empty() {
            for field in missing.drain(..) {
                entries.insert(field, Element::Null);
            }
        }

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(Error::SchemaMismatch {
                type_name: target.display_name(),
                missing,
                unexpected,
            });
        }
        Ok(Element::Object(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::HierarchyBuilder;
    use crate::config::Config;

    const FIELDS: &[&str] = &["a", "b"];

    fn object(pairs: &[(&str, Element)]) -> Element {
        Element::Object(pairs.iter().cloned().collect())
    }

    #[test]
    fn test_exact_field_set_passes() {
        let config = Config::default();
        let hierarchy = HierarchyBuilder::new().build();
        let ctx = Context {
            config: &config,
            hierarchy: &hierarchy,
        };
        let input = object(&[("a", Element::from(1)), ("b", Element::from(2))]);
        let out = ObjectAdapter
            .deserialize(input.clone(), &Target::object("Pair", FIELDS), &ctx)
            .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_mismatch_reports_both_sides() {
        let config = Config::default();
        let hierarchy = HierarchyBuilder::new().build();
        let ctx = Context {
            config: &config,
            hierarchy: &hierarchy,
        };
        let input = object(&[("a", Element::from(1)), ("c", Element::from(3))]);
        let err = ObjectAdapter
            .deserialize(input, &Target::object("Pair", FIELDS), &ctx)
            .unwrap_err();
        assert_eq!(
            err,
            Error::SchemaMismatch {
                type_name: "Pair".to_string(),
                missing: vec!["b".to_string()],
                unexpected: vec!["c".to_string()],
            }
        );
    }

    #[test]
    fn test_non_record_targets_pass_through() {
        let config = Config::default();
        let hierarchy = HierarchyBuilder::new().build();
        let ctx = Context {
            config: &config,
            hierarchy: &hierarchy,
        };
        let value = Element::from("x");
        let out = ObjectAdapter
            .serialize(value.clone(), &Target::wrapper("Name"), &ctx)
            .unwrap();
        assert_eq!(out, value);
    }

    #[test]
    fn test_exposure_on_serialize() {
        let config = Config {
            only_exposed_fields: true,
            ..Config::default()
        };
        let mut builder = HierarchyBuilder::new();
        builder.declare("Pair").expose(["a"]);
        let hierarchy = builder.build();
        let ctx = Context {
            config: &config,
            hierarchy: &hierarchy,
        };
        let input = object(&[("a", Element::from(1)), ("b", Element::from(2))]);
        let out = ObjectAdapter
            .serialize(input, &Target::new(Kind::Object, Some("Pair")), &ctx)
            .unwrap();
        assert_eq!(out, object(&[("a", Element::from(1))]));
    }
}
