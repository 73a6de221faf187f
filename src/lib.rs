//! YAMLKit - a YAML document model with path addressing and typed data binding.
//!
//! yamlkit parses YAML (or JSON) text into an ordered element tree, lets you
//! read and rewrite that tree through hierarchical paths, binds it to native
//! Rust types through serde and a registry of type adapters, and writes it
//! back out as YAML or JSON.
//!
//! # Modules
//!
//! - [`document`] - the element tree, parsing and generic conversion
//! - [`path`] - path strings and copy-on-write path resolution
//! - [`adapter`] - type adapters, their registry and the type hierarchy
//! - [`mapper`] - serde `Serializer`/`Deserializer` over elements
//! - [`format`] - YAML and JSON text output
//! - [`config`] - formatting and binding options
//! - [`yaml`] - the [`Yaml`] facade
//! - [`error`] - the error type
//!
//! # Example
//!
//! ```
//! use yamlkit::Yaml;
//!
//! let yaml = Yaml::new();
//! let root = yaml.from_yaml("a:\n  b: 1\n  c: true\n").unwrap();
//! assert_eq!(yaml.get(&root, "a.b").and_then(|e| e.as_i64()), Some(1));
//!
//! let root = yaml.set(root, "a.d", "x");
//! assert!(yaml.to_yaml(&root).contains("d: \"x\""));
//! ```

pub mod adapter;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod mapper;
pub mod path;
pub mod yaml;

pub use document::{Array, Element, NullPolicy, Number, Object, Primitive};
pub use error::{Error, Result};
pub use yaml::{Yaml, YamlBuilder};
