//! The document facade.
//!
//! [`Yaml`] ties together a [`Config`], a [`TypeHierarchy`] and an
//! [`AdapterRegistry`]. It loads YAML and JSON text into element trees, reads
//! and writes them by path, binds them to native types, and writes them back
//! out as text. Every operation is a function of its inputs and the state
//! fixed at build time; nothing is global.
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use yamlkit::Yaml;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let yaml = Yaml::new();
//! let server: Server = yaml.to_object("host: localhost\nport: 8080\n").unwrap();
//! assert_eq!(server.port, 8080);
//!
//! let text = yaml.from_object(&server).unwrap();
//! assert_eq!(text, "host: \"localhost\"\nport: 8080\n");
//! ```

use crate::adapter::{AdapterRegistry, Dispatcher, HierarchyBuilder, TypeAdapter, TypeHierarchy, TypeKey};
use crate::config::Config;
use crate::document::element::{Element, Object};
use crate::document::parser::{parse_json, parse_yaml, parse_yaml_all};
use crate::error::{Error, Result};
use crate::format::{emit, emit_all, emit_json, emit_json_object, emit_object};
use crate::mapper::{from_element, to_element};
use crate::path::{resolver, Path};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Builds a [`Yaml`] facade.
///
/// # Example
///
/// ```
/// use yamlkit::config::Config;
/// use yamlkit::YamlBuilder;
///
/// let yaml = YamlBuilder::new()
///     .config(Config { only_enum_name_mentioned: true, ..Config::default() })
///     .declare(|h| {
///         h.declare("Dog").extends("Animal");
///     })
///     .build()
///     .unwrap();
/// assert!(yaml.hierarchy().is_declared("Dog"));
/// ```
#[derive(Default)]
pub struct YamlBuilder {
    config: Config,
    hierarchy: HierarchyBuilder,
    registry: AdapterRegistry,
}

impl YamlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Adds type declarations for adapter fallback and field exposure.
    pub fn declare<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut HierarchyBuilder),
    {
        f(&mut self.hierarchy);
        self
    }

    /// Registers an adapter, replacing any adapter under the same key.
    pub fn adapter<A>(mut self, key: impl Into<TypeKey>, adapter: A) -> Self
    where
        A: TypeAdapter + 'static,
    {
        self.registry.set(key, adapter);
        self
    }

    /// Validates the configuration and freezes the type hierarchy.
    pub fn build(self) -> Result<Yaml> {
        self.config.validate()?;
        Ok(Yaml {
            config: self.config,
            hierarchy: self.hierarchy.build(),
            registry: self.registry,
        })
    }
}

/// The document facade.
#[derive(Debug)]
pub struct Yaml {
    config: Config,
    hierarchy: TypeHierarchy,
    registry: AdapterRegistry,
}

impl Default for Yaml {
    fn default() -> Self {
        Self::new()
    }
}

impl Yaml {
    /// A facade with the default configuration and built-in adapters.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            hierarchy: TypeHierarchy::empty(),
            registry: AdapterRegistry::new(),
        }
    }

    pub fn builder() -> YamlBuilder {
        YamlBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AdapterRegistry {
        &mut self.registry
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry, &self.config, &self.hierarchy)
    }

    // ===== Loading =====

    /// Loads a YAML document whose root is a mapping.
    ///
    /// An empty document loads as an empty object.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed text, [`Error::UnsupportedStructure`]
    /// when the root is a sequence or a scalar.
    pub fn from_yaml(&self, text: &str) -> Result<Object> {
        debug!(bytes = text.len(), "loading YAML document");
        root_object(parse_yaml(text)?)
    }

    /// Loads a JSON document whose root is an object.
    pub fn from_json(&self, text: &str) -> Result<Object> {
        debug!(bytes = text.len(), "loading JSON document");
        root_object(parse_json(text)?)
    }

    /// Loads a YAML document with any root.
    pub fn load(&self, text: &str) -> Result<Element> {
        parse_yaml(text)
    }

    /// Loads every document of a YAML stream.
    pub fn load_all(&self, text: &str) -> Result<Vec<Element>> {
        let documents = parse_yaml_all(text)?;
        debug!(count = documents.len(), "loaded YAML stream");
        Ok(documents)
    }

    // ===== Writing =====

    pub fn to_yaml(&self, root: &Object) -> String {
        emit_object(root, &self.config)
    }

    /// Writes any element as a YAML document.
    pub fn dump(&self, element: &Element) -> String {
        emit(element, &self.config)
    }

    pub fn dump_all(&self, elements: &[Element]) -> String {
        emit_all(elements, &self.config)
    }

    pub fn to_json(&self, root: &Object) -> Result<String> {
        emit_json_object(root, &self.config)
    }

    pub fn dump_json(&self, element: &Element) -> Result<String> {
        emit_json(element, &self.config)
    }

    // ===== Binding =====

    /// Converts a native value into an element through the adapters.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Element> {
        to_element(value, &self.dispatcher())
    }

    /// Converts an element into a native value through the adapters.
    pub fn deserialize<T: DeserializeOwned>(&self, element: Element) -> Result<T> {
        from_element(element, &self.dispatcher())
    }

    /// Parses YAML text straight into a native value.
    pub fn to_object<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        self.deserialize(parse_yaml(text)?)
    }

    /// Writes a native value straight to YAML text.
    pub fn from_object<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(self.dump(&self.serialize(value)?))
    }

    // ===== Paths =====

    fn parse_path(&self, path: &str) -> Option<Path> {
        let parsed = Path::parse(path, self.config.path_separator);
        if parsed.is_none() {
            debug!(path, "ignoring malformed path");
        }
        parsed
    }

    /// Reads the element at a separator-joined path.
    pub fn get<'r>(&self, root: &'r Object, path: &str) -> Option<&'r Element> {
        let path = self.parse_path(path)?;
        resolver::get(root, path.segments())
    }

    /// Writes `value` at a separator-joined path, honouring the configured
    /// null policy. A malformed path leaves `root` unchanged.
    pub fn set(&self, root: Object, path: &str, value: impl Into<Element>) -> Object {
        match self.parse_path(path) {
            Some(path) => resolver::set(root, path.segments(), value.into(), self.config.null_policy),
            None => root,
        }
    }

    /// Removes the element at a separator-joined path. A malformed path
    /// leaves `root` unchanged.
    pub fn remove(&self, root: Object, path: &str) -> Object {
        match self.parse_path(path) {
            Some(path) => resolver::remove(root, path.segments()),
            None => root,
        }
    }
}

fn root_object(root: Element) -> Result<Object> {
    match root {
        Element::Null => Ok(Object::new()),
        Element::Object(obj) => Ok(obj),
        other => Err(Error::UnsupportedStructure {
            found: other.kind_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_empty_object() {
        assert!(Yaml::new().from_yaml("").unwrap().is_empty());
    }

    #[test]
    fn test_sequence_root_is_unsupported() {
        let err = Yaml::new().from_yaml("- a\n- b\n").unwrap_err();
        assert_eq!(err, Error::UnsupportedStructure { found: "array" });
    }

    #[test]
    fn test_malformed_path_is_a_no_op() {
        let yaml = Yaml::new();
        let root = yaml.from_yaml("a: 1\n").unwrap();
        assert_eq!(yaml.get(&root, "a..b"), None);
        let same = yaml.set(root.clone(), ".a", 2);
        assert_eq!(same, root);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = YamlBuilder::new()
            .config(Config {
                indent: 0,
                ..Config::default()
            })
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
