//! The adapter registry.
//!
//! A registry starts with the built-in adapters for every fundamental kind
//! and can be extended with adapters for named types or whole kinds. The
//! built-ins for primitives, collections, maps and objects cannot be
//! removed, only replaced, so every node always has a working adapter.

use super::builtin::{CollectionAdapter, EnumAdapter, MapAdapter, PrimitiveAdapter};
use super::hierarchy::TypeHierarchy;
use super::reflect::ObjectAdapter;
use super::{Kind, Target, TypeAdapter, TypeKey};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// How an adapter was found for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Registered under the target's own name.
    Exact(&'a str),
    /// Registered under a declared ancestor of the target.
    Ancestor { name: &'a str, distance: usize },
    /// Registered for the target's kind.
    Kind(Kind),
    /// No match; the reflective adapter is used.
    Fallback,
}

/// Maps type keys to adapters.
pub struct AdapterRegistry {
    named: HashMap<String, Box<dyn TypeAdapter>>,
    kinds: HashMap<Kind, Box<dyn TypeAdapter>>,
    fallback: ObjectAdapter,
}

impl AdapterRegistry {
    /// Creates a registry holding the built-in adapters.
    pub fn new() -> Self {
        let mut kinds: HashMap<Kind, Box<dyn TypeAdapter>> = HashMap::new();
        kinds.insert(Kind::Primitive, Box::new(PrimitiveAdapter));
        kinds.insert(Kind::Collection, Box::new(CollectionAdapter));
        kinds.insert(Kind::Map, Box::new(MapAdapter));
        kinds.insert(Kind::Enum, Box::new(EnumAdapter));
        kinds.insert(Kind::Object, Box::new(ObjectAdapter));

        Self {
            named: HashMap::new(),
            kinds,
            fallback: ObjectAdapter,
        }
    }

    /// Registers `adapter` under `key`, replacing any previous adapter.
    ///
    /// Returns `true` if an adapter was replaced.
    pub fn set<A>(&mut self, key: impl Into<TypeKey>, adapter: A) -> bool
    where
        A: TypeAdapter + 'static,
    {
        let key = key.into();
        debug!(?key, "registering adapter");
        match key {
            TypeKey::Kind(kind) => self.kinds.insert(kind, Box::new(adapter)).is_some(),
            TypeKey::Named(name) => self.named.insert(name, Box::new(adapter)).is_some(),
        }
    }

    /// Registers `adapter` under `key` unless an adapter is already present.
    ///
    /// Returns `true` if the adapter was registered.
    pub fn set_if_absent<A>(&mut self, key: impl Into<TypeKey>, adapter: A) -> bool
    where
        A: TypeAdapter + 'static,
    {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.set(key, adapter);
        true
    }

    /// Removes the adapter registered under `key`.
    ///
    /// Removing the primitive, collection, map or object kind adapters is
    /// refused. Returns `true` if an adapter was removed.
    pub fn remove(&mut self, key: impl Into<TypeKey>) -> bool {
        match key.into() {
            TypeKey::Kind(kind @ (Kind::Primitive | Kind::Collection | Kind::Map | Kind::Object)) => {
                warn!(%kind, "refusing to remove built-in adapter");
                false
            }
            TypeKey::Kind(kind) => self.kinds.remove(&kind).is_some(),
            TypeKey::Named(name) => self.named.remove(&name).is_some(),
        }
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        match key {
            TypeKey::Kind(kind) => self.kinds.contains_key(kind),
            TypeKey::Named(name) => self.named.contains_key(name),
        }
    }

    /// Finds the adapter for `target`.
    pub fn resolve<'s>(
        &'s self,
        target: &Target<'s>,
        hierarchy: &'s TypeHierarchy,
    ) -> (&'s dyn TypeAdapter, Resolution<'s>) {
        if let Some(name) = target.name {
            if let Some(adapter) = self.named.get(name) {
                return (adapter.as_ref(), Resolution::Exact(name));
            }
            for ancestor in hierarchy.ancestors(name) {
                if let Some(adapter) = self.named.get(&ancestor.name) {
                    let resolution = Resolution::Ancestor {
                        name: &ancestor.name,
                        distance: ancestor.distance,
                    };
                    return (adapter.as_ref(), resolution);
                }
            }
        }

        match self.kinds.get(&target.kind) {
            Some(adapter) => (adapter.as_ref(), Resolution::Kind(target.kind)),
            None => (&self.fallback, Resolution::Fallback),
        }
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut named: Vec<_> = self.named.keys().collect();
        named.sort();
        let mut kinds: Vec<_> = self.kinds.keys().map(Kind::to_string).collect();
        kinds.sort();
        f.debug_struct("AdapterRegistry")
            .field("named", &named)
            .field("kinds", &kinds)
            .finish()
    }
}
