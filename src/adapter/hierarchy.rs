//! Declared type relationships used for adapter fallback and field exposure.
//!
//! Rust has no class hierarchy to inspect at runtime, so callers declare the
//! relationships that matter to adapter lookup: a type may extend one parent
//! type and implement any number of capabilities. Capabilities are declared
//! like types and may themselves extend or implement others.
//!
//! The hierarchy is frozen by [`HierarchyBuilder::build`], which precomputes
//! for every declared type its ancestors ordered by distance. At equal
//! distance an ancestor reached only through parent links (a class) comes
//! before one reached through a capability, then declaration order breaks
//! the tie.
//!
//! # Example
//!
//! ```
//! use yamlkit::adapter::{HierarchyBuilder, Relation};
//!
//! let mut builder = HierarchyBuilder::new();
//! builder.declare("Dog").extends("Animal").implements("Pet");
//! builder.declare("Animal").implements("Named");
//! let hierarchy = builder.build();
//!
//! let names: Vec<_> = hierarchy.ancestors("Dog").iter().map(|a| a.name.as_str()).collect();
//! assert_eq!(names, ["Animal", "Pet", "Named"]);
//! assert_eq!(hierarchy.ancestors("Dog")[0].relation, Relation::Class);
//! ```

use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};

/// How an ancestor is reached from the type being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relation {
    /// Reached through parent links only.
    Class,
    /// Reached through at least one capability.
    Capability,
}

/// One precomputed ancestor of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub name: String,
    pub distance: usize,
    pub relation: Relation,
}

#[derive(Debug, Clone, Default)]
struct Declaration {
    parent: Option<String>,
    capabilities: Vec<String>,
    exposed: Vec<String>,
}

/// Collects type declarations before they are frozen.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    declarations: IndexMap<String, Declaration>,
}

/// Chained declaration of one type. Repeated declarations of the same name
/// extend the earlier one.
pub struct TypeDeclaration<'a> {
    entry: &'a mut Declaration,
}

impl TypeDeclaration<'_> {
    /// Sets the parent type. A later call replaces the parent.
    pub fn extends(self, parent: impl Into<String>) -> Self {
        self.entry.parent = Some(parent.into());
        self
    }

    pub fn implements(self, capability: impl Into<String>) -> Self {
        let capability = capability.into();
        if !self.entry.capabilities.contains(&capability) {
            self.entry.capabilities.push(capability);
        }
        self
    }

    /// Marks fields as exposed for `only_exposed_fields` mode.
    pub fn expose<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            if !self.entry.exposed.contains(&field) {
                self.entry.exposed.push(field);
            }
        }
        self
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>) -> TypeDeclaration<'_> {
        TypeDeclaration {
            entry: self.declarations.entry(name.into()).or_default(),
        }
    }

    /// Freezes the declarations and precomputes ancestor tables.
    pub fn build(self) -> TypeHierarchy {
        let mut ancestors = HashMap::new();
        let mut exposed = HashMap::new();

        for name in self.declarations.keys() {
            let table = self.ancestor_table(name);

            let mut fields: Vec<String> = Vec::new();
            let own = self.declarations.get(name).map(|d| d.exposed.as_slice());
            let inherited = table
                .iter()
                .filter_map(|a| self.declarations.get(&a.name))
                .map(|d| d.exposed.as_slice());
            for field in own.into_iter().chain(inherited).flatten() {
                if !fields.contains(field) {
                    fields.push(field.clone());
                }
            }

            exposed.insert(name.clone(), fields);
            ancestors.insert(name.clone(), table);
        }

        TypeHierarchy { ancestors, exposed }
    }

    fn ancestor_table(&self, name: &str) -> Vec<Ancestor> {
        let mut found: Vec<Ancestor> = Vec::new();
        let mut queue: VecDeque<(String, usize, Relation)> = VecDeque::new();
        queue.push_back((name.to_string(), 0, Relation::Class));

        while let Some((current, distance, relation)) = queue.pop_front() {
            let Some(decl) = self.declarations.get(&current) else {
                continue;
            };

            let parent = decl.parent.iter().map(|p| (p, relation));
            let capabilities = decl.capabilities.iter().map(|c| (c, Relation::Capability));

            for (next, next_relation) in parent.chain(capabilities) {
                if next == name {
                    continue;
                }
                match found.iter_mut().find(|a| &a.name == next) {
                    Some(existing) => {
                        // A class path at the same distance wins over a capability path.
                        if existing.distance == distance + 1 && next_relation < existing.relation {
                            existing.relation = next_relation;
                        }
                    }
                    None => {
                        found.push(Ancestor {
                            name: next.clone(),
                            distance: distance + 1,
                            relation: next_relation,
                        });
                        queue.push_back((next.clone(), distance + 1, next_relation));
                    }
                }
            }
        }

        // Stable sort keeps discovery order within equal keys.
        found.sort_by_key(|a| (a.distance, a.relation));
        found
    }
}

/// A frozen set of type declarations.
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    ancestors: HashMap<String, Vec<Ancestor>>,
    exposed: HashMap<String, Vec<String>>,
}

impl TypeHierarchy {
    /// An empty hierarchy: no type has ancestors or exposed fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ancestors of `name`, nearest first. Undeclared types have none.
    pub fn ancestors(&self, name: &str) -> &[Ancestor] {
        self.ancestors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fields exposed by `name` or any of its ancestors.
    pub fn exposed_fields(&self, name: &str) -> &[String] {
        self.exposed.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_exposed(&self, name: &str, field: &str) -> bool {
        self.exposed_fields(name).iter().any(|f| f == field)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.ancestors.contains_key(name)
    }
}
