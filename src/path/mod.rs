//! Hierarchical path addressing over the element tree.
//!
//! - [`parser`] - path strings such as `server.tls.cert`
//! - [`resolver`] - `get`, `set` and `remove` by path with copy-on-write semantics

pub mod parser;
pub mod resolver;

pub use parser::Path;
pub use resolver::{get, remove, set};
