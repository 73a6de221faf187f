//! The YAML element tree and its text front ends.

pub mod convert;
pub mod element;
pub mod parser;
mod serde_impls;

pub use element::{Array, Element, NullPolicy, Number, Object, Primitive};
