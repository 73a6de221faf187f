//! Text output for element trees.
//!
//! - [`emitter`] - YAML in block, flow or canonical form
//! - [`json`] - compact or pretty JSON

pub mod emitter;
pub mod json;

pub use emitter::{emit, emit_all, emit_object};
pub use json::{emit_json, emit_json_object};
