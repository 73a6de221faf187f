//! Error types for loading, addressing and binding YAML documents.

use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while parsing text, building elements or mapping
/// elements to and from native values.
///
/// Every variant is terminal for the operation that raised it: parsing and
/// mapping are deterministic, so callers retry only with corrected input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input text was not valid YAML or JSON.
    #[error("{format} parse error: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// A primitive was requested from a value that is not a boolean,
    /// number, character or string.
    #[error("invalid primitive: `{type_name}` is not a boolean, number, character or string")]
    InvalidPrimitive { type_name: String },

    /// The keys of an object did not match the fields of the target record.
    #[error(
        "schema mismatch for `{type_name}`: missing fields {missing:?}, unexpected keys {unexpected:?}"
    )]
    SchemaMismatch {
        type_name: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// No variant of the enum matched the serialized constant.
    #[error("unknown constant `{constant}` for enum `{enum_name}`")]
    UnknownEnumConstant { enum_name: String, constant: String },

    /// The document root was not an object where one was required.
    #[error("unsupported structure: expected an object at the document root, found {found}")]
    UnsupportedStructure { found: &'static str },

    /// An element had a different shape than the adapter expected.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An invalid option in a configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A message raised from inside a serde implementation.
    #[error("{0}")]
    Message(String),
}

/// Convenience alias used throughout yamlkit.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Parse {
            format: "YAML",
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse {
            format: "JSON",
            message: err.to_string(),
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_message_lists_keys() {
        let err = Error::SchemaMismatch {
            type_name: "Point".to_string(),
            missing: vec!["y".to_string()],
            unexpected: vec!["z".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("`Point`"));
        assert!(msg.contains("\"y\""));
        assert!(msg.contains("\"z\""));
    }

    #[test]
    fn test_yaml_error_converts_to_parse() {
        let err: Error = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Parse { format: "YAML", .. }));
    }
}
