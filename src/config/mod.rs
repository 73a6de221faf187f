//! Configuration system for yamlkit.
//!
//! This module provides the configuration structure shared by the facade,
//! the text emitters and every type adapter. A configuration is an explicit
//! value handed to [`Yaml`](crate::yaml::Yaml) at build time; it is never a
//! process-wide singleton. Configuration can be loaded from TOML files.
//!
//! # Example
//!
//! ```
//! use yamlkit::config::{Config, FlowStyle};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.indent, 2);
//! assert_eq!(config.flow_style, FlowStyle::Block);
//!
//! // Create custom configuration
//! let custom = Config {
//!     indent: 4,
//!     only_enum_name_mentioned: true,
//!     ..Config::default()
//! };
//! assert!(custom.validate().is_ok());
//! ```

use crate::document::element::NullPolicy;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quoting style used for string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalarStyle {
    /// Unquoted whenever the text reads back as the same string.
    Plain,
    SingleQuoted,
    DoubleQuoted,
    /// `|` block for multi-line strings.
    Literal,
    /// `>` block for multi-line strings.
    Folded,
}

/// Layout used for arrays and objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowStyle {
    /// Indented block collections.
    Block,
    /// `[a, b]` and `{k: v}` collections.
    Flow,
    /// Block collections, with collections of scalars written in flow.
    Auto,
}

/// Line terminator written by the emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineBreak {
    Unix,
    Windows,
    Mac,
}

impl LineBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Unix => "\n",
            LineBreak::Windows => "\r\n",
            LineBreak::Mac => "\r",
        }
    }
}

/// How strings containing non-printable characters are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NonPrintableStyle {
    /// Double-quoted with `\xNN` / `\uNNNN` escapes.
    Escape,
    /// Requested binary encoding. Written like `Escape`.
    Binary,
}

/// Configuration for yamlkit.
///
/// All fields have sensible defaults via `Config::default()`, and every field
/// may be omitted from a TOML file.
///
/// # Fields
///
/// * `indent` - Spaces per indentation level, 2 to 9 (default: 2)
/// * `width` - Preferred line width for flow output (default: 80)
/// * `max_key_length` - Keys longer than this use the explicit `? key` form (default: 128)
/// * `canonical` - Canonical output: `---`, flow collections, tagged scalars (default: false)
/// * `allow_unicode` - Write non-ASCII characters as-is instead of escaping (default: true)
/// * `pretty_flow` - One entry per line inside flow collections (default: false)
/// * `split_lines` - Wrap long flow collections at `width` (default: true)
/// * `scalar_style` - Quoting style for string values (default: double-quoted)
/// * `flow_style` - Collection layout (default: block)
/// * `line_break` - Line terminator (default: unix)
/// * `non_printable_style` - Non-printable character policy (default: escape)
/// * `only_exposed_fields` - Map only fields declared as exposed (default: false)
/// * `only_enum_name_mentioned` - Write enum constants without the enum name (default: false)
/// * `exclude_null_values` - Drop null fields when serializing records (default: false)
/// * `timezone` - Time zone name made available to custom adapters (default: "UTC")
/// * `null_policy` - What setting a key to null does (default: remove-on-null)
/// * `path_separator` - Separator for path strings (default: '.')
/// * `json_pretty` - Pretty-print JSON output (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Preferred line width
    #[serde(default = "default_width")]
    pub width: usize,

    /// Longest key written in simple form
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,

    /// Canonical output
    #[serde(default)]
    pub canonical: bool,

    /// Write non-ASCII characters unescaped
    #[serde(default = "default_true")]
    pub allow_unicode: bool,

    /// One entry per line inside flow collections
    #[serde(default)]
    pub pretty_flow: bool,

    /// Wrap long flow collections
    #[serde(default = "default_true")]
    pub split_lines: bool,

    #[serde(default = "default_scalar_style")]
    pub scalar_style: ScalarStyle,

    #[serde(default = "default_flow_style")]
    pub flow_style: FlowStyle,

    #[serde(default = "default_line_break")]
    pub line_break: LineBreak,

    #[serde(default = "default_non_printable_style")]
    pub non_printable_style: NonPrintableStyle,

    /// Map only fields declared as exposed
    #[serde(default)]
    pub only_exposed_fields: bool,

    /// Write enum constants without the enum name
    #[serde(default)]
    pub only_enum_name_mentioned: bool,

    /// Drop null fields when serializing records
    #[serde(default)]
    pub exclude_null_values: bool,

    /// Time zone name, opaque to yamlkit itself
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub null_policy: NullPolicy,

    /// Separator for path strings
    #[serde(default = "default_path_separator")]
    pub path_separator: char,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub json_pretty: bool,
}

fn default_indent() -> usize {
    2
}

fn default_width() -> usize {
    80
}

fn default_max_key_length() -> usize {
    128
}

fn default_true() -> bool {
    true
}

fn default_scalar_style() -> ScalarStyle {
    ScalarStyle::DoubleQuoted
}

fn default_flow_style() -> FlowStyle {
    FlowStyle::Block
}

fn default_line_break() -> LineBreak {
    LineBreak::Unix
}

fn default_non_printable_style() -> NonPrintableStyle {
    NonPrintableStyle::Escape
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_path_separator() -> char {
    '.'
}

impl Default for Config {
    /// Creates a new configuration with default values.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlkit::config::{Config, ScalarStyle};
    ///
    /// let config = Config::default();
    /// assert_eq!(config.width, 80);
    /// assert_eq!(config.scalar_style, ScalarStyle::DoubleQuoted);
    /// assert!(!config.exclude_null_values);
    /// ```
    fn default() -> Self {
        Self {
            indent: default_indent(),
            width: default_width(),
            max_key_length: default_max_key_length(),
            canonical: false,
            allow_unicode: true,
            pretty_flow: false,
            split_lines: true,
            scalar_style: default_scalar_style(),
            flow_style: default_flow_style(),
            line_break: default_line_break(),
            non_printable_style: default_non_printable_style(),
            only_exposed_fields: false,
            only_enum_name_mentioned: false,
            exclude_null_values: false,
            timezone: default_timezone(),
            null_policy: NullPolicy::default(),
            path_separator: default_path_separator(),
            json_pretty: true,
        }
    }
}

impl Config {
    /// Checks option ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `indent` is outside 2..=9, `width` is
    /// shorter than `indent`, `max_key_length` is zero, `timezone` is empty,
    /// or `path_separator` is a backslash.
    pub fn validate(&self) -> Result<()> {
        if !(2..=9).contains(&self.indent) {
            return Err(Error::Config(format!(
                "indent must be between 2 and 9, got {}",
                self.indent
            )));
        }
        if self.width <= self.indent {
            return Err(Error::Config(format!(
                "width {} must be greater than indent {}",
                self.width, self.indent
            )));
        }
        if self.max_key_length == 0 {
            return Err(Error::Config("max_key_length must be positive".to_string()));
        }
        if self.timezone.trim().is_empty() {
            return Err(Error::Config("timezone must not be empty".to_string()));
        }
        if self.path_separator == '\\' {
            return Err(Error::Config(
                "path_separator cannot be the escape character".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlkit/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlkit");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config file");
                Self::default()
            }
        }
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_indent_out_of_range() {
        let config = Config {
            indent: 12,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_line_break_text() {
        assert_eq!(LineBreak::Windows.as_str(), "\r\n");
        assert_eq!(LineBreak::Mac.as_str(), "\r");
    }
}
