//! YAML text output.
//!
//! This module writes an [`Element`] tree as YAML text, honouring the
//! formatting options of a [`Config`]: indentation, block or flow layout,
//! scalar quoting style, line width, line breaks, canonical form and unicode
//! escaping.
//!
//! Block output nests mappings by `indent` spaces and indents sequences under
//! their key. Keys are written plain unless they need quoting; string values
//! follow `scalar_style`. A string is never written plain if reading it back
//! would produce anything other than the same string.
//!
//! # Example
//!
//! ```
//! use yamlkit::config::Config;
//! use yamlkit::document::parser::parse_yaml;
//! use yamlkit::format::emitter::emit;
//!
//! let root = parse_yaml("server:\n  host: localhost\n  ports: [80, 443]\n").unwrap();
//! let text = emit(&root, &Config::default());
//! assert_eq!(text, "server:\n  host: \"localhost\"\n  ports:\n    - 80\n    - 443\n");
//! ```

use crate::config::{Config, FlowStyle, ScalarStyle};
use crate::document::element::{Element, Number, Object, Primitive};

/// Writes a single YAML document.
pub fn emit(element: &Element, config: &Config) -> String {
    if let Element::Object(entries) = element {
        return emit_object(entries, config);
    }
    let emitter = Emitter::new(config);
    let mut out = String::new();

    if config.canonical {
        out.push_str("---\n");
        out.push_str(&emitter.canonical(element, 0));
        out.push('\n');
    } else if config.flow_style == FlowStyle::Flow || !is_nonempty_collection(element) {
        out.push_str(&emitter.flow(element, 0, 0));
        out.push('\n');
    } else {
        emitter.block(element, 0, &mut out);
    }

    emitter.finish(out)
}

/// Writes an object root as a single YAML document. See [`emit`].
pub fn emit_object(entries: &Object, config: &Config) -> String {
    let emitter = Emitter::new(config);
    let mut out = String::new();

    if config.canonical {
        out.push_str("---\n");
        out.push_str(&emitter.canonical_mapping(entries, 0));
        out.push('\n');
    } else if config.flow_style == FlowStyle::Flow || entries.is_empty() {
        out.push_str(&emitter.flow_mapping(entries, 0, 0));
        out.push('\n');
    } else {
        emitter.block_mapping(entries, 0, &mut out);
    }

    emitter.finish(out)
}

/// Writes several documents separated by `---` markers.
pub fn emit_all(elements: &[Element], config: &Config) -> String {
    let mut out = String::new();
    for element in elements {
        let doc = emit(element, config);
        if !doc.starts_with("---") {
            out.push_str("---");
            out.push_str(config.line_break.as_str());
        }
        out.push_str(&doc);
    }
    out
}

fn is_nonempty_collection(element: &Element) -> bool {
    match element {
        Element::Array(items) => !items.is_empty(),
        Element::Object(entries) => !entries.is_empty(),
        _ => false,
    }
}

fn is_leaf_collection(element: &Element) -> bool {
    match element {
        Element::Array(items) => items.iter().all(|e| !is_nonempty_collection(e)),
        Element::Object(entries) => entries.iter().all(|(_, e)| !is_nonempty_collection(e)),
        _ => true,
    }
}

struct Emitter<'c> {
    config: &'c Config,
    indent: usize,
}

impl<'c> Emitter<'c> {
    fn new(config: &'c Config) -> Self {
        Self {
            config,
            indent: config.indent.clamp(2, 9),
        }
    }

    fn pad(&self, level: usize) -> String {
        " ".repeat(self.indent * level)
    }

    /// Applies the configured line break.
    fn finish(&self, out: String) -> String {
        match self.config.line_break.as_str() {
            "\n" => out,
            other => out.replace('\n', other),
        }
    }

    /// Whether a nested value is written on the same line as its key or dash.
    fn is_inline(&self, value: &Element) -> bool {
        if !is_nonempty_collection(value) {
            return !self.is_block_string(value);
        }
        self.config.flow_style == FlowStyle::Auto && is_leaf_collection(value)
    }

    fn is_block_string(&self, value: &Element) -> bool {
        let text = match value.as_str() {
            Some(text) => text,
            None => return false,
        };
        match self.config.scalar_style {
            ScalarStyle::Literal => block_scalar_ok(text),
            // Trailing blank lines do not survive folding.
            ScalarStyle::Folded => block_scalar_ok(text) && !text.ends_with("\n\n"),
            _ => false,
        }
    }

    // ===== Block layout =====

    fn block(&self, element: &Element, level: usize, out: &mut String) {
        match element {
            Element::Object(entries) => self.block_mapping(entries, level, out),
            Element::Array(items) => {
                for item in items {
                    self.block_item(item, level, out);
                }
            }
            other => {
                out.push_str(&self.pad(level));
                out.push_str(&self.flow(other, level, 0));
                out.push('\n');
            }
        }
    }

    fn block_mapping(&self, entries: &Object, level: usize, out: &mut String) {
        let pad = self.pad(level);
        for (key, value) in entries {
            let key_text = self.key(key);
            let explicit = key.chars().count() > self.config.max_key_length;

            if explicit {
                out.push_str(&format!("{}? {}\n{}:", pad, key_text, pad));
            } else {
                out.push_str(&format!("{}{}:", pad, key_text));
            }

            if self.is_block_string(value) {
                self.block_string(value.as_str().unwrap_or_default(), level + 1, out);
            } else if self.is_inline(value) {
                let column = pad.len() + key_text.len() + 2;
                out.push(' ');
                out.push_str(&self.flow(value, level + 1, column));
                out.push('\n');
            } else {
                out.push('\n');
                self.block(value, level + 1, out);
            }
        }
    }

    fn block_item(&self, item: &Element, level: usize, out: &mut String) {
        let pad = self.pad(level);
        if self.is_block_string(item) {
            out.push_str(&format!("{}-", pad));
            self.block_string(item.as_str().unwrap_or_default(), level + 1, out);
        } else if self.is_inline(item) {
            let column = pad.len() + 2;
            out.push_str(&format!("{}- {}\n", pad, self.flow(item, level + 1, column)));
        } else {
            // The nested block starts on the dash line.
            let mut nested = String::new();
            self.block(item, level + 1, &mut nested);
            let dash = format!("{}- {}", pad, " ".repeat(self.indent - 2));
            out.push_str(&dash);
            out.push_str(&nested[dash.len()..]);
        }
    }

    fn block_string(&self, text: &str, level: usize, out: &mut String) {
        let body = text.strip_suffix('\n').unwrap_or(text);
        let chomp = if !text.ends_with('\n') {
            "-"
        } else if body.ends_with('\n') || body.is_empty() {
            "+"
        } else {
            ""
        };
        let pad = self.pad(level);
        let folded = self.config.scalar_style == ScalarStyle::Folded;
        out.push_str(&format!(" {}{}\n", if folded { ">" } else { "|" }, chomp));

        let mut previous: Option<&str> = None;
        for line in body.split('\n') {
            if let Some(prev) = previous {
                out.push('\n');
                // Folding turns a single break between text lines into a space.
                if folded && !prev.is_empty() {
                    out.push('\n');
                }
            }
            if !line.is_empty() {
                out.push_str(&pad);
                out.push_str(line);
            }
            previous = Some(line);
        }
        out.push('\n');
    }

    // ===== Flow layout =====

    /// Renders an element in flow style. `column` is where the text starts,
    /// used to decide when to wrap.
    fn flow(&self, element: &Element, level: usize, column: usize) -> String {
        match element {
            Element::Null => "null".to_string(),
            Element::Primitive(p) => self.scalar(p),
            Element::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| self.flow(item, level + 1, 0))
                    .collect();
                self.flow_collection('[', ']', parts, level, column)
            }
            Element::Object(entries) => self.flow_mapping(entries, level, column),
        }
    }

    fn flow_mapping(&self, entries: &Object, level: usize, column: usize) -> String {
        let parts: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{}: {}", self.key(key), self.flow(value, level + 1, 0)))
            .collect();
        self.flow_collection('{', '}', parts, level, column)
    }

    fn flow_collection(
        &self,
        open: char,
        close: char,
        parts: Vec<String>,
        level: usize,
        column: usize,
    ) -> String {
        if parts.is_empty() {
            return format!("{}{}", open, close);
        }
        let single = format!("{}{}{}", open, parts.join(", "), close);
        let too_wide = self.config.split_lines
            && (column + single.len() > self.config.width || single.contains('\n'));
        if !self.config.pretty_flow && !too_wide {
            return single;
        }

        let inner = self.pad(level + 1);
        let mut out = String::new();
        out.push(open);
        out.push('\n');
        for (i, part) in parts.iter().enumerate() {
            out.push_str(&inner);
            out.push_str(part);
            if i + 1 < parts.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&self.pad(level));
        out.push(close);
        out
    }

    // ===== Canonical layout =====

    fn canonical(&self, element: &Element, level: usize) -> String {
        let inner = self.pad(level + 1);
        match element {
            Element::Null => "!!null \"null\"".to_string(),
            Element::Primitive(p) => {
                let tag = match p {
                    Primitive::Bool(_) => "bool",
                    Primitive::Number(Number::Integer(_)) => "int",
                    Primitive::Number(Number::Float(_)) => "float",
                    Primitive::Char(_) | Primitive::String(_) => "str",
                };
                format!("!!{} {}", tag, self.double_quoted(&p.to_string()))
            }
            Element::Array(items) => {
                let mut out = String::from("!!seq [\n");
                for item in items {
                    out.push_str(&format!("{}{},\n", inner, self.canonical(item, level + 1)));
                }
                out.push_str(&self.pad(level));
                out.push(']');
                out
            }
            Element::Object(entries) => self.canonical_mapping(entries, level),
        }
    }

    fn canonical_mapping(&self, entries: &Object, level: usize) -> String {
        let inner = self.pad(level + 1);
        let mut out = String::from("!!map {\n");
        for (key, value) in entries {
            out.push_str(&format!(
                "{}? !!str {}\n{}: {},\n",
                inner,
                self.double_quoted(key),
                inner,
                self.canonical(value, level + 1)
            ));
        }
        out.push_str(&self.pad(level));
        out.push('}');
        out
    }

    // ===== Scalars =====

    fn scalar(&self, primitive: &Primitive) -> String {
        match primitive {
            Primitive::Bool(b) => b.to_string(),
            Primitive::Number(n) => n.to_string(),
            Primitive::Char(c) => self.string(&c.to_string()),
            Primitive::String(s) => self.string(s),
        }
    }

    fn string(&self, s: &str) -> String {
        if self.needs_escapes(s) {
            return self.double_quoted(s);
        }
        match self.config.scalar_style {
            ScalarStyle::Plain if is_plain_safe(s) => s.to_string(),
            ScalarStyle::SingleQuoted => single_quoted(s),
            ScalarStyle::Plain | ScalarStyle::DoubleQuoted => self.double_quoted(s),
            // Strings that cannot use a block scalar.
            ScalarStyle::Literal | ScalarStyle::Folded => self.double_quoted(s),
        }
    }

    fn key(&self, key: &str) -> String {
        if !self.needs_escapes(key) && is_plain_safe(key) {
            key.to_string()
        } else {
            self.double_quoted(key)
        }
    }

    fn needs_escapes(&self, s: &str) -> bool {
        s.chars().any(|c| {
            is_non_printable(c) || c == '\n' || (!self.config.allow_unicode && !c.is_ascii())
        })
    }

    fn double_quoted(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('"');
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\0' => out.push_str("\\0"),
                '\u{85}' => out.push_str("\\N"),
                '\u{2028}' => out.push_str("\\L"),
                '\u{2029}' => out.push_str("\\P"),
                c if is_non_printable(c) && (c as u32) < 0x100 => {
                    out.push_str(&format!("\\x{:02X}", c as u32));
                }
                c if is_non_printable(c) || (!self.config.allow_unicode && !c.is_ascii()) => {
                    if (c as u32) <= 0xFFFF {
                        out.push_str(&format!("\\u{:04X}", c as u32));
                    } else {
                        out.push_str(&format!("\\U{:08X}", c as u32));
                    }
                }
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

fn is_non_printable(c: char) -> bool {
    (c.is_control() && c != '\n' && c != '\t') || c == '\u{FEFF}' || c == '\u{2028}' || c == '\u{2029}'
}

fn single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Whether a string can be written as a literal or folded block.
fn block_scalar_ok(s: &str) -> bool {
    s.contains('\n')
        && !s.starts_with([' ', '\t', '\n'])
        && !s.chars().any(|c| is_non_printable(c) || c == '\r')
        && s.split('\n').all(|line| !line.starts_with([' ', '\t']))
}

/// YAML 1.1 words that plain scalars would turn into booleans or null.
const RESERVED_WORDS: &[&str] = &[
    "y", "n", "yes", "no", "on", "off", "true", "false", "null", "~",
];

/// Whether `s` reads back as the same string when written unquoted.
fn is_plain_safe(s: &str) -> bool {
    if s.is_empty() || s != s.trim() {
        return false;
    }
    let lower = s.to_ascii_lowercase();
    if RESERVED_WORDS.iter().any(|w| *w == lower) {
        return false;
    }
    if s.starts_with([
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
        '`',
    ]) {
        return false;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') || s.contains(['\n', '\r', '\t']) {
        return false;
    }
    // Flow indicators end a plain scalar inside flow collections.
    if s.contains([',', '[', ']', '{', '}']) {
        return false;
    }
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(s),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == s
    )
}
