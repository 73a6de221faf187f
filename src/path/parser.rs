//! Path string parsing.
//!
//! A path is written as keys joined by a separator character, e.g. `a.b.c`.
//! A backslash escapes the separator (`a\.b` is the single key `a.b`) and
//! itself (`\\`). Parsing is total: malformed text yields `None` instead of
//! an error, so lookups through a bad path simply find nothing.

use std::fmt;
use std::ops::Deref;

/// A non-empty ordered sequence of object keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parses `text`, splitting on `separator`.
    ///
    /// Returns `None` for empty text, empty segments and leading or trailing
    /// separators.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlkit::path::Path;
    ///
    /// let path = Path::parse(r"server.tls\.cert", '.').unwrap();
    /// assert_eq!(path.segments(), ["server", "tls.cert"]);
    ///
    /// assert!(Path::parse("a..b", '.').is_none());
    /// assert!(Path::parse(".a", '.').is_none());
    /// ```
    pub fn parse(text: &str, separator: char) -> Option<Path> {
        let mut segments = Vec::new();
        let mut segment = String::new();
        let mut escaped = false;

        for c in text.chars() {
            if escaped {
                escaped = false;
                segment.push(c);
                continue;
            }
            if c == '\\' {
                escaped = true;
            } else if c == separator {
                if segment.is_empty() {
                    return None;
                }
                segments.push(std::mem::take(&mut segment));
            } else {
                segment.push(c);
            }
        }

        // A dangling escape has nothing to escape.
        if escaped || segment.is_empty() {
            return None;
        }
        segments.push(segment);
        Some(Path { segments })
    }

    /// Builds a path from explicit segments. Segments are taken verbatim,
    /// so an empty string is a valid key here.
    ///
    /// Returns `None` when no segments are given.
    pub fn from_segments<I, S>(segments: I) -> Option<Path>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            None
        } else {
            Some(Path { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Renders the path with `separator`, escaping separators and backslashes
    /// inside keys so that [`Path::parse`] reads it back unchanged.
    pub fn to_string_with(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            for c in segment.chars() {
                if c == separator || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
        }
        out
    }
}

impl Deref for Path {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let path = Path::parse("a.b.c", '.').unwrap();
        assert_eq!(path.segments(), ["a", "b", "c"]);
    }

    #[test]
    fn test_parse_single_segment() {
        assert_eq!(Path::parse("foo", '.').unwrap().len(), 1);
    }

    #[test]
    fn test_parse_custom_separator() {
        let path = Path::parse("a/b.c", '/').unwrap();
        assert_eq!(path.segments(), ["a", "b.c"]);
    }

    #[test]
    fn test_parse_escaped_backslash_then_separator() {
        let path = Path::parse(r"a\\.b", '.').unwrap();
        assert_eq!(path.segments(), ["a\\", "b"]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Path::parse("", '.').is_none());
        assert!(Path::parse("a.", '.').is_none());
        assert!(Path::parse(".a", '.').is_none());
        assert!(Path::parse("a..b", '.').is_none());
        assert!(Path::parse(r"a\", '.').is_none());
    }

    #[test]
    fn test_from_segments_allows_empty_keys() {
        let path = Path::from_segments(["", "a"]).unwrap();
        assert_eq!(path.len(), 2);
        assert!(Path::from_segments(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let path = Path::from_segments(["a.b", r"c\d", "e"]).unwrap();
        let text = path.to_string();
        assert_eq!(text, r"a\.b.c\\d.e");
        assert_eq!(Path::parse(&text, '.').unwrap(), path);
    }
}
