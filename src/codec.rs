//! codec
//!
//! Escape codec for name components.
//!
//! # Encoding
//!
//! Within a component, every literal escape character becomes two escape
//! characters, and every literal delimiter becomes escape character + delimiter.
//! The escape character is doubled *before* delimiters are escaped; otherwise a
//! delimiter escape sequence could be mistaken for a doubled escape character
//! during decoding.
//!
//! # Example
//!
//! ```
//! use hiername::codec::{escape, unescape};
//!
//! assert_eq!(escape("a.b", '.'), "a\\.b");
//! assert_eq!(unescape("a\\.b", '.'), "a.b");
//! ```

/// The character marking a literal delimiter (or itself) inside a component.
pub const ESCAPE_CHARACTER: char = '\\';

/// Escape a raw component so it can safely contain `delimiter`.
///
/// Doubles every escape character, then prefixes every literal delimiter with
/// the escape character. The single pass below applies both rules at once; a
/// character that is neither passes through unchanged.
///
/// Not idempotent: re-escaping already-escaped text produces a different string.
/// Callers must track which form a string is in.
pub fn escape(raw: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == ESCAPE_CHARACTER || ch == delimiter {
            out.push(ESCAPE_CHARACTER);
        }
        out.push(ch);
    }
    out
}

/// Invert [`escape`]: collapse escape + delimiter to the delimiter, then
/// escape + escape to a single escape character.
///
/// A dangling escape character (not followed by the delimiter or another
/// escape character) is kept literally; such input is never produced by
/// [`escape`].
pub fn unescape(escaped: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHARACTER {
            match chars.peek() {
                Some(&next) if next == delimiter || next == ESCAPE_CHARACTER => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Whether `component` is a fixed point of escape-after-unescape for
/// `delimiter` — the canonical escaped form required of components handed to
/// mutating name operations.
pub fn is_canonical(component: &str, delimiter: char) -> bool {
    escape(&unescape(component, delimiter), delimiter) == component
}

/// Split an escaped data string into its escaped components.
///
/// A delimiter immediately preceded by an unconsumed escape character is
/// content, not a boundary. This is a single-pass scan that consumes escape
/// pairs as units, so no placeholder token is needed and arbitrary input is
/// handled soundly.
///
/// The empty string yields one empty component; every data string of a name
/// with `n` components contains exactly `n - 1` boundary delimiters.
pub fn split_components(data: &str, delimiter: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = data.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHARACTER {
            current.push(ch);
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if ch == delimiter {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    parts.push(current);
    parts
}

/// Join escaped components into a data string. Inverse of
/// [`split_components`] for canonical components.
pub fn join_components<S: AsRef<str>>(parts: &[S], delimiter: char) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(part.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_doubles_escape_character() {
        assert_eq!(escape("a\\b", '.'), "a\\\\b");
    }

    #[test]
    fn escape_prefixes_delimiter() {
        assert_eq!(escape("a.b", '.'), "a\\.b");
        assert_eq!(escape("a.b", '#'), "a.b");
    }

    #[test]
    fn escape_keeps_pairs_distinguishable() {
        // Raw "\." must encode so the escape pair and the delimiter escape
        // stay distinguishable on decode.
        let encoded = escape("\\.", '.');
        assert_eq!(encoded, "\\\\\\.");
        assert_eq!(unescape(&encoded, '.'), "\\.");
    }

    #[test]
    fn unescape_round_trips() {
        for raw in ["", "plain", "a.b", "a\\b", "\\.", "..", "\\\\", "a.b\\c.d"] {
            let escaped = escape(raw, '.');
            assert_eq!(unescape(&escaped, '.'), raw, "raw = {raw:?}");
        }
    }

    #[test]
    fn unescape_keeps_dangling_escape() {
        assert_eq!(unescape("a\\", '.'), "a\\");
        assert_eq!(unescape("a\\x", '.'), "a\\x");
    }

    #[test]
    fn canonical_form_detection() {
        assert!(is_canonical("abc", '.'));
        assert!(is_canonical("a\\.b", '.'));
        assert!(is_canonical("a\\\\b", '.'));
        // Raw delimiter inside the component: not canonical.
        assert!(!is_canonical("a.b", '.'));
        // Dangling escape: not canonical.
        assert!(!is_canonical("a\\", '.'));
    }

    #[test]
    fn split_respects_escaped_delimiters() {
        assert_eq!(split_components("a.b.c", '.'), vec!["a", "b", "c"]);
        assert_eq!(split_components("a\\.b.c", '.'), vec!["a\\.b", "c"]);
        assert_eq!(split_components("a\\\\.b", '.'), vec!["a\\\\", "b"]);
    }

    #[test]
    fn split_of_empty_string_is_one_empty_component() {
        assert_eq!(split_components("", '.'), vec![""]);
        assert_eq!(split_components(".", '.'), vec!["", ""]);
    }

    #[test]
    fn split_handles_escape_heavy_content() {
        // Every delimiter here is escaped, so the whole string is one component.
        let data = "x\\.y\\.z";
        assert_eq!(split_components(data, '.'), vec![data]);
    }

    #[test]
    fn join_inverts_split_for_canonical_parts() {
        let data = "oss.cs\\.net.fau.de";
        let parts = split_components(data, '.');
        assert_eq!(join_components(&parts, '.'), data);
    }
}
