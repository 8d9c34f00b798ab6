//! name
//!
//! The shared name contract.
//!
//! # Design
//!
//! [`Name`] is a capability trait implemented by two independent value types,
//! [`ComponentListName`](crate::ComponentListName) and
//! [`DelimitedStringName`](crate::DelimitedStringName). The behavior both
//! representations must externalize identically — display projection, equality,
//! hashing, emptiness — lives here as provided methods over the required
//! accessors, so the two stay observably equivalent and substitutable.
//!
//! # Contract discipline
//!
//! Constructors validate their preconditions and establish the representation
//! invariant; because both representations are immutable values, the invariant
//! then holds for the lifetime of the value. Mutators validate preconditions,
//! build a new value (which re-establishes the invariant), and verify their
//! operation-specific postconditions before returning it. Failures are reported
//! through [`NameError`], tagged with the violated contract layer.

use crate::codec;
use crate::error::NameError;

/// Default component delimiter.
pub const DEFAULT_DELIMITER: char = '.';

/// An ordered, delimiter-joined sequence of text components forming a
/// hierarchical identifier.
///
/// Components are stored in escaped form: within a component, every literal
/// escape character is doubled and every literal delimiter is prefixed with the
/// escape character (see [`codec`]). The *data string* is the canonical
/// machine-readable encoding — escaped components joined by the delimiter.
///
/// Implementations are immutable values: every mutator returns a new name and
/// leaves the receiver untouched.
///
/// # Example
///
/// ```
/// use hiername::{ComponentListName, Name};
///
/// let name = ComponentListName::new(&["oss", "cs", "fau", "de"], '.').unwrap();
/// let shorter = name.remove(1).unwrap();
///
/// assert_eq!(name.as_data_string(), "oss.cs.fau.de");
/// assert_eq!(shorter.as_data_string(), "oss.fau.de");
/// ```
pub trait Name: Clone + std::fmt::Debug {
    /// The delimiter this name was constructed with.
    fn delimiter(&self) -> char;

    /// Number of components.
    fn component_count(&self) -> usize;

    /// The escaped component at `index`.
    ///
    /// # Errors
    ///
    /// Precondition violation if `index >= component_count()`.
    fn component(&self, index: usize) -> Result<String, NameError>;

    /// The canonical machine-readable form: escaped components joined by the
    /// delimiter. Equality and hashing are defined over this string.
    fn as_data_string(&self) -> String;

    /// A new name with the component at `index` replaced by `component`.
    ///
    /// # Errors
    ///
    /// Precondition violation if `index` is out of bounds or `component` is not
    /// in canonical escaped form for this name's delimiter.
    fn set_component(&self, index: usize, component: &str) -> Result<Self, NameError>;

    /// A new name with `component` inserted at `index` (`index ==
    /// component_count()` appends).
    ///
    /// # Errors
    ///
    /// Precondition violation if `index > component_count()` or `component` is
    /// not in canonical escaped form.
    fn insert(&self, index: usize, component: &str) -> Result<Self, NameError>;

    /// A new name with `component` appended.
    ///
    /// # Errors
    ///
    /// Precondition violation if `component` is not in canonical escaped form.
    fn append(&self, component: &str) -> Result<Self, NameError>;

    /// A new name with the component at `index` removed.
    ///
    /// # Errors
    ///
    /// Precondition violation if `index` is out of bounds, or if the name has a
    /// single component (a name always holds at least one).
    fn remove(&self, index: usize) -> Result<Self, NameError>;

    /// A new name holding this name's components followed by `other`'s.
    ///
    /// # Errors
    ///
    /// Precondition violation if `other` uses a different delimiter: its
    /// components are escaped for that delimiter and would be misinterpreted
    /// under this one.
    fn concat<N: Name>(&self, other: &N) -> Result<Self, NameError>;

    /// Human-readable projection: every component unescaped, joined with the
    /// caller-supplied delimiter (which may differ from the stored one).
    ///
    /// Pure projection — no re-escaping is performed, so the result is
    /// ambiguous if a component's raw text contains `delimiter`.
    fn as_string(&self, delimiter: char) -> String {
        let own = self.delimiter();
        let parts = codec::split_components(&self.as_data_string(), own);
        let unescaped: Vec<String> = parts.iter().map(|p| codec::unescape(p, own)).collect();
        codec::join_components(&unescaped, delimiter)
    }

    /// Structural equality: same delimiter and same data string. Holds across
    /// representations; mismatched delimiters yield `false`, never an error.
    fn is_equal<N: Name>(&self, other: &N) -> bool {
        self.delimiter() == other.delimiter() && self.as_data_string() == other.as_data_string()
    }

    /// Deterministic polynomial rolling hash over the data string's UTF-16 code
    /// units: base 31, 32-bit signed wraparound, seed 0. Equal names produce
    /// equal hash codes.
    fn hash_code(&self) -> i32 {
        let mut hash: i32 = 0;
        for unit in self.as_data_string().encode_utf16() {
            hash = hash
                .wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit));
        }
        hash
    }

    /// Whether the name has no components. Under the at-least-one-component
    /// invariant this is `false` for every constructed name; it remains part of
    /// the contract with its literal definition.
    fn is_empty(&self) -> bool {
        self.component_count() == 0
    }
}

/// Shared delimiter precondition: the delimiter must not be the escape
/// character. (Single-character width is enforced by `char`.)
pub(crate) fn validate_delimiter(delimiter: char) -> Result<(), NameError> {
    if delimiter == codec::ESCAPE_CHARACTER {
        return Err(NameError::precondition(
            "delimiter must not be the escape character",
        ));
    }
    Ok(())
}

/// Shared precondition for component-accepting mutators: the incoming
/// component must already be in canonical escaped form, preventing accidental
/// double-escaping.
pub(crate) fn require_canonical(component: &str, delimiter: char) -> Result<(), NameError> {
    if !codec::is_canonical(component, delimiter) {
        return Err(NameError::precondition(format!(
            "component {component:?} is not in canonical escaped form for delimiter {delimiter:?}"
        )));
    }
    Ok(())
}

/// Shared index precondition for accessors and in-place mutators: `index <
/// count`.
pub(crate) fn check_index(index: usize, count: usize) -> Result<(), NameError> {
    if index >= count {
        return Err(NameError::precondition(format!(
            "index {index} out of bounds for {count} components"
        )));
    }
    Ok(())
}

/// Shared index precondition for `insert`: `index <= count` (inserting at the
/// end is an append).
pub(crate) fn check_insert_index(index: usize, count: usize) -> Result<(), NameError> {
    if index > count {
        return Err(NameError::precondition(format!(
            "insert index {index} out of bounds for {count} components"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentListName;

    #[test]
    fn hash_matches_signed_32_bit_accumulation() {
        // hash("a") = 'a' = 97; hash("ab") = 97 * 31 + 98 = 3105.
        let a = ComponentListName::new(&["a"], '.').unwrap();
        assert_eq!(a.hash_code(), 97);

        let ab = ComponentListName::new(&["ab"], '.').unwrap();
        assert_eq!(ab.hash_code(), 3105);
    }

    #[test]
    fn hash_wraps_on_long_input() {
        // A long data string overflows i32; the accumulation must wrap, not
        // saturate or panic.
        let long = "x".repeat(64);
        let name = ComponentListName::new(&[long.as_str()], '.').unwrap();
        let other = name.clone();
        assert_eq!(name.hash_code(), other.hash_code());
    }

    #[test]
    fn delimiter_validation() {
        assert!(validate_delimiter('.').is_ok());
        assert!(validate_delimiter('#').is_ok());
        assert!(validate_delimiter('\\').is_err());
    }

    #[test]
    fn index_preconditions() {
        assert!(check_index(0, 1).is_ok());
        assert!(check_index(1, 1).is_err());
        assert!(check_insert_index(1, 1).is_ok());
        assert!(check_insert_index(2, 1).is_err());
    }
}
