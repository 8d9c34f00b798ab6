//! string_name
//!
//! Name representation backed by a single escaped string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::NameError;
use crate::name::{
    check_index, check_insert_index, require_canonical, validate_delimiter, Name,
    DEFAULT_DELIMITER,
};

/// A [`Name`] stored as one escaped data string plus a cached component count.
///
/// The components are recovered by parsing on demand; only the count is cached,
/// and the invariant requires the cache to agree with the parsed length. All
/// mutators parse, apply the list-level change, rejoin, and construct a new
/// value from the result.
///
/// # Example
///
/// ```
/// use hiername::{DelimitedStringName, Name};
///
/// let name = DelimitedStringName::new("oss.cs.fau.de", '.').unwrap();
/// assert_eq!(name.component_count(), 4);
/// assert_eq!(name.remove(1).unwrap().as_data_string(), "oss.fau.de");
///
/// // An escaped delimiter is content, not a boundary.
/// let single = DelimitedStringName::new("a\\.b", '.').unwrap();
/// assert_eq!(single.component_count(), 1);
/// assert_eq!(single.as_string('.'), "a.b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StringNameRepr", into = "StringNameRepr")]
pub struct DelimitedStringName {
    /// The escaped data string, returned verbatim by `as_data_string`.
    name: String,
    /// Cached count; must always equal the parsed component count.
    component_count: usize,
    delimiter: char,
}

impl DelimitedStringName {
    /// Create a name from an already-escaped data string.
    ///
    /// The empty string is a name with one empty component.
    ///
    /// # Errors
    ///
    /// Precondition violation if `delimiter` is the escape character, or if
    /// `data` holds a component that is not in canonical escaped form (for
    /// example a dangling escape character).
    pub fn new(data: &str, delimiter: char) -> Result<Self, NameError> {
        validate_delimiter(delimiter)?;
        let parts = codec::split_components(data, delimiter);
        for part in &parts {
            require_canonical(part, delimiter)?;
        }
        let name = Self {
            name: data.to_string(),
            component_count: parts.len(),
            delimiter,
        };
        name.check_invariant()?;
        Ok(name)
    }

    /// Create a name from a data string with the default delimiter (`'.'`).
    pub fn with_default_delimiter(data: &str) -> Result<Self, NameError> {
        Self::new(data, DEFAULT_DELIMITER)
    }

    /// Parse the data string into escaped components.
    fn components(&self) -> Vec<String> {
        codec::split_components(&self.name, self.delimiter)
    }

    /// Rejoin edited components into a new value; reconstruction re-parses and
    /// recomputes the cached count.
    fn rebuild(&self, components: &[String]) -> Result<Self, NameError> {
        Self::new(&codec::join_components(components, self.delimiter), self.delimiter)
    }

    /// Representation invariant: valid delimiter, cached count equal to the
    /// parsed count, at least one component, every parsed component in
    /// canonical escaped form.
    fn check_invariant(&self) -> Result<(), NameError> {
        if self.delimiter == codec::ESCAPE_CHARACTER {
            return Err(NameError::invariant(
                "delimiter is the escape character",
            ));
        }
        let parsed = self.components();
        if parsed.len() != self.component_count {
            return Err(NameError::invariant(format!(
                "cached count {} disagrees with parsed count {}",
                self.component_count,
                parsed.len()
            )));
        }
        if self.component_count == 0 {
            return Err(NameError::invariant("name has no components"));
        }
        for component in &parsed {
            if !codec::is_canonical(component, self.delimiter) {
                return Err(NameError::invariant(format!(
                    "stored component {component:?} is not in canonical escaped form"
                )));
            }
        }
        Ok(())
    }
}

impl Name for DelimitedStringName {
    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn component_count(&self) -> usize {
        self.component_count
    }

    fn component(&self, index: usize) -> Result<String, NameError> {
        check_index(index, self.component_count)?;
        let mut components = self.components();
        Ok(components.swap_remove(index))
    }

    fn as_data_string(&self) -> String {
        self.name.clone()
    }

    fn set_component(&self, index: usize, component: &str) -> Result<Self, NameError> {
        check_index(index, self.component_count)?;
        require_canonical(component, self.delimiter)?;

        let mut components = self.components();
        components[index] = component.to_string();
        let result = self.rebuild(&components)?;

        if result.component(index)? != component {
            return Err(NameError::postcondition(
                "set_component result does not hold the written component",
            ));
        }
        if result.component_count() != self.component_count() {
            return Err(NameError::postcondition(
                "set_component changed the component count",
            ));
        }
        Ok(result)
    }

    fn insert(&self, index: usize, component: &str) -> Result<Self, NameError> {
        check_insert_index(index, self.component_count)?;
        require_canonical(component, self.delimiter)?;

        let mut components = self.components();
        components.insert(index, component.to_string());
        let result = self.rebuild(&components)?;

        if result.component_count() != self.component_count() + 1 {
            return Err(NameError::postcondition(
                "insert did not grow the component count by one",
            ));
        }
        if result.component(index)? != component {
            return Err(NameError::postcondition(
                "insert result does not hold the new component at the given index",
            ));
        }
        Ok(result)
    }

    fn append(&self, component: &str) -> Result<Self, NameError> {
        require_canonical(component, self.delimiter)?;

        let mut components = self.components();
        components.push(component.to_string());
        let result = self.rebuild(&components)?;

        if result.component_count() != self.component_count() + 1 {
            return Err(NameError::postcondition(
                "append did not grow the component count by one",
            ));
        }
        if result.component(result.component_count() - 1)? != component {
            return Err(NameError::postcondition(
                "append result does not end with the new component",
            ));
        }
        Ok(result)
    }

    fn remove(&self, index: usize) -> Result<Self, NameError> {
        check_index(index, self.component_count)?;
        if self.component_count == 1 {
            return Err(NameError::precondition(
                "removing the only component would leave the name empty",
            ));
        }

        let mut components = self.components();
        components.remove(index);
        let result = self.rebuild(&components)?;

        if result.component_count() != self.component_count() - 1 {
            return Err(NameError::postcondition(
                "remove did not shrink the component count by one",
            ));
        }
        Ok(result)
    }

    fn concat<N: Name>(&self, other: &N) -> Result<Self, NameError> {
        if other.delimiter() != self.delimiter {
            return Err(NameError::precondition(format!(
                "cannot concat a name with delimiter {:?} onto one with delimiter {:?}",
                other.delimiter(),
                self.delimiter
            )));
        }

        let mut components = self.components();
        for i in 0..other.component_count() {
            let component = other.component(i)?;
            require_canonical(&component, self.delimiter)?;
            components.push(component);
        }
        let result = self.rebuild(&components)?;

        if result.component_count() != self.component_count() + other.component_count() {
            return Err(NameError::postcondition(
                "concat result count is not the sum of both counts",
            ));
        }
        Ok(result)
    }
}

/// Data string form, matching the original's `toString`.
impl fmt::Display for DelimitedStringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Serialized shape. The count is not serialized; deserialization recomputes
/// it by parsing, so a corrupted cache cannot be smuggled in.
#[derive(Serialize, Deserialize)]
struct StringNameRepr {
    delimiter: char,
    name: String,
}

impl TryFrom<StringNameRepr> for DelimitedStringName {
    type Error = NameError;

    fn try_from(repr: StringNameRepr) -> Result<Self, NameError> {
        Self::new(&repr.name, repr.delimiter)
    }
}

impl From<DelimitedStringName> for StringNameRepr {
    fn from(name: DelimitedStringName) -> Self {
        Self {
            delimiter: name.delimiter,
            name: name.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    #[test]
    fn data_string_is_returned_verbatim() {
        let name = DelimitedStringName::new("oss.cs.fau.de", '.').unwrap();
        assert_eq!(name.as_data_string(), "oss.cs.fau.de");
        assert_eq!(name.component_count(), 4);
    }

    #[test]
    fn empty_data_string_is_one_empty_component() {
        let name = DelimitedStringName::new("", '.').unwrap();
        assert_eq!(name.component_count(), 1);
        assert_eq!(name.component(0).unwrap(), "");
        assert!(!name.is_empty());
    }

    #[test]
    fn constructor_rejects_malformed_data_strings() {
        // A dangling escape is not the encoding of any raw component.
        let err = DelimitedStringName::new("x\\", '.').unwrap_err();
        assert_eq!(err.kind(), Violation::Precondition);

        // Same for an escape preceding an ordinary character: "a\xb" is not
        // the encoding of any raw component either.
        let err = DelimitedStringName::new("a\\xb.c", '.').unwrap_err();
        assert_eq!(err.kind(), Violation::Precondition);

        // Well-formed escapes are still accepted.
        assert!(DelimitedStringName::new("a\\.b.c\\\\d", '.').is_ok());
    }

    #[test]
    fn escaped_delimiter_is_not_a_boundary() {
        let name = DelimitedStringName::new("a\\.b", '.').unwrap();
        assert_eq!(name.component_count(), 1);
        assert_eq!(name.as_string('.'), "a.b");
    }

    #[test]
    fn append_returns_new_value() {
        let original = DelimitedStringName::new("oss.cs.fau", '.').unwrap();
        let modified = original.append("de").unwrap();

        assert_eq!(original.as_data_string(), "oss.cs.fau");
        assert_eq!(modified.as_data_string(), "oss.cs.fau.de");
    }

    #[test]
    fn remove_returns_new_value() {
        let original = DelimitedStringName::new("oss.cs.fau.de", '.').unwrap();
        let modified = original.remove(0).unwrap();

        assert_eq!(original.as_data_string(), "oss.cs.fau.de");
        assert_eq!(modified.as_data_string(), "cs.fau.de");
    }

    #[test]
    fn component_access_is_bounds_checked() {
        let name = DelimitedStringName::new("oss.cs.fau.de", '.').unwrap();
        let err = name.component(4).unwrap_err();
        assert_eq!(err.kind(), Violation::Precondition);
    }

    #[test]
    fn insert_bounds() {
        let name = DelimitedStringName::new("oss.cs.fau.de", '.').unwrap();
        assert!(name.insert(4, "org").is_ok());
        let err = name.insert(5, "org").unwrap_err();
        assert_eq!(err.kind(), Violation::Precondition);
    }

    #[test]
    fn mutators_reject_non_canonical_components() {
        let name = DelimitedStringName::new("a.b", '.').unwrap();
        let err = name.append("x.y").unwrap_err();
        assert_eq!(err.kind(), Violation::Precondition);
    }

    #[test]
    fn remove_keeps_at_least_one_component() {
        let name = DelimitedStringName::new("only", '.').unwrap();
        let err = name.remove(0).unwrap_err();
        assert_eq!(err.kind(), Violation::Precondition);
    }

    #[test]
    fn serde_round_trip() {
        let name = DelimitedStringName::new("a\\.b.c", '.').unwrap();
        let json = serde_json::to_string(&name).unwrap();
        let parsed: DelimitedStringName = serde_json::from_str(&json).unwrap();
        assert!(name.is_equal(&parsed));
        assert_eq!(parsed.component_count(), 2);
    }

    #[test]
    fn serde_rejects_escape_character_delimiter() {
        let err =
            serde_json::from_str::<DelimitedStringName>(r#"{"delimiter":"\\","name":"a"}"#);
        assert!(err.is_err());
    }
}
