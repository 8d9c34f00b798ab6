//! list_name
//!
//! Name representation backed by an ordered list of escaped components.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::NameError;
use crate::name::{
    check_index, check_insert_index, require_canonical, validate_delimiter, Name,
    DEFAULT_DELIMITER,
};

/// A [`Name`] stored as an ordered list of already-escaped components plus the
/// delimiter.
///
/// The constructor takes *raw* components and escapes each one; mutators take
/// components already in canonical escaped form, exactly as the [`Name`]
/// contract requires.
///
/// # Example
///
/// ```
/// use hiername::{ComponentListName, Name};
///
/// let name = ComponentListName::new(&["a.b", "c"], '.').unwrap();
/// assert_eq!(name.component_count(), 2);
/// assert_eq!(name.as_data_string(), "a\\.b.c");
/// assert_eq!(name.as_string('.'), "a.b.c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ListNameRepr", into = "ListNameRepr")]
pub struct ComponentListName {
    /// Escaped components, at least one.
    components: Vec<String>,
    delimiter: char,
}

impl ComponentListName {
    /// Create a name from raw (unescaped) components.
    ///
    /// # Errors
    ///
    /// Precondition violation if `components` is empty or `delimiter` is the
    /// escape character.
    pub fn new<S: AsRef<str>>(components: &[S], delimiter: char) -> Result<Self, NameError> {
        validate_delimiter(delimiter)?;
        if components.is_empty() {
            return Err(NameError::precondition(
                "a name must have at least one component",
            ));
        }
        let escaped = components
            .iter()
            .map(|c| codec::escape(c.as_ref(), delimiter))
            .collect();
        let name = Self {
            components: escaped,
            delimiter,
        };
        name.check_invariant()?;
        Ok(name)
    }

    /// Create a name from raw components with the default delimiter (`'.'`).
    pub fn with_default_delimiter<S: AsRef<str>>(components: &[S]) -> Result<Self, NameError> {
        Self::new(components, DEFAULT_DELIMITER)
    }

    /// Build directly from escaped components. Used by mutators and
    /// deserialization; callers guarantee the components are canonical.
    fn from_escaped(components: Vec<String>, delimiter: char) -> Result<Self, NameError> {
        let name = Self {
            components,
            delimiter,
        };
        name.check_invariant()?;
        Ok(name)
    }

    /// Representation invariant: valid delimiter, at least one component, every
    /// stored component in canonical escaped form.
    fn check_invariant(&self) -> Result<(), NameError> {
        if self.delimiter == codec::ESCAPE_CHARACTER {
            return Err(NameError::invariant(
                "delimiter is the escape character",
            ));
        }
        if self.components.is_empty() {
            return Err(NameError::invariant("name has no components"));
        }
        for component in &self.components {
            if !codec::is_canonical(component, self.delimiter) {
                return Err(NameError::invariant(format!(
                    "stored component {component:?} is not in canonical escaped form"
                )));
            }
        }
        Ok(())
    }
}

impl Name for ComponentListName {
    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn component_count(&self) -> usize {
        self.components.len()
    }

    fn component(&self, index: usize) -> Result<String, NameError> {
        check_index(index, self.components.len())?;
        Ok(self.components[index].clone())
    }

    fn as_data_string(&self) -> String {
        codec::join_components(&self.components, self.delimiter)
    }

    fn set_component(&self, index: usize, component: &str) -> Result<Self, NameError> {
        check_index(index, self.components.len())?;
        require_canonical(component, self.delimiter)?;

        let mut components = self.components.clone();
        components[index] = component.to_string();
        let result = Self::from_escaped(components, self.delimiter)?;

        if result.components[index] != component {
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
        check_insert_index(index, self.components.len())?;
        require_canonical(component, self.delimiter)?;

        let mut components = self.components.clone();
        components.insert(index, component.to_string());
        let result = Self::from_escaped(components, self.delimiter)?;

        if result.component_count() != self.component_count() + 1 {
            return Err(NameError::postcondition(
                "insert did not grow the component count by one",
            ));
        }
        if result.components[index] != component {
            return Err(NameError::postcondition(
                "insert result does not hold the new component at the given index",
            ));
        }
        Ok(result)
    }

    fn append(&self, component: &str) -> Result<Self, NameError> {
        require_canonical(component, self.delimiter)?;

        let mut components = self.components.clone();
        components.push(component.to_string());
        let result = Self::from_escaped(components, self.delimiter)?;

        if result.component_count() != self.component_count() + 1 {
            return Err(NameError::postcondition(
                "append did not grow the component count by one",
            ));
        }
        if result.components[result.components.len() - 1] != component {
            return Err(NameError::postcondition(
                "append result does not end with the new component",
            ));
        }
        Ok(result)
    }

    fn remove(&self, index: usize) -> Result<Self, NameError> {
        check_index(index, self.components.len())?;
        if self.components.len() == 1 {
            return Err(NameError::precondition(
                "removing the only component would leave the name empty",
            ));
        }

        let mut components = self.components.clone();
        components.remove(index);
        let result = Self::from_escaped(components, self.delimiter)?;

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

        let mut components = self.components.clone();
        for i in 0..other.component_count() {
            let component = other.component(i)?;
            require_canonical(&component, self.delimiter)?;
            components.push(component);
        }
        let result = Self::from_escaped(components, self.delimiter)?;

        if result.component_count() != self.component_count() + other.component_count() {
            return Err(NameError::postcondition(
                "concat result count is not the sum of both counts",
            ));
        }
        Ok(result)
    }
}

/// Data string form, matching the original's `toString`.
impl fmt::Display for ComponentListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_data_string())
    }
}

/// Serialized shape. Deserialization re-validates the invariant, so a name
/// read back from serde is as trustworthy as a constructed one.
#[derive(Serialize, Deserialize)]
struct ListNameRepr {
    delimiter: char,
    /// Components in escaped form, as stored.
    components: Vec<String>,
}

impl TryFrom<ListNameRepr> for ComponentListName {
    type Error = NameError;

    fn try_from(repr: ListNameRepr) -> Result<Self, NameError> {
        validate_delimiter(repr.delimiter)?;
        if repr.components.is_empty() {
            return Err(NameError::precondition(
                "a name must have at least one component",
            ));
        }
        for component in &repr.components {
            require_canonical(component, repr.delimiter)?;
        }
        Self::from_escaped(repr.components, repr.delimiter)
    }
}

impl From<ComponentListName> for ListNameRepr {
    fn from(name: ComponentListName) -> Self {
        Self {
            delimiter: name.delimiter,
            components: name.components,
        }
    }
}
