//! Hiername - hierarchical compound names with reversible escaping
//!
//! A name is an ordered sequence of string components joined by a configurable
//! single-character delimiter. Components may themselves contain the delimiter
//! or the escape character: the codec doubles every literal escape character
//! and prefixes every literal delimiter with the escape character, and the
//! encoding is losslessly reversible.
//!
//! Two interchangeable representations implement the same [`Name`] contract
//! and are observably equivalent:
//!
//! - [`ComponentListName`] - backed by an ordered list of escaped components
//! - [`DelimitedStringName`] - backed by one escaped string plus a cached
//!   component count, parsed on demand
//!
//! # Architecture
//!
//! - [`codec`] - escape/unescape a component, split/join data strings
//! - [`name`] - the shared [`Name`] contract (equality, hashing, projection)
//! - [`error`] - the typed failure channel, tagged by contract layer
//! - [`list_name`] / [`string_name`] - the two representations
//! - [`fs`] - a small file-system tree consuming names as opaque values
//!
//! # Correctness Invariants
//!
//! 1. `unescape(escape(s, d), d) == s` for every component and valid delimiter
//! 2. Both representations externalize identically: equal delimiter and data
//!    string means equal names, across representations
//! 3. Every value is immutable; mutators return new values
//! 4. A constructed name always holds at least one component
//!
//! # Example
//!
//! ```
//! use hiername::{ComponentListName, DelimitedStringName, Name};
//!
//! let list = ComponentListName::new(&["oss", "cs", "fau", "de"], '.').unwrap();
//! let string = DelimitedStringName::new("oss.cs.fau.de", '.').unwrap();
//!
//! assert!(list.is_equal(&string));
//! assert_eq!(list.hash_code(), string.hash_code());
//!
//! // A component containing the delimiter stays one component.
//! let host = list.append("fau\\.de").unwrap();
//! assert_eq!(host.component_count(), 5);
//! assert_eq!(host.as_string('.'), "oss.cs.fau.de.fau.de");
//! ```

pub mod codec;
pub mod error;
pub mod fs;
pub mod list_name;
pub mod name;
pub mod string_name;

pub use codec::ESCAPE_CHARACTER;
pub use error::{NameError, Violation};
pub use list_name::ComponentListName;
pub use name::{Name, DEFAULT_DELIMITER};
pub use string_name::DelimitedStringName;
