//! error
//!
//! The single typed failure channel for name operations.
//!
//! # Design
//!
//! Every fallible operation in this crate reports failures through [`NameError`],
//! tagged with the contract layer that failed ([`Violation`]). The tags matter to
//! callers: a precondition violation means the caller passed bad input, while an
//! invariant or postcondition violation means the library itself is defective and
//! the value involved must not be trusted.
//!
//! A [`Violation::Wrapped`] error carries the original failure as its
//! [`source`](std::error::Error::source), so higher-level operations can present a
//! coarser failure to their own callers without losing the cause.

use std::fmt;

use thiserror::Error;

/// The contract layer a failed operation violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A caller-supplied argument was invalid (out-of-range index, mismatched
    /// delimiter, component not in canonical escaped form, ...).
    Precondition,

    /// The receiver's own state was inconsistent at a checkpoint (cached count
    /// disagreeing with the parsed count, delimiter equal to the escape
    /// character, ...).
    Invariant,

    /// An operation's result failed to satisfy its own guarantee. Signals a
    /// defect in the operation, not bad input.
    Postcondition,

    /// A failure detected in a collaborator and translated by a higher-level
    /// operation; the original cause is preserved as the error source.
    Wrapped,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Violation::Precondition => "precondition",
            Violation::Invariant => "invariant",
            Violation::Postcondition => "postcondition",
            Violation::Wrapped => "wrapped",
        };
        f.write_str(label)
    }
}

/// A contract violation raised by a name operation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{kind} violation: {message}")]
pub struct NameError {
    kind: Violation,
    message: String,
    #[source]
    cause: Option<Box<NameError>>,
}

impl NameError {
    /// A caller-supplied argument was invalid.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self {
            kind: Violation::Precondition,
            message: message.into(),
            cause: None,
        }
    }

    /// The receiver's state was inconsistent at a checkpoint.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self {
            kind: Violation::Invariant,
            message: message.into(),
            cause: None,
        }
    }

    /// An operation's result failed its own guarantee.
    pub fn postcondition(message: impl Into<String>) -> Self {
        Self {
            kind: Violation::Postcondition,
            message: message.into(),
            cause: None,
        }
    }

    /// Translate a lower-level failure, preserving it as the cause.
    pub fn wrapped(message: impl Into<String>, cause: NameError) -> Self {
        Self {
            kind: Violation::Wrapped,
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// The contract layer this error belongs to.
    pub fn kind(&self) -> Violation {
        self.kind
    }

    /// The human-readable description of the violation.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause, if this is a [`Violation::Wrapped`] error.
    pub fn cause(&self) -> Option<&NameError> {
        self.cause.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = NameError::precondition("index out of bounds");
        assert_eq!(err.to_string(), "precondition violation: index out of bounds");

        let err = NameError::invariant("cached count disagrees with parsed count");
        assert!(err.to_string().starts_with("invariant violation"));

        let err = NameError::postcondition("count not incremented");
        assert!(err.to_string().starts_with("postcondition violation"));
    }

    #[test]
    fn wrapped_preserves_cause() {
        let inner = NameError::invariant("delimiter is the escape character");
        let outer = NameError::wrapped("could not compose full name", inner);

        assert_eq!(outer.kind(), Violation::Wrapped);
        let cause = outer.cause().expect("cause must be preserved");
        assert_eq!(cause.kind(), Violation::Invariant);

        // The std error chain sees the same cause.
        let source = outer.source().expect("source must be set");
        assert!(source.to_string().contains("escape character"));
    }

    #[test]
    fn kind_accessor_matches_constructor() {
        assert_eq!(NameError::precondition("x").kind(), Violation::Precondition);
        assert_eq!(NameError::invariant("x").kind(), Violation::Invariant);
        assert_eq!(NameError::postcondition("x").kind(), Violation::Postcondition);
    }
}
