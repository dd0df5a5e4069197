//! Conversion error types.
//!
//! Every failure path in the engine produces a [`CastError`] describing the
//! offending value's kind, a rendered form of the value, and the requested
//! target. No conversion ever aborts the process: panics out of user hook
//! code are caught at the boundary and surfaced as [`CastError::Internal`].

use thiserror::Error;

use crate::value::Value;

/// Result alias used by every conversion entry point.
///
/// `Err` is the `ok = false` half of the conversion contract; the lossy
/// wrappers in [`crate::convert`] turn it back into the target's zero value.
pub type Cast<T> = Result<T, CastError>;

/// A conversion failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    /// The resolved value's kind has no conversion path to the target.
    #[error("unable to cast {kind} value {rendered} to {target}")]
    UnsupportedKind {
        /// Kind name of the offending value.
        kind: &'static str,
        /// Rendered form of the offending value.
        rendered: String,
        /// Requested target name.
        target: &'static str,
    },

    /// A string failed every strategy in its target's parse chain.
    #[error("unable to parse {rendered:?} as {target}")]
    ParseFailure {
        /// The string that failed to parse.
        rendered: String,
        /// Requested target name.
        target: &'static str,
    },

    /// The value is absent/uninitialized.
    #[error("unable to cast nil to {target}")]
    Nil {
        /// Requested target name.
        target: &'static str,
    },

    /// A capability hook was present but reported failure.
    #[error("{kind} hook for {target} failed: {message}")]
    Hook {
        /// Kind name of the hook-bearing value.
        kind: &'static str,
        /// Requested target name.
        target: &'static str,
        /// Message reported by the hook.
        message: String,
    },

    /// An unexpected fault (a panic in hook code) was caught at the
    /// engine boundary and converted to a normal failure.
    #[error("internal fault while casting to {target}: {message}")]
    Internal {
        /// Requested target name.
        target: &'static str,
        /// Description of the fault.
        message: String,
    },
}

impl CastError {
    /// Build an unsupported-kind error for `value`.
    pub fn unsupported(value: &Value, target: &'static str) -> Self {
        CastError::UnsupportedKind {
            kind: value.type_name(),
            rendered: value.to_string(),
            target,
        }
    }

    /// Build a parse-failure error for `input`.
    pub fn parse(input: &str, target: &'static str) -> Self {
        CastError::ParseFailure {
            rendered: input.to_owned(),
            target,
        }
    }

    /// Build a nil error.
    pub fn nil(target: &'static str) -> Self {
        CastError::Nil { target }
    }

    /// The requested target name carried by this error.
    pub fn target(&self) -> &'static str {
        match self {
            CastError::UnsupportedKind { target, .. } => target,
            CastError::ParseFailure { target, .. } => target,
            CastError::Nil { target } => target,
            CastError::Hook { target, .. } => target,
            CastError::Internal { target, .. } => target,
        }
    }

    /// Check if this is a parse failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, CastError::ParseFailure { .. })
    }

    /// Check if this is a nil failure.
    pub fn is_nil(&self) -> bool {
        matches!(self, CastError::Nil { .. })
    }
}
