//! Capability hooks for user-defined values.
//!
//! A value of an unknown user type participates in conversions by exposing
//! [`CastHook`] methods, one per target family: bool, string, the three
//! numeric carriers, duration, and time. Presence is structural - a method
//! returning `Some(..)` means the capability exists and fully overrides the
//! built-in rules for that family; `None` means no capability (there is
//! nothing to invoke, so an absent capability can never be called).
//!
//! A hook that reports failure fails the conversion outright; there is no
//! fallback to the built-in rules. A hook that panics is caught at the
//! engine boundary and surfaced as [`CastError::Internal`].

use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::error::{Cast, CastError};
use crate::value::Value;

/// Result of probing a capability: `None` when the capability is absent,
/// `Some(Err(..))` when it exists but fails.
pub type Hook<T> = Option<Result<T, HookError>>;

/// Failure reported by a capability hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    /// Create a hook error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        HookError(message.into())
    }
}

/// Conversion capabilities a custom value may expose.
///
/// Every method defaults to `None` (capability absent). Implement only the
/// families the type supports; the narrower integer and float targets reach
/// the type through its carrier hook (`cast_i64`, `cast_u64`, `cast_f64`)
/// and are narrowed by the engine afterwards.
pub trait CastHook {
    /// Name of the underlying type, used in diagnostics.
    fn type_name(&self) -> &'static str {
        "custom"
    }

    /// Bool family capability.
    fn cast_bool(&self) -> Hook<bool> {
        None
    }

    /// String family capability.
    fn cast_str(&self) -> Hook<String> {
        None
    }

    /// Signed numeric family capability (i64 carrier).
    fn cast_i64(&self) -> Hook<i64> {
        None
    }

    /// Unsigned numeric family capability (u64 carrier).
    fn cast_u64(&self) -> Hook<u64> {
        None
    }

    /// Floating numeric family capability (f64 carrier).
    fn cast_f64(&self) -> Hook<f64> {
        None
    }

    /// Duration family capability.
    fn cast_duration(&self) -> Hook<TimeDelta> {
        None
    }

    /// Time family capability.
    fn cast_time(&self) -> Hook<DateTime<Utc>> {
        None
    }
}

/// Probe `value` for a capability and invoke it behind a panic guard.
///
/// Returns `None` when `value` is not a custom value or the capability is
/// absent; in that case the caller proceeds with the built-in rules.
pub(crate) fn invoke<T>(
    value: &Value,
    target: &'static str,
    select: impl FnOnce(&dyn CastHook) -> Hook<T>,
) -> Option<Cast<T>> {
    let Value::Custom(hook) = value else {
        return None;
    };
    let kind = hook.type_name();
    match catch_unwind(AssertUnwindSafe(|| select(hook.as_ref()))) {
        Ok(None) => None,
        Ok(Some(Ok(v))) => Some(Ok(v)),
        Ok(Some(Err(e))) => Some(Err(CastError::Hook {
            kind,
            target,
            message: e.to_string(),
        })),
        Err(payload) => Some(Err(CastError::Internal {
            target,
            message: panic_message(payload),
        })),
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "hook panicked".to_owned()
    }
}
