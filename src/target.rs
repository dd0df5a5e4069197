//! Target kind definitions.
//!
//! [`TargetKind`] is the closed contract surface of the engine: the fixed
//! set of types a conversion can be requested for. Every kind has a name
//! (used in diagnostics) and a deterministic zero value (returned by the
//! lossy entry points on failure).

use chrono::{DateTime, TimeDelta, Utc};

use crate::value::Value;

/// The zero/uninitialized Time sentinel.
///
/// This is the value the Time kind zero-initializes to, and the origin the
/// Bool-from-Time and Duration-from-Time rules measure against.
pub const ZERO_TIME: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// The requested conversion target. Fixed, closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Bool,
    Str,
    I8,
    I16,
    I32,
    I64,
    /// Platform-width signed integer; bounds come from [`crate::bounds`].
    Int,
    U8,
    U16,
    U32,
    U64,
    /// Platform-width unsigned integer; bounds come from [`crate::bounds`].
    Uint,
    F32,
    F64,
    Duration,
    Time,
}

impl TargetKind {
    /// All target kinds, in declaration order.
    pub const ALL: [TargetKind; 16] = [
        TargetKind::Bool,
        TargetKind::Str,
        TargetKind::I8,
        TargetKind::I16,
        TargetKind::I32,
        TargetKind::I64,
        TargetKind::Int,
        TargetKind::U8,
        TargetKind::U16,
        TargetKind::U32,
        TargetKind::U64,
        TargetKind::Uint,
        TargetKind::F32,
        TargetKind::F64,
        TargetKind::Duration,
        TargetKind::Time,
    ];

    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TargetKind::Bool => "bool",
            TargetKind::Str => "string",
            TargetKind::I8 => "i8",
            TargetKind::I16 => "i16",
            TargetKind::I32 => "i32",
            TargetKind::I64 => "i64",
            TargetKind::Int => "int",
            TargetKind::U8 => "u8",
            TargetKind::U16 => "u16",
            TargetKind::U32 => "u32",
            TargetKind::U64 => "u64",
            TargetKind::Uint => "uint",
            TargetKind::F32 => "f32",
            TargetKind::F64 => "f64",
            TargetKind::Duration => "duration",
            TargetKind::Time => "time",
        }
    }

    /// The deterministic zero value for this kind.
    ///
    /// Failed conversions always hand this back through the lossy entry
    /// points - never an undefined or partially populated value.
    pub fn zero(self) -> Value {
        match self {
            TargetKind::Bool => Value::Bool(false),
            TargetKind::Str => Value::Str(String::new()),
            TargetKind::I8 => Value::I8(0),
            TargetKind::I16 => Value::I16(0),
            TargetKind::I32 => Value::I32(0),
            TargetKind::I64 => Value::I64(0),
            TargetKind::Int => Value::Int(0),
            TargetKind::U8 => Value::U8(0),
            TargetKind::U16 => Value::U16(0),
            TargetKind::U32 => Value::U32(0),
            TargetKind::U64 => Value::U64(0),
            TargetKind::Uint => Value::Uint(0),
            TargetKind::F32 => Value::F32(0.0),
            TargetKind::F64 => Value::F64(0.0),
            TargetKind::Duration => Value::Duration(TimeDelta::zero()),
            TargetKind::Time => Value::Time(ZERO_TIME),
        }
    }

    /// True for the signed integer targets, including the platform width.
    pub fn is_signed_int(self) -> bool {
        matches!(
            self,
            TargetKind::I8 | TargetKind::I16 | TargetKind::I32 | TargetKind::I64 | TargetKind::Int
        )
    }

    /// True for the unsigned integer targets, including the platform width.
    pub fn is_unsigned_int(self) -> bool {
        matches!(
            self,
            TargetKind::U8 | TargetKind::U16 | TargetKind::U32 | TargetKind::U64 | TargetKind::Uint
        )
    }

    /// True for the floating point targets.
    pub fn is_float(self) -> bool {
        matches!(self, TargetKind::F32 | TargetKind::F64)
    }

    /// True for any numeric target (routed through a canonical carrier).
    pub fn is_numeric(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int() || self.is_float()
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
