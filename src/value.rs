//! Dynamic runtime value type.
//!
//! [`Value`] is the unified representation for every input the conversion
//! engine accepts: primitives of all supported widths, strings, composites
//! with a length, durations and timestamps, reference cells, and opaque
//! custom values that participate via [`CastHook`].
//!
//! The engine only ever borrows a `Value`; it never mutates one.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::hooks::CastHook;

/// A dynamic value of unknown static type.
///
/// Integer variants keep their source width so that identity conversions
/// and width-aware diagnostics work, even though all numeric conversions
/// are routed through the three canonical carriers (`i64`, `u64`, `f64`).
#[derive(Clone)]
pub enum Value {
    /// Absent/uninitialized value. Converts to nothing.
    Nil,
    /// Boolean value.
    Bool(bool),
    /// Signed integers.
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    /// Platform-width signed integer.
    Int(isize),
    /// Unsigned integers.
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Platform-width unsigned integer.
    Uint(usize),
    /// Floating point.
    F32(f32),
    F64(f64),
    /// Complex number; only the real component participates in conversions.
    Complex { re: f64, im: f64 },
    /// Owned string.
    Str(String),
    /// Sequence of values.
    Seq(Vec<Value>),
    /// Key/value entries. Order is insertion order; only the entry count
    /// matters to the numeric conversions.
    Map(Vec<(Value, Value)>),
    /// Signed span of time.
    Duration(TimeDelta),
    /// A point in time (UTC).
    Time(DateTime<Utc>),
    /// Shared mutable reference to another value. The resolver follows
    /// these, breaking cycles by cell address.
    Ref(Rc<RefCell<Value>>),
    /// Opaque user value; converts only through its [`CastHook`] methods.
    Custom(Rc<dyn CastHook>),
}

/// Kind tag for a [`Value`], used for dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Nil,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Int,
    U8,
    U16,
    U32,
    U64,
    Uint,
    F32,
    F64,
    Complex,
    Str,
    Seq,
    Map,
    Duration,
    Time,
    Ref,
    Custom,
}

impl ValueKind {
    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Bool => "bool",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::Int => "int",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::Uint => "uint",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Complex => "complex",
            ValueKind::Str => "string",
            ValueKind::Seq => "seq",
            ValueKind::Map => "map",
            ValueKind::Duration => "duration",
            ValueKind::Time => "time",
            ValueKind::Ref => "ref",
            ValueKind::Custom => "custom",
        }
    }

    /// True for signed integer kinds, including the platform width.
    pub fn is_signed_int(self) -> bool {
        matches!(
            self,
            ValueKind::I8 | ValueKind::I16 | ValueKind::I32 | ValueKind::I64 | ValueKind::Int
        )
    }

    /// True for unsigned integer kinds, including the platform width.
    pub fn is_unsigned_int(self) -> bool {
        matches!(
            self,
            ValueKind::U8 | ValueKind::U16 | ValueKind::U32 | ValueKind::U64 | ValueKind::Uint
        )
    }

    /// True for floating point kinds.
    pub fn is_float(self) -> bool {
        matches!(self, ValueKind::F32 | ValueKind::F64)
    }
}

impl Value {
    /// Get the kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::Int(_) => ValueKind::Int,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::Uint(_) => ValueKind::Uint,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Complex { .. } => ValueKind::Complex,
            Value::Str(_) => ValueKind::Str,
            Value::Seq(_) => ValueKind::Seq,
            Value::Map(_) => ValueKind::Map,
            Value::Duration(_) => ValueKind::Duration,
            Value::Time(_) => ValueKind::Time,
            Value::Ref(_) => ValueKind::Ref,
            Value::Custom(_) => ValueKind::Custom,
        }
    }

    /// Human-readable name for this value's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Custom(c) => c.type_name(),
            other => other.kind().name(),
        }
    }

    /// Wrap a value in a reference cell.
    pub fn reference(inner: Value) -> Value {
        Value::Ref(Rc::new(RefCell::new(inner)))
    }

    /// Wrap a hook-bearing custom value.
    pub fn custom(hook: impl CastHook + 'static) -> Value {
        Value::Custom(Rc::new(hook))
    }

    /// Element count for length-bearing values.
    ///
    /// Strings report their byte length here, but note that numeric
    /// conversions send strings through the parse chain instead.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.len()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// True if this is the absent value.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// True if this is a reference cell.
    pub fn is_ref(&self) -> bool {
        matches!(self, Value::Ref(_))
    }
}

// === Constructors ===

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Int,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Uint,
    f32 => F32,
    f64 => F64,
    String => Str,
    TimeDelta => Duration,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Nil,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::I8(v) => write!(f, "I8({v})"),
            Value::I16(v) => write!(f, "I16({v})"),
            Value::I32(v) => write!(f, "I32({v})"),
            Value::I64(v) => write!(f, "I64({v})"),
            Value::Int(v) => write!(f, "Int({v})"),
            Value::U8(v) => write!(f, "U8({v})"),
            Value::U16(v) => write!(f, "U16({v})"),
            Value::U32(v) => write!(f, "U32({v})"),
            Value::U64(v) => write!(f, "U64({v})"),
            Value::Uint(v) => write!(f, "Uint({v})"),
            Value::F32(v) => write!(f, "F32({v})"),
            Value::F64(v) => write!(f, "F64({v})"),
            Value::Complex { re, im } => write!(f, "Complex({re}, {im})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Seq(items) => write!(f, "Seq({} items)", items.len()),
            Value::Map(entries) => write!(f, "Map({} entries)", entries.len()),
            Value::Duration(d) => write!(f, "Duration({d})"),
            Value::Time(t) => write!(f, "Time({t})"),
            Value::Ref(_) => write!(f, "Ref(..)"),
            Value::Custom(c) => write!(f, "Custom({})", c.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Complex { re: ar, im: ai }, Value::Complex { re: br, im: bi }) => {
                ar == br && ai == bi
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            // Reference cells compare by identity.
            (Value::Ref(a), Value::Ref(b)) => Rc::ptr_eq(a, b),
            // Custom values can't be compared.
            _ => false,
        }
    }
}

/// Rendered form of a value, used in diagnostics.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Complex { re, im } => {
                if *im < 0.0 {
                    write!(f, "({re}{im}i)")
                } else {
                    write!(f, "({re}+{im}i)")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::Seq(items) => write!(f, "[{} items]", items.len()),
            Value::Map(entries) => write!(f, "{{{} entries}}", entries.len()),
            Value::Duration(d) => write!(f, "{}", crate::parse::duration::format_duration(*d)),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Ref(_) => write!(f, "&.."),
            Value::Custom(c) => write!(f, "<{}>", c.type_name()),
        }
    }
}
