//! Best-effort conversion between dynamic runtime values.
//!
//! A [`Value`] can hold any of the runtime's dynamic kinds (integers of
//! every width, floats, strings, booleans, sequences, maps, durations,
//! timestamps, references, custom payloads). Each conversion entry point
//! takes any value and produces one fixed target type, following a single
//! documented rule table: numeric kinds route through canonical 64-bit
//! carriers and narrow by clamping, strings go through fixed parse
//! grammars, and custom payloads may override everything with a
//! capability hook.
//!
//! Conversions never panic. The fallible entry points return
//! `Cast<T>` with a diagnostic on failure; the `*_lossy` companions hand
//! back the target's zero value instead.
//!
//! ```
//! use valcast::{to_i64, to_u8_lossy, Value};
//!
//! assert_eq!(to_i64(&Value::from("42")), Ok(42));
//! assert_eq!(to_u8_lossy(&Value::I64(300)), 255);
//! assert!(to_i64(&Value::from("forty-two")).is_err());
//! ```

pub mod bounds;
pub mod container;
pub mod convert;
pub mod error;
pub mod hooks;
pub mod parse;
pub mod resolve;
pub mod target;
pub mod value;

mod narrow;

pub use convert::{
    convert, convert_lossy, to_bool, to_bool_lossy, to_duration, to_duration_lossy, to_f32,
    to_f32_lossy, to_f64, to_f64_lossy, to_i8, to_i8_lossy, to_i16, to_i16_lossy, to_i32,
    to_i32_lossy, to_i64, to_i64_lossy, to_int, to_int_lossy, to_str, to_str_lossy, to_time,
    to_time_lossy, to_u8, to_u8_lossy, to_u16, to_u16_lossy, to_u32, to_u32_lossy, to_u64,
    to_u64_lossy, to_uint, to_uint_lossy,
};
pub use error::{Cast, CastError};
pub use hooks::{CastHook, Hook, HookError};
pub use target::{TargetKind, ZERO_TIME};
pub use value::{Value, ValueKind};

pub mod prelude {
    pub use crate::container::{
        convert_entries, convert_entries_into, convert_slice, convert_slice_into,
    };
    pub use crate::convert::*;
    pub use crate::error::{Cast, CastError};
    pub use crate::hooks::{CastHook, Hook, HookError};
    pub use crate::parse::duration::{format_duration, parse_duration};
    pub use crate::parse::time::parse_time;
    pub use crate::resolve::resolve;
    pub use crate::target::{TargetKind, ZERO_TIME};
    pub use crate::value::{Value, ValueKind};
}
