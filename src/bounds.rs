//! Platform integer bound table.
//!
//! The platform-width `int`/`uint` targets narrow against bounds resolved
//! once from the native integer bit width (32 or 64). The table is built
//! lazily, never mutated afterwards, and safe for unsynchronized reads.

use lazy_static::lazy_static;

/// Immutable bounds for the platform-width integer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBounds {
    /// Native integer bit width.
    pub bits: u32,
    /// Minimum value of the platform signed integer.
    pub int_min: i64,
    /// Maximum value of the platform signed integer.
    pub int_max: i64,
    /// Maximum value of the platform unsigned integer.
    pub uint_max: u64,
}

impl IntBounds {
    /// Compute bounds for a given bit width.
    fn for_bits(bits: u32) -> Self {
        debug_assert!(bits == 32 || bits == 64);
        if bits == 64 {
            IntBounds {
                bits,
                int_min: i64::MIN,
                int_max: i64::MAX,
                uint_max: u64::MAX,
            }
        } else {
            IntBounds {
                bits,
                int_min: i32::MIN as i64,
                int_max: i32::MAX as i64,
                uint_max: u32::MAX as u64,
            }
        }
    }

    /// Bounds for the running platform.
    fn native() -> Self {
        Self::for_bits(isize::BITS)
    }
}

lazy_static! {
    /// Process-wide bound table, computed once at first use.
    pub static ref PLATFORM: IntBounds = IntBounds::native();
}
