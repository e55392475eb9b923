//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the platformer simulation.
//! Positions, speeds and jump impulses are all `Fixed`; only bounding
//! boxes drop to whole units (see [`to_int`]).
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A level is measured in pixels, so 32k units is plenty for a
//! side-scroller while sub-pixel speeds (e.g. 5.5 px/frame) stay exact.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE;

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1;

// =============================================================================
// CONVERSIONS
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or initialization. NEVER in the frame loop.
///
/// # Example
/// ```
/// use platformer_core::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Whole units to fixed-point.
#[inline]
pub const fn from_int(i: i32) -> Fixed {
    i.wrapping_shl(FIXED_SCALE as u32)
}

/// Fixed-point to whole units, rounding toward negative infinity.
///
/// This is how a position becomes a bounding-box corner.
#[inline]
pub const fn to_int(f: Fixed) -> i32 {
    f >> FIXED_SCALE
}

// =============================================================================
// TESTS
// =============================================================================
