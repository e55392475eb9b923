//! Fixed-Point 2D Vector
//!
//! Positions and velocities in level space. Y grows downward, matching
//! screen coordinates, so gravity is a positive Y step.

use std::fmt;
use std::ops::{Add, Sub};
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, FIXED_ONE, FIXED_SCALE};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a vector from whole-unit components.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: x << FIXED_SCALE,
            y: y << FIXED_SCALE,
        }
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Convert to float tuple for logging.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (
            self.x as f32 / FIXED_ONE as f32,
            self.y as f32 / FIXED_ONE as f32,
        )
    }
}

impl Add for FixedVec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        FixedVec2::add(self, rhs)
    }
}

impl Sub for FixedVec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        FixedVec2::sub(self, rhs)
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "Vec2({:.3}, {:.3})", fx, fy)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "({:.3}, {:.3})", fx, fy)
    }
}
