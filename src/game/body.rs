//! Physical Body
//!
//! Position, size, facing and liveness shared by every entity in the
//! world. The bounding box is derived from the position on demand, so
//! the two can never drift apart.

use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, to_int};
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::core::vec2::FixedVec2;
use crate::game::collision::Collidable;

/// Spatial state of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner (fixed-point)
    pub position: FixedVec2,
    /// Box width in whole units
    pub width: i32,
    /// Box height in whole units
    pub height: i32,
    /// Facing direction
    pub facing_left: bool,
    /// Cleared when the entity should be purged
    pub active: bool,
}

impl Body {
    /// Active, right-facing body at `position`.
    pub fn new(position: FixedVec2, width: i32, height: i32) -> Self {
        Self {
            position,
            width,
            height,
            facing_left: false,
            active: true,
        }
    }

    /// Box occupied at the current position.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        self.box_at(self.position)
    }

    /// Box this body would occupy at `position`.
    #[inline]
    pub fn box_at(&self, position: FixedVec2) -> Rect {
        Rect::new(to_int(position.x), to_int(position.y), self.width, self.height)
    }

    /// Box after a candidate move by `(dx, dy)`.
    #[inline]
    pub fn box_offset(&self, dx: Fixed, dy: Fixed) -> Rect {
        self.box_at(self.position + FixedVec2::new(dx, dy))
    }

    #[inline]
    pub fn x(&self) -> Fixed {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> Fixed {
        self.position.y
    }

    #[inline]
    pub fn set_x(&mut self, x: Fixed) {
        self.position.x = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: Fixed) {
        self.position.y = y;
    }

    /// Commit a move.
    #[inline]
    pub fn translate(&mut self, dx: Fixed, dy: Fixed) {
        self.position = self.position + FixedVec2::new(dx, dy);
    }

    /// Mark for removal at the next cleanup.
    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Hash spatial state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_i32(self.width);
        hasher.update_i32(self.height);
        hasher.update_bool(self.facing_left);
        hasher.update_bool(self.active);
    }
}

impl Collidable for Body {
    #[inline]
    fn bounding_box(&self) -> Rect {
        Body::bounding_box(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{from_int, to_fixed};

    #[test]
    fn test_bounding_box_follows_position() {
        let mut body = Body::new(FixedVec2::from_ints(10, 20), 40, 60);
        assert_eq!(body.bounding_box(), Rect::new(10, 20, 40, 60));

        body.translate(to_fixed(2.5), from_int(-3));
        assert_eq!(body.bounding_box(), Rect::new(12, 17, 40, 60));

        body.set_x(to_fixed(-0.25));
        assert_eq!(body.bounding_box().x, -1);
    }

    #[test]
    fn test_box_offset_does_not_move() {
        let body = Body::new(FixedVec2::from_ints(0, 0), 10, 10);
        let ahead = body.box_offset(from_int(5), 0);
        assert_eq!(ahead, Rect::new(5, 0, 10, 10));
        assert_eq!(body.bounding_box(), Rect::new(0, 0, 10, 10));
    }

    #[test]
    fn test_deactivate() {
        let mut body = Body::new(FixedVec2::ZERO, 1, 1);
        assert!(body.active);
        body.deactivate();
        assert!(!body.active);
    }
}
