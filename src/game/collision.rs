//! Collision Oracle
//!
//! Pure predicates over axis-aligned boxes. Nothing here mutates state;
//! locomotion, projectiles and pickups all ask the same questions.
//!
//! Overlap is strict: boxes that only touch along an edge do not collide.

use crate::core::rect::Rect;
use crate::game::level::{Level, LevelBounds, TileKind};

/// Anything with a bounding box.
pub trait Collidable {
    fn bounding_box(&self) -> Rect;
}

impl Collidable for Rect {
    #[inline]
    fn bounding_box(&self) -> Rect {
        *self
    }
}

/// Box overlaps any tile at all.
#[inline]
pub fn collides_with_any_tile(level: &Level, bx: Rect) -> bool {
    level.any_tile(bx, |_| true)
}

/// Box overlaps a platform tile.
#[inline]
pub fn collides_with_platform_only(level: &Level, bx: Rect) -> bool {
    level.any_tile(bx, TileKind::is_platform)
}

/// Box overlaps a solid (non-platform) tile.
#[inline]
pub fn collides_with_non_platform(level: &Level, bx: Rect) -> bool {
    level.any_tile(bx, |kind| !kind.is_platform())
}

/// Box overlaps a wall tile.
#[inline]
pub fn collides_with_wall(level: &Level, bx: Rect) -> bool {
    level.any_tile(bx, |kind| kind == TileKind::Wall)
}

/// Entity has left the level: past the right edge, fully off the left
/// edge, or below the bottom. Leaving through the top is allowed.
pub fn collides_with_world_bounds<C: Collidable + ?Sized>(bounds: LevelBounds, entity: &C) -> bool {
    let bx = entity.bounding_box();
    bx.x > bounds.width || bx.x < -bx.width || bx.y > bounds.height
}

/// Two entities' boxes overlap.
#[inline]
pub fn collides_between<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    a.bounding_box().intersects(&b.bounding_box())
}
