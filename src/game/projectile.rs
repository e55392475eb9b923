//! Projectiles
//!
//! Standard shots fly horizontally until they hit solid geometry or leave
//! the level. Beams are stationary strips in front of the shooter that
//! live for a fixed number of frames and survive every hit.

use serde::{Serialize, Deserialize};

use crate::core::fixed::Fixed;
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::core::vec2::FixedVec2;
use crate::game::body::Body;
use crate::game::collision::{Collidable, collides_with_non_platform, collides_with_world_bounds};
use crate::game::config::SimConfig;
use crate::game::level::Level;
use crate::game::unit::{Faction, RangedAttacker, Unit, UnitId};

/// Projectile type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProjectileKind {
    /// Consumed on hit, damage from the shooter
    Standard = 0,
    /// Never consumed, fixed damage
    Beam = 1,
}

/// A live projectile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    /// Unit that fired it
    pub owner: UnitId,
    /// Side of the unit that fired it
    pub owner_faction: Faction,
    /// Shooter's ranged damage when fired
    pub owner_damage: i32,
    pub body: Body,
    /// Horizontal step per frame (zero for beams)
    pub velocity: Fixed,
    /// Resolution passes left before the projectile can hit anything
    pub disarmed_frames: u32,
    /// Frames left for a beam
    pub lifetime_frames: Option<u32>,
}

impl Projectile {
    /// Fire from `shooter`'s leading edge in its facing direction.
    pub fn fire(id: u32, kind: ProjectileKind, shooter: &Unit, config: &SimConfig) -> Self {
        let bx = shooter.body.bounding_box();
        let facing_left = shooter.body.facing_left;

        let (width, height) = match kind {
            ProjectileKind::Standard => (config.projectile_width, config.projectile_height),
            ProjectileKind::Beam => (config.beam_length, config.beam_height),
        };
        let x = if facing_left { bx.left() - width } else { bx.right() };
        let y = bx.top() + (bx.height - height) / 2;

        let mut body = Body::new(FixedVec2::from_ints(x, y), width, height);
        body.facing_left = facing_left;

        let (velocity, lifetime_frames) = match kind {
            ProjectileKind::Standard => {
                let speed = config.projectile_speed;
                (if facing_left { -speed } else { speed }, None)
            }
            ProjectileKind::Beam => (0, Some(config.beam_lifetime_frames)),
        };

        Self {
            id,
            kind,
            owner: shooter.id(),
            owner_faction: shooter.faction(),
            owner_damage: shooter.ranged_damage(),
            body,
            velocity,
            disarmed_frames: config.projectile_arm_frames,
            lifetime_frames,
        }
    }

    #[inline]
    pub fn is_beam(&self) -> bool {
        self.kind == ProjectileKind::Beam
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Whether a hit registers at all.
    #[inline]
    pub fn able_to_do_damage(&self) -> bool {
        self.disarmed_frames == 0
    }

    /// Count down one disarmed resolution pass.
    #[inline]
    pub fn tick_arming(&mut self) {
        self.disarmed_frames = self.disarmed_frames.saturating_sub(1);
    }

    /// Remove after a hit.
    #[inline]
    pub fn nullify(&mut self) {
        self.body.deactivate();
    }

    /// Move or age the projectile. Returns true if it expired this frame.
    pub fn update(&mut self, level: &Level) -> bool {
        if !self.is_active() {
            return false;
        }

        match self.kind {
            ProjectileKind::Standard => {
                self.body.translate(self.velocity, 0);
                let bx = self.body.bounding_box();
                if collides_with_non_platform(level, bx)
                    || collides_with_world_bounds(level.bounds(), &bx)
                {
                    self.body.deactivate();
                    return true;
                }
            }
            ProjectileKind::Beam => {
                let left = self.lifetime_frames.unwrap_or(0).saturating_sub(1);
                self.lifetime_frames = Some(left);
                if left == 0 {
                    self.body.deactivate();
                    return true;
                }
            }
        }
        false
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id);
        hasher.update_u8(self.kind as u8);
        hasher.update_u32(self.owner.0);
        hasher.update_u8(self.owner_faction as u8);
        hasher.update_i32(self.owner_damage);
        self.body.hash_into(hasher);
        hasher.update_fixed(self.velocity);
        hasher.update_u32(self.disarmed_frames);
        hasher.update_u32(self.lifetime_frames.unwrap_or(u32::MAX));
    }
}

impl Collidable for Projectile {
    #[inline]
    fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::from_int;
    use crate::game::config::UnitStats;
    use crate::game::level::LevelLayout;
    use crate::game::unit::Movable;

    fn level() -> Level {
        LevelLayout {
            name: "range".to_string(),
            tile_size: 10,
            rows: vec![
                "P.........".to_string(),
                "..........".to_string(),
                "#........#".to_string(),
            ],
        }
        .parse(16)
        .unwrap()
        .level
    }

    fn shooter(x: i32) -> Unit {
        let stats = UnitStats { width: 10, height: 10, ..UnitStats::PLAYER };
        Unit::new(UnitId(4), Faction::Player, FixedVec2::from_ints(x, 20), &stats).unwrap()
    }

    fn config() -> SimConfig {
        SimConfig {
            projectile_width: 4,
            projectile_height: 2,
            projectile_speed: from_int(10),
            beam_length: 30,
            beam_height: 2,
            beam_lifetime_frames: 3,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_fire_from_leading_edge() {
        let config = config();
        let mut unit = shooter(40);

        let right = Projectile::fire(1, ProjectileKind::Standard, &unit, &config);
        assert_eq!(right.bounding_box(), Rect::new(50, 24, 4, 2));
        assert_eq!(right.velocity, from_int(10));
        assert_eq!(right.owner, UnitId(4));
        assert_eq!(right.owner_damage, UnitStats::PLAYER.ranged_damage);

        unit.move_left();
        let left = Projectile::fire(2, ProjectileKind::Standard, &unit, &config);
        assert_eq!(left.bounding_box(), Rect::new(36, 24, 4, 2));
        assert_eq!(left.velocity, from_int(-10));

        let beam = Projectile::fire(3, ProjectileKind::Beam, &unit, &config);
        assert_eq!(beam.bounding_box(), Rect::new(10, 24, 30, 2));
        assert!(beam.is_beam());
    }

    #[test]
    fn test_standard_stops_at_solid_tile() {
        let config = config();
        let mut shot = Projectile::fire(1, ProjectileKind::Standard, &shooter(40), &config);
        assert!(!shot.update(&level()));
        assert!(!shot.update(&level()));
        assert!(!shot.update(&level()));
        // x = 80..84 clear; next step reaches the wall block at 90
        assert!(shot.update(&level()));
        assert!(!shot.is_active());
        assert!(!shot.update(&level()));
    }

    #[test]
    fn test_standard_expires_outside_level() {
        let config = config();
        let mut unit = shooter(40);
        unit.body.set_y(from_int(0));
        let mut shot = Projectile::fire(1, ProjectileKind::Standard, &unit, &config);
        let mut frames = 0;
        while !shot.update(&level()) {
            frames += 1;
            assert!(frames < 20);
        }
        assert!(!shot.is_active());
    }

    #[test]
    fn test_beam_lifetime() {
        let config = config();
        let mut beam = Projectile::fire(1, ProjectileKind::Beam, &shooter(40), &config);
        let start = beam.bounding_box();
        assert!(!beam.update(&level()));
        assert!(!beam.update(&level()));
        assert!(beam.update(&level()));
        assert_eq!(beam.bounding_box(), start);
    }

    #[test]
    fn test_arming() {
        let config = SimConfig { projectile_arm_frames: 2, ..config() };
        let mut shot = Projectile::fire(1, ProjectileKind::Standard, &shooter(40), &config);
        assert!(!shot.able_to_do_damage());
        shot.tick_arming();
        assert!(!shot.able_to_do_damage());
        shot.tick_arming();
        assert!(shot.able_to_do_damage());
        shot.tick_arming();
        assert!(shot.able_to_do_damage());
    }
}
