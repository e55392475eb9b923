//! Units
//!
//! Animate actors (the player and enemies) as flat data plus a small set
//! of capability traits. Structural stats are validated on every write and
//! rejected with [`UnitError`]; health alone is clamped into range.

use serde::{Serialize, Deserialize};

use crate::core::fixed::Fixed;
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::core::vec2::FixedVec2;
use crate::game::body::Body;
use crate::game::collision::Collidable;
use crate::game::config::UnitStats;
use crate::game::error::UnitError;

// =============================================================================
// IDENTITY
// =============================================================================

/// Stable unit identifier, unique within a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Side a unit fights for. Damage only crosses factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Faction {
    Player = 0,
    Enemy = 1,
}

/// Vertical locomotion state. Exactly one holds at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum VerticalState {
    /// Standing on something
    #[default]
    Grounded = 0,
    /// Rising on the remaining jump impulse
    Jumping = 1,
    /// Dropping by gravity
    Falling = 2,
}

// =============================================================================
// UNIT
// =============================================================================

/// An animate actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    faction: Faction,

    /// Position, size, facing, liveness
    pub body: Body,

    health: i32,
    max_health: i32,
    movement_speed: Fixed,
    default_movement_speed: Fixed,
    jump_speed: Fixed,
    default_jump_speed: Fixed,
    ranged_damage: i32,

    /// Consecutive jumps since last ground contact
    pub(crate) jump_counter: u32,
    /// Box validated by the most recent movement check
    pub(crate) future_position: Rect,

    // =========================================================================
    // Locomotion flags
    // =========================================================================

    pub(crate) vertical: VerticalState,
    pub(crate) moving_left: bool,
    pub(crate) moving_right: bool,
    pub(crate) free_pathing: bool,
    pub(crate) attacking_ranged: bool,
}

impl Unit {
    /// Create a grounded, idle unit at full health.
    pub fn new(
        id: UnitId,
        faction: Faction,
        position: FixedVec2,
        stats: &UnitStats,
    ) -> Result<Self, UnitError> {
        validate_max_health(stats.max_health)?;
        if stats.movement_speed < 0 {
            return Err(UnitError::NegativeDefaultMovementSpeed);
        }
        if stats.jump_speed < 0 {
            return Err(UnitError::NegativeDefaultJumpSpeed);
        }
        validate_damage(stats.ranged_damage)?;

        let body = Body::new(position, stats.width, stats.height);
        Ok(Self {
            id,
            faction,
            future_position: body.bounding_box(),
            body,
            health: stats.max_health,
            max_health: stats.max_health,
            movement_speed: stats.movement_speed,
            default_movement_speed: stats.movement_speed,
            jump_speed: 0,
            default_jump_speed: stats.jump_speed,
            ranged_damage: stats.ranged_damage,
            jump_counter: 0,
            vertical: VerticalState::Grounded,
            moving_left: false,
            moving_right: false,
            free_pathing: false,
            attacking_ranged: false,
        })
    }

    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    #[inline]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    // =========================================================================
    // Validated stats
    // =========================================================================

    #[inline]
    pub fn movement_speed(&self) -> Fixed {
        self.movement_speed
    }

    #[inline]
    pub fn default_movement_speed(&self) -> Fixed {
        self.default_movement_speed
    }

    /// Remaining jump impulse.
    #[inline]
    pub fn jump_speed(&self) -> Fixed {
        self.jump_speed
    }

    #[inline]
    pub fn default_jump_speed(&self) -> Fixed {
        self.default_jump_speed
    }

    /// Change the health cap. Current health is clamped to the new cap.
    pub fn set_max_health(&mut self, value: i32) -> Result<(), UnitError> {
        validate_max_health(value)?;
        self.max_health = value;
        self.health = self.health.min(value);
        Ok(())
    }

    pub fn set_movement_speed(&mut self, value: Fixed) -> Result<(), UnitError> {
        if value < 0 {
            return Err(UnitError::NegativeMovementSpeed);
        }
        self.movement_speed = value;
        Ok(())
    }

    pub fn set_default_movement_speed(&mut self, value: Fixed) -> Result<(), UnitError> {
        if value < 0 {
            return Err(UnitError::NegativeDefaultMovementSpeed);
        }
        self.default_movement_speed = value;
        Ok(())
    }

    pub fn set_jump_speed(&mut self, value: Fixed) -> Result<(), UnitError> {
        if value < 0 {
            return Err(UnitError::NegativeJumpSpeed);
        }
        self.jump_speed = value;
        Ok(())
    }

    pub fn set_default_jump_speed(&mut self, value: Fixed) -> Result<(), UnitError> {
        if value < 0 {
            return Err(UnitError::NegativeDefaultJumpSpeed);
        }
        self.default_jump_speed = value;
        Ok(())
    }

    pub fn set_ranged_damage(&mut self, value: i32) -> Result<(), UnitError> {
        validate_damage(value)?;
        self.ranged_damage = value;
        Ok(())
    }

    /// Jump impulse left after a locomotion step, never below zero.
    #[inline]
    pub(crate) fn set_remaining_jump(&mut self, value: Fixed) {
        self.jump_speed = value.max(0);
    }

    /// Set health, clamped into `[0, max_health]`.
    #[inline]
    pub fn set_health(&mut self, value: i32) {
        self.health = value.clamp(0, self.max_health);
    }

    // =========================================================================
    // Locomotion state
    // =========================================================================

    #[inline]
    pub fn vertical_state(&self) -> VerticalState {
        self.vertical
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalState::Grounded
    }

    #[inline]
    pub fn has_free_pathing(&self) -> bool {
        self.free_pathing
    }

    #[inline]
    pub fn jump_counter(&self) -> u32 {
        self.jump_counter
    }

    /// Box checked by the latest movement validation.
    #[inline]
    pub fn future_position(&self) -> Rect {
        self.future_position
    }

    /// Hash everything that affects simulation.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id.0);
        hasher.update_u8(self.faction as u8);
        self.body.hash_into(hasher);
        hasher.update_i32(self.health);
        hasher.update_i32(self.max_health);
        hasher.update_fixed(self.movement_speed);
        hasher.update_fixed(self.default_movement_speed);
        hasher.update_fixed(self.jump_speed);
        hasher.update_fixed(self.default_jump_speed);
        hasher.update_i32(self.ranged_damage);
        hasher.update_u32(self.jump_counter);
        hasher.update_rect(self.future_position);
        hasher.update_u8(self.vertical as u8);
        hasher.update_bool(self.moving_left);
        hasher.update_bool(self.moving_right);
        hasher.update_bool(self.free_pathing);
        hasher.update_bool(self.attacking_ranged);
    }
}

fn validate_max_health(value: i32) -> Result<(), UnitError> {
    if value <= 0 {
        return Err(UnitError::NonPositiveMaxHealth(value));
    }
    Ok(())
}

fn validate_damage(value: i32) -> Result<(), UnitError> {
    if value < 0 {
        return Err(UnitError::NegativeDamage(value));
    }
    Ok(())
}

impl Collidable for Unit {
    #[inline]
    fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }
}

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Has health and can be hurt.
pub trait Damageable {
    fn health(&self) -> i32;
    fn max_health(&self) -> i32;
    /// Subtract `amount`; the result is clamped into `[0, max_health]`.
    fn take_damage(&mut self, amount: i32);
    /// Add `amount`; the result is clamped into `[0, max_health]`.
    fn heal(&mut self, amount: i32);

    fn is_defeated(&self) -> bool {
        self.health() == 0
    }
}

/// Walks left and right.
pub trait Movable {
    fn move_left(&mut self);
    fn move_right(&mut self);
    /// Clear both movement flags.
    fn stop(&mut self);
    fn is_moving_left(&self) -> bool;
    fn is_moving_right(&self) -> bool;
    fn is_facing_left(&self) -> bool;
}

/// Jumps, possibly more than once in the air.
pub trait Jumper {
    /// Start a jump if fewer than `max_jumps` were used since landing.
    fn try_jump(&mut self, max_jumps: u32) -> bool;
    fn is_jumping(&self) -> bool;
    fn is_falling(&self) -> bool;
}

/// Fires projectiles.
pub trait RangedAttacker {
    fn ranged_damage(&self) -> i32;
    fn is_attacking_ranged(&self) -> bool;
    fn set_attacking_ranged(&mut self, attacking: bool);
}

impl Damageable for Unit {
    #[inline]
    fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn take_damage(&mut self, amount: i32) {
        self.set_health(self.health.saturating_sub(amount));
    }

    fn heal(&mut self, amount: i32) {
        self.set_health(self.health.saturating_add(amount));
    }
}

impl Movable for Unit {
    fn move_left(&mut self) {
        self.moving_left = true;
        self.moving_right = false;
        self.body.facing_left = true;
    }

    fn move_right(&mut self) {
        self.moving_right = true;
        self.moving_left = false;
        self.body.facing_left = false;
    }

    fn stop(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }

    #[inline]
    fn is_moving_left(&self) -> bool {
        self.moving_left
    }

    #[inline]
    fn is_moving_right(&self) -> bool {
        self.moving_right
    }

    #[inline]
    fn is_facing_left(&self) -> bool {
        self.body.facing_left
    }
}

impl Jumper for Unit {
    fn try_jump(&mut self, max_jumps: u32) -> bool {
        if self.jump_counter >= max_jumps {
            return false;
        }
        self.vertical = VerticalState::Jumping;
        self.jump_speed = self.default_jump_speed;
        self.jump_counter += 1;
        true
    }

    #[inline]
    fn is_jumping(&self) -> bool {
        self.vertical == VerticalState::Jumping
    }

    #[inline]
    fn is_falling(&self) -> bool {
        self.vertical == VerticalState::Falling
    }
}

impl RangedAttacker for Unit {
    #[inline]
    fn ranged_damage(&self) -> i32 {
        self.ranged_damage
    }

    #[inline]
    fn is_attacking_ranged(&self) -> bool {
        self.attacking_ranged
    }

    #[inline]
    fn set_attacking_ranged(&mut self, attacking: bool) {
        self.attacking_ranged = attacking;
    }
}
