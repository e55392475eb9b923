//! Unit Locomotion
//!
//! Per-frame movement state machine shared by the player and enemies.
//!
//! ```text
//!            try_jump                jump speed hits 0
//!  Grounded ─────────► Jumping ───────────────────────► Falling
//!     ▲                                                    │
//!     └────────────── lower box blocked, current clear ────┘
//!     │                                                    ▲
//!     └────────────── nothing below ───────────────────────┘
//! ```
//!
//! Free pathing is a flag on top of Falling: a unit whose jump ended inside
//! geometry falls straight through until its box is clear of every tile.
//! Horizontal movement is evaluated after the vertical step, then the world
//! wrap is applied.

use crate::core::fixed::{Fixed, from_int};
use crate::game::collision::{
    collides_with_any_tile,
    collides_with_non_platform,
    collides_with_wall,
    collides_with_world_bounds,
};
use crate::game::config::SimConfig;
use crate::game::level::Level;
use crate::game::unit::{Unit, VerticalState};

#[cfg(feature = "debug-tracing")]
use tracing::trace;

/// What happened to a unit during one movement step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementReport {
    /// Upward move was blocked by solid geometry
    pub jump_blocked: bool,
    /// Jump finished and the unit started falling
    pub jump_ended: bool,
    /// Free pathing was granted at the end of the jump
    pub free_pathing_granted: bool,
    /// Unit touched ground this frame
    pub landed: bool,
    /// Horizontal movement was refused and the flag cleared
    pub horizontal_blocked: bool,
    /// Unit left the level and reappeared elsewhere
    pub wrapped: bool,
}

/// Advance one unit by one frame.
pub fn manage_movement(unit: &mut Unit, level: &Level, config: &SimConfig) -> MovementReport {
    let mut report = MovementReport::default();

    // 1. Vertical
    match unit.vertical {
        VerticalState::Jumping => rise(unit, level, config, &mut report),
        VerticalState::Falling if unit.free_pathing => {
            if !collides_with_any_tile(level, unit.body.bounding_box()) {
                unit.free_pathing = false;
            } else {
                apply_gravity(unit, config);
            }
        }
        VerticalState::Falling => {
            if !lower_position_valid(unit, level, config) {
                if !collides_with_any_tile(level, unit.body.bounding_box()) {
                    land(unit);
                    report.landed = true;
                } else {
                    // Entered geometry from the side; keep falling so it never sticks
                    apply_gravity(unit, config);
                }
            } else {
                apply_gravity(unit, config);
            }
        }
        VerticalState::Grounded => {
            if lower_position_valid(unit, level, config) {
                unit.vertical = VerticalState::Falling;
            }
        }
    }

    // 2. Horizontal (left wins over right)
    if unit.moving_left {
        if !step_horizontal(unit, level, -unit.movement_speed()) {
            unit.moving_left = false;
            report.horizontal_blocked = true;
        }
    } else if unit.moving_right && !step_horizontal(unit, level, unit.movement_speed()) {
        unit.moving_right = false;
        report.horizontal_blocked = true;
    }

    // 3. World wrap
    if collides_with_world_bounds(level.bounds(), &unit.body) {
        return_from_opposite_side(unit, level, config);
        report.wrapped = true;
    }

    #[cfg(feature = "debug-tracing")]
    trace!(
        unit = unit.id().0,
        state = ?unit.vertical,
        free_pathing = unit.free_pathing,
        position = %unit.body.position,
        "movement step"
    );

    report
}

/// Jumping branch: rise while the space above is clear of solid tiles.
fn rise(unit: &mut Unit, level: &Level, config: &SimConfig, report: &mut MovementReport) {
    let speed = unit.jump_speed();
    let upper = unit.body.box_offset(0, -speed);
    unit.future_position = upper;

    let remaining = if !collides_with_non_platform(level, upper) {
        unit.body.translate(0, -speed);
        (speed - config.jump_decay).max(0)
    } else {
        report.jump_blocked = true;
        0
    };
    unit.set_remaining_jump(remaining);

    if remaining == 0 {
        if collides_with_any_tile(level, unit.body.bounding_box()) {
            unit.free_pathing = true;
            report.free_pathing_granted = true;
        }
        unit.vertical = VerticalState::Falling;
        report.jump_ended = true;
    }
}

/// True when the box one gravity step down touches no tile.
fn lower_position_valid(unit: &mut Unit, level: &Level, config: &SimConfig) -> bool {
    let lower = unit.body.box_offset(0, config.gravity);
    unit.future_position = lower;
    !collides_with_any_tile(level, lower)
}

#[inline]
fn apply_gravity(unit: &mut Unit, config: &SimConfig) {
    unit.body.translate(0, config.gravity);
}

fn land(unit: &mut Unit) {
    unit.vertical = VerticalState::Grounded;
    unit.free_pathing = false;
    unit.jump_counter = 0;
}

/// Try to move by `dx`. Returns false when the move is refused.
fn step_horizontal(unit: &mut Unit, level: &Level, dx: Fixed) -> bool {
    let ahead = unit.body.box_offset(dx, 0);
    unit.future_position = ahead;

    let embedded = unit.free_pathing || collides_with_any_tile(level, unit.body.bounding_box());
    let allowed = (embedded && !collides_with_wall(level, ahead))
        || !collides_with_any_tile(level, ahead);

    if allowed {
        unit.body.translate(dx, 0);
    }
    allowed
}

/// Right edge → just off the left, left edge → just inside the right,
/// bottom → fixed point above the top.
fn return_from_opposite_side(unit: &mut Unit, level: &Level, config: &SimConfig) {
    let bounds = level.bounds();
    let bx = unit.body.bounding_box();

    if bx.x > bounds.width {
        unit.body.set_x(from_int(-bx.width));
    }
    if bx.x < -bx.width {
        unit.body.set_x(from_int(bounds.width - config.wrap_reentry_inset));
    }
    if bx.y > bounds.height {
        unit.body.set_y(from_int(config.wrap_respawn_y));
    }
}
