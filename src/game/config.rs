//! Simulation Configuration
//!
//! Every tuning constant lives here. `SimConfig::default()` reproduces the
//! reference feel; a handful of keys can be overridden from the environment.

use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, from_int, to_fixed};
use crate::game::error::ConfigError;

/// Environment key for gravity (whole units per frame).
pub const ENV_GRAVITY: &str = "PLATFORMER_GRAVITY";
/// Environment key for the consecutive jump limit.
pub const ENV_MAX_JUMPS: &str = "PLATFORMER_MAX_JUMPS";
/// Environment key for beam damage.
pub const ENV_BEAM_DAMAGE: &str = "PLATFORMER_BEAM_DAMAGE";
/// Environment key for frames per second.
pub const ENV_TICK_RATE: &str = "PLATFORMER_TICK_RATE";
/// Environment key for the RNG seed (decimal or `0x` hex).
pub const ENV_SEED: &str = "PLATFORMER_SEED";

/// Base statistics for a unit archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Health cap (must be positive)
    pub max_health: i32,
    /// Default horizontal speed per frame
    pub movement_speed: Fixed,
    /// Default jump impulse
    pub jump_speed: Fixed,
    /// Damage dealt by a standard projectile
    pub ranged_damage: i32,
    /// Bounding box width
    pub width: i32,
    /// Bounding box height
    pub height: i32,
}

impl UnitStats {
    /// The player archetype.
    pub const PLAYER: UnitStats = UnitStats {
        max_health: 30,
        movement_speed: from_int(5),
        jump_speed: from_int(20),
        ranged_damage: 5,
        width: 40,
        height: 60,
    };

    /// The enemy archetype.
    pub const ENEMY: UnitStats = UnitStats {
        max_health: 15,
        movement_speed: from_int(2),
        jump_speed: from_int(15),
        ranged_damage: 2,
        width: 40,
        height: 60,
    };
}

/// Full simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    // =========================================================================
    // Locomotion
    // =========================================================================

    /// Constant fall step per frame
    pub gravity: Fixed,
    /// Jump speed lost per frame while rising
    pub jump_decay: Fixed,
    /// Consecutive jumps allowed before touching ground
    pub max_jumps: u32,
    /// Y a unit is moved to after falling out of the level
    pub wrap_respawn_y: i32,
    /// Inset from the right edge when re-entering from the left
    pub wrap_reentry_inset: i32,

    // =========================================================================
    // Combat
    // =========================================================================

    /// Damage of a beam hit
    pub beam_damage: i32,
    /// Standard projectile width
    pub projectile_width: i32,
    /// Standard projectile height
    pub projectile_height: i32,
    /// Standard projectile horizontal speed per frame
    pub projectile_speed: Fixed,
    /// Frames a freshly fired projectile stays disarmed
    pub projectile_arm_frames: u32,
    /// Beam length in front of the shooter
    pub beam_length: i32,
    /// Beam thickness
    pub beam_height: i32,
    /// Frames a beam stays alive
    pub beam_lifetime_frames: u32,
    /// Frames between player shots
    pub player_fire_cooldown: u32,
    /// Frames between player beams
    pub player_beam_cooldown: u32,
    /// Frames between enemy shots
    pub enemy_fire_cooldown: u32,

    // =========================================================================
    // Enemy behaviour
    // =========================================================================

    /// Horizontal distance at which an enemy notices the player
    pub enemy_sight_range: i32,
    /// Percent chance per grounded frame that an enemy jumps
    pub enemy_jump_chance: u32,

    // =========================================================================
    // Items
    // =========================================================================

    /// Item pickup box side
    pub item_size: i32,
    /// Movement speed added by a speed boost
    pub speed_boost: Fixed,
    /// Default jump speed added by a jump boost
    pub jump_boost: Fixed,
    /// Health restored by a health pack
    pub health_pack: i32,
    /// How long a boost lasts, in milliseconds
    pub bonus_duration_ms: u64,

    // =========================================================================
    // Camera
    // =========================================================================

    /// Viewport width
    pub viewport_width: i32,
    /// Viewport height
    pub viewport_height: i32,
    /// Left and top inset of the camera scene bounds
    pub scene_inset: i32,
    /// Width removed from the level to get the scene bounds width
    pub scene_width_trim: i32,

    // =========================================================================
    // Runtime
    // =========================================================================

    /// Frames per second
    pub tick_rate: u32,
    /// Seed for enemy decisions
    pub seed: u64,
    /// Cell side of the static tile index
    pub grid_cell_size: i32,
    /// Player archetype
    pub player: UnitStats,
    /// Enemy archetype
    pub enemy: UnitStats,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: from_int(13),
            jump_decay: from_int(1),
            max_jumps: 2,
            wrap_respawn_y: -70,
            wrap_reentry_inset: 5,

            beam_damage: 3,
            projectile_width: 12,
            projectile_height: 6,
            projectile_speed: from_int(12),
            projectile_arm_frames: 0,
            beam_length: 240,
            beam_height: 8,
            beam_lifetime_frames: 20,
            player_fire_cooldown: 15,
            player_beam_cooldown: 90,
            enemy_fire_cooldown: 90,

            enemy_sight_range: 400,
            enemy_jump_chance: 1,

            item_size: 30,
            speed_boost: to_fixed(3.0),
            jump_boost: to_fixed(6.0),
            health_pack: 10,
            bonus_duration_ms: 5_000,

            viewport_width: 800,
            viewport_height: 480,
            scene_inset: 50,
            scene_width_trim: 200,

            tick_rate: 60,
            seed: 0x5EED,
            grid_cell_size: 128,
            player: UnitStats::PLAYER,
            enemy: UnitStats::ENEMY,
        }
    }
}

impl SimConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides pulled from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_GRAVITY) {
            let units = parse_ranged(ENV_GRAVITY, &raw, 1, 1_000)?;
            config.gravity = from_int(units as i32);
        }
        if let Some(raw) = lookup(ENV_MAX_JUMPS) {
            config.max_jumps = parse_ranged(ENV_MAX_JUMPS, &raw, 0, 16)? as u32;
        }
        if let Some(raw) = lookup(ENV_BEAM_DAMAGE) {
            config.beam_damage = parse_ranged(ENV_BEAM_DAMAGE, &raw, 0, 10_000)? as i32;
        }
        if let Some(raw) = lookup(ENV_TICK_RATE) {
            config.tick_rate = parse_ranged(ENV_TICK_RATE, &raw, 1, 1_000)? as u32;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = parse_seed(&raw)?;
        }

        Ok(config)
    }

    /// Wall-clock length of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// How long a timed bonus runs.
    pub fn bonus_duration(&self) -> Duration {
        Duration::from_millis(self.bonus_duration_ms)
    }
}

fn parse_ranged(key: &'static str, raw: &str, min: i64, max: i64) -> Result<i64, ConfigError> {
    let value: i64 = raw.trim().parse().map_err(|_| ConfigError::Parse {
        key,
        value: raw.to_string(),
    })?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { key, value });
    }
    Ok(value)
}

fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| ConfigError::Parse {
        key: ENV_SEED,
        value: raw.to_string(),
    })
}
