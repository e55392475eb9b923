//! Unit Controllers
//!
//! Strategy objects that turn intent into unit flags: the player follows
//! the input snapshot, enemies patrol, hop and shoot on sight. Neither
//! moves a unit directly; locomotion does that afterwards.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::core::rng::DeterministicRng;
use crate::game::config::SimConfig;
use crate::game::input::InputSnapshot;
use crate::game::projectile::ProjectileKind;
use crate::game::unit::{Jumper, Movable, RangedAttacker, Unit};

// =============================================================================
// PLAYER
// =============================================================================

/// Maps input to the player unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerController {
    fire_cooldown: u32,
    beam_cooldown: u32,
}

impl PlayerController {
    /// Apply this frame's input. Returns a fire request, if any.
    ///
    /// Jumping triggers on the press, not while held.
    pub fn update(
        &mut self,
        unit: &mut Unit,
        input: &InputSnapshot,
        previous: &InputSnapshot,
        config: &SimConfig,
    ) -> Option<ProjectileKind> {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.beam_cooldown = self.beam_cooldown.saturating_sub(1);

        if input.held(InputSnapshot::LEFT) {
            unit.move_left();
        } else if input.held(InputSnapshot::RIGHT) {
            unit.move_right();
        } else {
            unit.stop();
        }

        if input.pressed_since(previous, InputSnapshot::JUMP) {
            unit.try_jump(config.max_jumps);
        }

        let request = if input.held(InputSnapshot::BEAM) && self.beam_cooldown == 0 {
            self.beam_cooldown = config.player_beam_cooldown;
            Some(ProjectileKind::Beam)
        } else if input.held(InputSnapshot::ATTACK) && self.fire_cooldown == 0 {
            self.fire_cooldown = config.player_fire_cooldown;
            Some(ProjectileKind::Standard)
        } else {
            None
        };

        unit.set_attacking_ranged(request.is_some());
        request
    }
}

// =============================================================================
// ENEMY
// =============================================================================

/// Patrol-and-shoot behaviour for one enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyController {
    heading_left: bool,
    fire_cooldown: u32,
}

impl EnemyController {
    /// Decide this frame's movement and whether to shoot at the player.
    pub fn update(
        &mut self,
        unit: &mut Unit,
        player: Option<Rect>,
        rng: &mut DeterministicRng,
        config: &SimConfig,
    ) -> Option<ProjectileKind> {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        // Locomotion clears the flag when the way is blocked: turn around
        if !unit.is_moving_left() && !unit.is_moving_right() {
            self.heading_left = !self.heading_left;
        }
        if self.heading_left {
            unit.move_left();
        } else {
            unit.move_right();
        }

        if unit.is_grounded() && rng.chance(config.enemy_jump_chance) {
            unit.try_jump(1);
        }

        let request = player.and_then(|target| {
            let own = unit.body.bounding_box();
            let dx = target.center().0 - own.center().0;
            if dx.abs() > config.enemy_sight_range || !own.overlaps_vertically(&target) {
                return None;
            }
            unit.body.facing_left = dx < 0;
            if self.fire_cooldown > 0 {
                return None;
            }
            self.fire_cooldown = config.enemy_fire_cooldown;
            Some(ProjectileKind::Standard)
        });

        unit.set_attacking_ranged(request.is_some());
        request
    }

    pub fn heading_left(&self) -> bool {
        self.heading_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::FixedVec2;
    use crate::game::config::UnitStats;
    use crate::game::unit::{Faction, UnitId, VerticalState};

    fn unit(faction: Faction) -> Unit {
        let stats = UnitStats { width: 10, height: 10, ..UnitStats::PLAYER };
        Unit::new(UnitId(1), faction, FixedVec2::from_ints(100, 100), &stats).unwrap()
    }

    #[test]
    fn test_player_movement_from_input() {
        let config = SimConfig::default();
        let mut player = unit(Faction::Player);
        let mut controller = PlayerController::default();
        let idle = InputSnapshot::IDLE;

        controller.update(&mut player, &InputSnapshot::with(InputSnapshot::LEFT), &idle, &config);
        assert!(player.is_moving_left());

        controller.update(&mut player, &InputSnapshot::with(InputSnapshot::RIGHT), &idle, &config);
        assert!(player.is_moving_right() && !player.is_moving_left());

        controller.update(&mut player, &idle, &idle, &config);
        assert!(!player.is_moving_left() && !player.is_moving_right());
    }

    #[test]
    fn test_player_jump_on_press_only() {
        let config = SimConfig::default();
        let mut player = unit(Faction::Player);
        let mut controller = PlayerController::default();
        let jump = InputSnapshot::with(InputSnapshot::JUMP);

        controller.update(&mut player, &jump, &InputSnapshot::IDLE, &config);
        assert!(player.is_jumping());
        assert_eq!(player.jump_counter(), 1);

        // Held: no second jump
        controller.update(&mut player, &jump, &jump, &config);
        assert_eq!(player.jump_counter(), 1);

        // Released and pressed again: double jump
        controller.update(&mut player, &jump, &InputSnapshot::IDLE, &config);
        assert_eq!(player.jump_counter(), 2);

        // Budget spent
        controller.update(&mut player, &jump, &InputSnapshot::IDLE, &config);
        assert_eq!(player.jump_counter(), 2);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let config = SimConfig { player_fire_cooldown: 3, ..SimConfig::default() };
        let mut player = unit(Faction::Player);
        let mut controller = PlayerController::default();
        let attack = InputSnapshot::with(InputSnapshot::ATTACK);

        let shots: Vec<_> = (0..7)
            .map(|_| controller.update(&mut player, &attack, &attack, &config))
            .collect();
        assert_eq!(shots.iter().filter(|s| s.is_some()).count(), 3);
        assert_eq!(shots[0], Some(ProjectileKind::Standard));
        assert_eq!(shots[1], None);
        assert_eq!(shots[3], Some(ProjectileKind::Standard));
    }

    #[test]
    fn test_player_beam() {
        let config = SimConfig::default();
        let mut player = unit(Faction::Player);
        let mut controller = PlayerController::default();
        let beam = InputSnapshot::with(InputSnapshot::BEAM | InputSnapshot::ATTACK);

        assert_eq!(
            controller.update(&mut player, &beam, &InputSnapshot::IDLE, &config),
            Some(ProjectileKind::Beam)
        );
        assert!(player.is_attacking_ranged());
        // Beam cooling down: falls back to a standard shot
        assert_eq!(
            controller.update(&mut player, &beam, &beam, &config),
            Some(ProjectileKind::Standard)
        );
    }

    #[test]
    fn test_enemy_reverses_when_stopped() {
        let config = SimConfig { enemy_jump_chance: 0, ..SimConfig::default() };
        let mut rng = DeterministicRng::new(1);
        let mut enemy = unit(Faction::Enemy);
        let mut brain = EnemyController::default();

        brain.update(&mut enemy, None, &mut rng, &config);
        assert!(enemy.is_moving_left());

        brain.update(&mut enemy, None, &mut rng, &config);
        assert!(enemy.is_moving_left());

        // Locomotion blocked the move
        enemy.stop();
        brain.update(&mut enemy, None, &mut rng, &config);
        assert!(enemy.is_moving_right());
        assert!(!brain.heading_left());
    }

    #[test]
    fn test_enemy_always_jumps_at_full_chance() {
        let config = SimConfig { enemy_jump_chance: 100, ..SimConfig::default() };
        let mut rng = DeterministicRng::new(1);
        let mut enemy = unit(Faction::Enemy);
        let mut brain = EnemyController::default();

        brain.update(&mut enemy, None, &mut rng, &config);
        assert_eq!(enemy.vertical_state(), VerticalState::Jumping);
    }

    #[test]
    fn test_enemy_fires_on_sight() {
        let config = SimConfig {
            enemy_jump_chance: 0,
            enemy_sight_range: 100,
            enemy_fire_cooldown: 10,
            ..SimConfig::default()
        };
        let mut rng = DeterministicRng::new(1);
        let mut enemy = unit(Faction::Enemy);
        let mut brain = EnemyController::default();

        // Out of range
        assert_eq!(brain.update(&mut enemy, Some(Rect::new(300, 100, 10, 10)), &mut rng, &config), None);
        // Different height band
        assert_eq!(brain.update(&mut enemy, Some(Rect::new(150, 0, 10, 10)), &mut rng, &config), None);

        // In sight to the right, while patrolling left
        let shot = brain.update(&mut enemy, Some(Rect::new(150, 105, 10, 10)), &mut rng, &config);
        assert_eq!(shot, Some(ProjectileKind::Standard));
        assert!(!enemy.body.facing_left);

        // Cooling down
        assert_eq!(brain.update(&mut enemy, Some(Rect::new(150, 105, 10, 10)), &mut rng, &config), None);
    }
}
