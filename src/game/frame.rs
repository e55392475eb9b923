//! Frame Orchestrator
//!
//! One fixed-step frame over an explicit [`World`]. Phases run in a fixed
//! order and each one sees the results of the previous:
//!
//! ```text
//! (a) exit / debug toggle / game-over check
//! (b) controllers + locomotion for the player, then every enemy
//! (c) projectile update, projectile-vs-unit resolution, casualties
//! (d) timed bonus countdowns
//! (e) item pickups
//! (f) camera follow
//! (g) purge inactive entities
//! ```
//!
//! Drawing happens outside the frame, after it returns.

use tracing::{debug, warn};

use crate::game::combat::{resolve_projectiles, sweep_casualties};
use crate::game::collision::collides_between;
use crate::game::config::SimConfig;
use crate::game::error::WorldError;
use crate::game::events::GameEvent;
use crate::game::input::InputSnapshot;
use crate::game::item::{PickupEffect, apply_pickup};
use crate::game::level::LoadedLevel;
use crate::game::locomotion::manage_movement;
use crate::game::projectile::ProjectileKind;
use crate::game::unit::{Unit, UnitId};
use crate::game::world::{PLAYER_ID, World, WorldPhase};

/// How a frame ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Gameplay continues
    Continue,
    /// The player was defeated during this frame
    PlayerDefeated,
    /// Already game over; nothing was simulated
    GameOver,
    /// Exit input was seen; nothing was simulated
    ExitRequested,
}

/// Result of a frame.
#[derive(Debug)]
pub struct FrameResult {
    /// Events generated this frame, in phase order
    pub events: Vec<GameEvent>,
    /// How the frame ended
    pub outcome: FrameOutcome,
}

impl FrameResult {
    fn quiet(outcome: FrameOutcome) -> Self {
        Self { events: Vec::new(), outcome }
    }
}

/// Run one frame.
///
/// # Determinism
///
/// Given the same world and the same input snapshot the resulting world
/// hash is identical: positions are fixed-point, collections iterate in
/// spawn order and enemy decisions draw from the world's seeded RNG.
pub fn step_frame(world: &mut World, input: InputSnapshot) -> FrameResult {
    // (a) Input checks
    if input.exit_requested() {
        world.last_input = input;
        return FrameResult::quiet(FrameOutcome::ExitRequested);
    }
    if input.pressed_since(&world.last_input, InputSnapshot::DEBUG) {
        world.debug_overlay = !world.debug_overlay;
    }
    if world.phase == WorldPhase::GameOver {
        world.last_input = input;
        return FrameResult::quiet(FrameOutcome::GameOver);
    }

    world.frame += 1;

    // (b) Units
    update_units(world, &input);

    // (c) Projectiles and combat
    let player_defeated = update_projectiles(world);

    if !player_defeated {
        // (d) Timed bonuses
        update_bonuses(world);

        // (e) Items
        update_items(world);
    }

    // (f) Camera
    world.camera.chase(world.player.body.bounding_box());

    // (g) Cleanup
    world.clean_inactive();

    world.last_input = input;

    FrameResult {
        events: world.take_events(),
        outcome: if player_defeated {
            FrameOutcome::PlayerDefeated
        } else {
            FrameOutcome::Continue
        },
    }
}

/// Controllers decide, locomotion moves. Shots are spawned after every
/// unit has moved so a projectile never sees a half-updated frame.
fn update_units(world: &mut World, input: &InputSnapshot) {
    let frame = world.frame;
    let mut shots: Vec<(UnitId, ProjectileKind)> = Vec::new();

    if let Some(kind) = world.player_controller.update(
        &mut world.player,
        input,
        &world.last_input,
        &world.config,
    ) {
        shots.push((PLAYER_ID, kind));
    }
    let report = manage_movement(&mut world.player, &world.level, &world.config);
    if report.wrapped {
        let event = GameEvent::unit_wrapped(frame, PLAYER_ID, world.player.body.position);
        world.pending_events.push(event);
    }

    let target = world.player.is_active().then(|| world.player.body.bounding_box());

    for enemy in world.enemies.iter_mut() {
        if !enemy.unit.is_active() {
            continue;
        }
        if let Some(kind) = enemy.brain.update(&mut enemy.unit, target, &mut world.rng, &world.config) {
            shots.push((enemy.unit.id(), kind));
        }
        let report = manage_movement(&mut enemy.unit, &world.level, &world.config);
        if report.wrapped {
            let event = GameEvent::unit_wrapped(frame, enemy.unit.id(), enemy.unit.body.position);
            world.pending_events.push(event);
        }
    }

    for (shooter, kind) in shots {
        world.fire(kind, shooter);
    }
}

/// Returns true if the player went down this frame.
fn update_projectiles(world: &mut World) -> bool {
    let frame = world.frame;

    for projectile in world.projectiles.iter_mut() {
        projectile.update(&world.level);
    }

    let mut units: Vec<&mut Unit> = std::iter::once(&mut world.player)
        .chain(world.enemies.iter_mut().map(|e| &mut e.unit))
        .collect();
    resolve_projectiles(
        &mut world.projectiles,
        &mut units,
        &world.config,
        frame,
        &mut world.pending_events,
    );
    drop(units);

    let player_down = sweep_casualties(
        &world.player,
        world.enemies.iter_mut().map(|e| &mut e.unit),
        frame,
        &mut world.pending_events,
    );

    if player_down {
        world.phase = WorldPhase::GameOver;
        debug!(frame, "player defeated");
        world.push_event(GameEvent::player_defeated(frame, PLAYER_ID));
    }
    player_down
}

fn update_bonuses(world: &mut World) {
    let frame = world.frame;
    let elapsed = world.config.frame_duration();

    for bonus in world.timed_bonuses.iter_mut() {
        let was_timed_out = bonus.is_timed_out;
        if !bonus.update(elapsed) || was_timed_out {
            continue;
        }
        if let Err(e) = bonus.revert(&mut world.player) {
            warn!(?e, kind = ?bonus.kind, "failed to revert bonus");
        }
        debug!(frame, kind = ?bonus.kind, "bonus expired");
        world.pending_events.push(GameEvent::bonus_expired(frame, bonus.kind));
    }
}

fn update_items(world: &mut World) {
    let frame = world.frame;

    for item in world.items.iter_mut() {
        if !item.is_active() || !collides_between(&*item, &world.player) {
            continue;
        }
        match apply_pickup(item.kind, &mut world.player, &mut world.timed_bonuses, &world.config) {
            Ok(effect) => {
                item.body.deactivate();
                if let PickupEffect::BonusRefreshed(kind) = effect {
                    debug!(frame, ?kind, "bonus refreshed");
                }
                world.pending_events.push(GameEvent::item_collected(frame, item.id, item.kind));
            }
            Err(e) => warn!(?e, item = item.id, "pickup rejected"),
        }
    }
}

/// Replay a recorded input sequence on a freshly loaded level.
///
/// Stops early on exit input or once the game is over.
pub fn replay(
    loaded: LoadedLevel,
    config: SimConfig,
    inputs: &[InputSnapshot],
) -> Result<(World, Vec<GameEvent>), WorldError> {
    let mut world = World::new(loaded, config)?;
    let mut all_events = Vec::new();

    for input in inputs {
        let result = step_frame(&mut world, *input);
        all_events.extend(result.events);

        if matches!(result.outcome, FrameOutcome::ExitRequested | FrameOutcome::GameOver) {
            break;
        }
    }

    Ok((world, all_events))
}
