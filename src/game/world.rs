//! World Registry
//!
//! The explicit context object every frame phase works on. Created when a
//! level is loaded and dropped at teardown; there is no global registry.
//! All collections keep spawn order, which is also resolution order.

use tracing::debug;

use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rect::Rect;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::camera::Camera;
use crate::game::config::{SimConfig, UnitStats};
use crate::game::controller::{EnemyController, PlayerController};
use crate::game::error::{UnitError, WorldError};
use crate::game::events::GameEvent;
use crate::game::input::InputSnapshot;
use crate::game::item::{Item, TimedBonus};
use crate::game::level::{Level, LevelSource, LoadedLevel};
use crate::game::projectile::{Projectile, ProjectileKind};
use crate::game::unit::{Faction, Unit, UnitId};

/// The player's unit id. Enemies are numbered from 1 in layout order.
pub const PLAYER_ID: UnitId = UnitId(0);

// =============================================================================
// ENEMY
// =============================================================================

/// An enemy unit and the controller driving it.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub unit: Unit,
    pub brain: EnemyController,
}

// =============================================================================
// WORLD PHASE
// =============================================================================

/// Whether gameplay is still running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorldPhase {
    /// Live gameplay
    #[default]
    Running,
    /// Player defeated; only exit input is handled
    GameOver,
}

// =============================================================================
// WORLD
// =============================================================================

/// Every live collection of a loaded level.
#[derive(Clone, Debug)]
pub struct World {
    /// Tuning constants
    pub config: SimConfig,

    /// Static geometry
    pub level: Level,

    /// Frames simulated so far
    pub frame: u64,

    /// Current phase
    pub phase: WorldPhase,

    /// The player unit
    pub player: Unit,

    /// Input-driven player behaviour
    pub player_controller: PlayerController,

    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,

    /// Projectiles in firing order
    pub projectiles: Vec<Projectile>,

    /// Items in layout order
    pub items: Vec<Item>,

    /// Running stat bonuses
    pub timed_bonuses: Vec<TimedBonus>,

    /// Enemy decision RNG
    pub rng: DeterministicRng,

    /// Next projectile ID (monotonic counter)
    pub next_projectile_id: u32,

    /// Debug overlay toggled on
    pub debug_overlay: bool,

    /// Previous frame's input, for edge detection
    pub last_input: InputSnapshot,

    /// Follow camera
    pub camera: Camera,

    /// Events generated this frame (drained by the frame loop)
    pub pending_events: Vec<GameEvent>,
}

impl World {
    /// Populate a world from a parsed level.
    pub fn new(loaded: LoadedLevel, config: SimConfig) -> Result<Self, WorldError> {
        let LoadedLevel { level, spawns } = loaded;

        let player = spawn_unit(PLAYER_ID, Faction::Player, spawns.player, &config.player)?;

        let enemies = spawns
            .enemies
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let unit = spawn_unit(UnitId(i as u32 + 1), Faction::Enemy, *cell, &config.enemy)?;
                Ok(Enemy { unit, brain: EnemyController::default() })
            })
            .collect::<Result<Vec<_>, UnitError>>()?;

        let items = spawns
            .items
            .iter()
            .enumerate()
            .map(|(i, (kind, cell))| Item::in_cell(i as u32, *kind, *cell, config.item_size))
            .collect();

        let mut camera = Camera::new(level.bounds(), &config);
        camera.chase(player.body.bounding_box());

        debug!(
            level = level.name(),
            enemies = spawns.enemies.len(),
            items = spawns.items.len(),
            "world created"
        );

        Ok(Self {
            rng: DeterministicRng::new(config.seed),
            config,
            level,
            frame: 0,
            phase: WorldPhase::Running,
            player,
            player_controller: PlayerController::default(),
            enemies,
            projectiles: Vec::new(),
            items,
            timed_bonuses: Vec::new(),
            next_projectile_id: 0,
            debug_overlay: false,
            last_input: InputSnapshot::IDLE,
            camera,
            pending_events: Vec::new(),
        })
    }

    /// Load `name` from `source` and populate a world from it.
    pub fn from_source(source: &dyn LevelSource, name: &str, config: SimConfig) -> Result<Self, WorldError> {
        let loaded = source.load(name)?.parse(config.grid_cell_size)?;
        Self::new(loaded, config)
    }

    /// Look up a live or dead unit by ID.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        if id == PLAYER_ID {
            return Some(&self.player);
        }
        self.enemies.iter().map(|e| &e.unit).find(|u| u.id() == id)
    }

    /// Live enemy count.
    pub fn enemies_remaining(&self) -> usize {
        self.enemies.iter().filter(|e| e.unit.is_active()).count()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == WorldPhase::GameOver
    }

    /// Spawn a projectile from `shooter`. Returns its ID, or None if the
    /// shooter is unknown or inactive.
    pub fn fire(&mut self, kind: ProjectileKind, shooter: UnitId) -> Option<u32> {
        let id = self.next_projectile_id;
        let projectile = {
            let unit = self.unit(shooter).filter(|u| u.is_active())?;
            Projectile::fire(id, kind, unit, &self.config)
        };
        self.next_projectile_id += 1;
        self.projectiles.push(projectile);
        self.push_event(GameEvent::projectile_fired(self.frame, id, shooter, kind));
        Some(id)
    }

    /// Purge inactive enemies, projectiles, items and timed-out bonuses.
    ///
    /// Returns the number of entries removed.
    pub fn clean_inactive(&mut self) -> usize {
        let before = self.enemies.len() + self.projectiles.len() + self.items.len() + self.timed_bonuses.len();

        self.enemies.retain(|e| e.unit.is_active());
        self.projectiles.retain(|p| p.is_active());
        self.items.retain(|i| i.is_active());
        self.timed_bonuses.retain(|b| !b.is_timed_out);

        let after = self.enemies.len() + self.projectiles.len() + self.items.len() + self.timed_bonuses.len();
        let purged = before - after;
        if purged > 0 {
            debug!(frame = self.frame, purged, "inactive entities purged");
        }
        purged
    }

    /// Compute hash of current state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.config.seed, |hasher| {
            hasher.update_u8(self.phase as u8);
            self.player.hash_into(hasher);

            for enemy in &self.enemies {
                enemy.unit.hash_into(hasher);
                hasher.update_bool(enemy.brain.heading_left());
            }

            for projectile in &self.projectiles {
                projectile.hash_into(hasher);
            }

            for item in &self.items {
                item.hash_into(hasher);
            }

            for bonus in &self.timed_bonuses {
                bonus.hash_into(hasher);
            }

            let [s0, s1] = self.rng.state();
            hasher.update_u64(s0);
            hasher.update_u64(s1);
            hasher.update_u32(self.next_projectile_id);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

/// Stand a unit on the floor of its spawn cell, centred horizontally.
fn spawn_unit(id: UnitId, faction: Faction, cell: Rect, stats: &UnitStats) -> Result<Unit, UnitError> {
    let x = cell.x + (cell.width - stats.width) / 2;
    let y = cell.bottom() - stats.height;
    Unit::new(id, faction, FixedVec2::from_ints(x, y), stats)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::{BuiltinLevels, LevelLayout};

    fn layout() -> LevelLayout {
        LevelLayout {
            name: "arena".to_string(),
            tile_size: 40,
            rows: vec![
                "..........".to_string(),
                ".P...E..E.".to_string(),
                "..S....H..".to_string(),
                "##########".to_string(),
            ],
        }
    }

    fn world() -> World {
        World::new(layout().parse(128).unwrap(), SimConfig::default()).unwrap()
    }

    #[test]
    fn test_far_spawn_keeps_position() {
        let mut row = ".".repeat(800);
        row.replace_range(790..791, "P");
        let far = LevelLayout { name: "far".to_string(), tile_size: 40, rows: vec![row] };
        let world = World::new(far.parse(128).unwrap(), SimConfig::default()).unwrap();
        assert_eq!(world.player.body.bounding_box(), Rect::new(31600, -20, 40, 60));
    }

    #[test]
    fn test_spawn_positions() {
        let world = world();
        // 40x60 player in the 40x40 cell at (40, 40): bottom on y = 80
        assert_eq!(world.player.body.bounding_box(), Rect::new(40, 20, 40, 60));
        assert_eq!(world.player.id(), PLAYER_ID);

        let ids: Vec<_> = world.enemies.iter().map(|e| e.unit.id()).collect();
        assert_eq!(ids, vec![UnitId(1), UnitId(2)]);
        assert_eq!(world.enemies[0].unit.faction(), Faction::Enemy);
        assert_eq!(world.items.len(), 2);
        assert_eq!(world.items[1].id, 1);
    }

    #[test]
    fn test_invalid_stats_rejected() {
        let mut config = SimConfig::default();
        config.enemy.max_health = 0;
        let err = World::new(layout().parse(128).unwrap(), config).unwrap_err();
        assert!(matches!(err, WorldError::Unit(UnitError::NonPositiveMaxHealth(0))));
    }

    #[test]
    fn test_from_source() {
        let world = World::from_source(&BuiltinLevels::default(), "demo", SimConfig::default()).unwrap();
        assert_eq!(world.level.name(), "demo");
        assert_eq!(world.enemies.len(), 3);

        let err = World::from_source(&BuiltinLevels::default(), "missing", SimConfig::default()).unwrap_err();
        assert!(matches!(err, WorldError::Level(_)));
    }

    #[test]
    fn test_fire_assigns_monotonic_ids() {
        let mut world = world();
        assert_eq!(world.fire(ProjectileKind::Standard, PLAYER_ID), Some(0));
        assert_eq!(world.fire(ProjectileKind::Beam, UnitId(2)), Some(1));
        assert_eq!(world.fire(ProjectileKind::Standard, UnitId(99)), None);

        assert_eq!(world.projectiles.len(), 2);
        assert_eq!(world.projectiles[1].owner_faction, Faction::Enemy);
        assert_eq!(world.take_events().len(), 2);
        assert!(world.take_events().is_empty());
    }

    #[test]
    fn test_clean_inactive() {
        let mut world = world();
        world.fire(ProjectileKind::Standard, PLAYER_ID);
        world.fire(ProjectileKind::Standard, PLAYER_ID);
        world.projectiles[0].nullify();
        world.enemies[1].unit.body.deactivate();
        world.items[0].body.deactivate();

        assert_eq!(world.clean_inactive(), 3);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].id, 1);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies_remaining(), 1);
        assert_eq!(world.items.len(), 1);
        assert_eq!(world.clean_inactive(), 0);
    }

    #[test]
    fn test_hash_determinism() {
        let a = world();
        let mut b = world();
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.player.body.translate(1, 0);
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_unit_lookup() {
        let world = world();
        assert_eq!(world.unit(PLAYER_ID).map(|u| u.faction()), Some(Faction::Player));
        assert_eq!(world.unit(UnitId(2)).map(|u| u.id()), Some(UnitId(2)));
        assert!(world.unit(UnitId(3)).is_none());
    }
}
