//! Game Logic Module
//!
//! All platformer simulation code. Deterministic for a given seed and
//! input sequence.
//!
//! ## Module Structure
//!
//! - `config`: Tuning constants and environment overrides
//! - `error`: Rejected mutations and level loading failures
//! - `level`: Tiles, spatial index, layouts and level sources
//! - `collision`: Stateless collision predicates
//! - `body`: Position, size, facing and liveness shared by entities
//! - `unit`: Units and their capability traits
//! - `locomotion`: Per-frame jump/fall/walk state machine and world wrap
//! - `projectile`: Standard shots and beams
//! - `timer` / `item`: Pickups and timed bonuses
//! - `controller`: Player input mapping and enemy behaviour
//! - `combat`: Projectile-vs-unit resolution
//! - `world`: Registry of every live collection
//! - `frame`: Frame orchestrator and replay
//! - `camera` / `render`: Viewport follow and ordered draw pass
//! - `input` / `events`: Per-frame input snapshots and event log

pub mod config;
pub mod error;
pub mod level;
pub mod collision;
pub mod body;
pub mod unit;
pub mod locomotion;
pub mod projectile;
pub mod timer;
pub mod item;
pub mod controller;
pub mod combat;
pub mod world;
pub mod camera;
pub mod input;
pub mod events;
pub mod frame;
pub mod render;

// Re-export key types
pub use config::{SimConfig, UnitStats};
pub use error::{ConfigError, LevelError, UnitError, WorldError};
pub use events::{GameEvent, GameEventData};
pub use frame::{FrameOutcome, FrameResult, step_frame};
pub use input::{InputSnapshot, InputSource, ScriptedInput};
pub use level::{BuiltinLevels, DirectoryLevelSource, Level, LevelLayout, LevelSource};
pub use unit::{Faction, Unit, UnitId};
pub use world::World;
