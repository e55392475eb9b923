//! Platformer Simulation Runner
//!
//! Headless host for the simulation core. Loads a level, drives a scripted
//! input sequence through the frame loop, draws every frame into a command
//! buffer and verifies determinism by replaying the same inputs.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use platformer_core::{
    VERSION,
    game::{
        BuiltinLevels, DirectoryLevelSource, LevelSource, SimConfig, World,
        events::GameEventData,
        frame::{FrameOutcome, replay, step_frame},
        input::{InputSnapshot, InputSource, ScriptedInput},
        render::{CommandBuffer, draw_frame},
        unit::Damageable,
    },
};

/// Directory of `<name>.json` level layouts; built-in levels when unset.
const ENV_LEVEL_DIR: &str = "PLATFORMER_LEVEL_DIR";
/// Level to load.
const ENV_LEVEL: &str = "PLATFORMER_LEVEL";

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = SimConfig::from_env().context("invalid configuration")?;

    info!("Platformer Sim v{}", VERSION);
    info!("Tick Rate: {} Hz", config.tick_rate);
    info!("Seed: {:#x}", config.seed);

    let source: Box<dyn LevelSource> = match std::env::var(ENV_LEVEL_DIR) {
        Ok(dir) => {
            info!("Level directory: {}", dir);
            Box::new(DirectoryLevelSource::new(dir))
        }
        Err(_) => Box::new(BuiltinLevels::default()),
    };
    let level_name = std::env::var(ENV_LEVEL).unwrap_or_else(|_| "demo".to_string());

    run_demo(source.as_ref(), &level_name, config)
}

/// A short run: walk right, double jump, shoot, fire a beam, walk back.
fn demo_script() -> ScriptedInput {
    ScriptedInput::from_segments(&[
        (InputSnapshot::RIGHT, 40),
        (InputSnapshot::RIGHT | InputSnapshot::JUMP, 1),
        (InputSnapshot::RIGHT, 6),
        (InputSnapshot::RIGHT | InputSnapshot::JUMP, 1),
        (InputSnapshot::RIGHT, 40),
        (InputSnapshot::ATTACK, 60),
        (InputSnapshot::DEBUG, 1),
        (InputSnapshot::BEAM, 30),
        (InputSnapshot::LEFT | InputSnapshot::ATTACK, 120),
        (InputSnapshot::NONE, 60),
        (InputSnapshot::EXIT, 1),
    ])
}

fn run_demo(source: &dyn LevelSource, level_name: &str, config: SimConfig) -> Result<()> {
    info!("=== Starting Demo Run ===");

    let layout = source
        .load(level_name)
        .with_context(|| format!("failed to load level {level_name:?}"))?;
    let loaded = layout.parse(config.grid_cell_size).context("invalid level layout")?;
    let mut world = World::new(loaded, config.clone()).context("failed to populate world")?;

    let bounds = world.level.bounds();
    info!(
        "Level {:?}: {}x{}, {} tiles, {} enemies, {} items",
        world.level.name(),
        bounds.width,
        bounds.height,
        world.level.tiles().len(),
        world.enemies.len(),
        world.items.len()
    );

    let mut script = demo_script();
    let mut recorded = Vec::with_capacity(script.len());
    let mut buffer = CommandBuffer::new();
    let mut total_events = 0;

    loop {
        let input = script.poll(recorded.len() as u64);
        recorded.push(input);

        let result = step_frame(&mut world, input);
        total_events += result.events.len();

        buffer.clear();
        draw_frame(&world, &mut buffer);
        debug!(frame = world.frame, draws = buffer.len(), "frame drawn");

        // Log important events
        for event in &result.events {
            match &event.data {
                GameEventData::UnitDefeated { unit, .. } => {
                    info!("Frame {}: enemy {} defeated", event.frame, unit.0);
                }
                GameEventData::ItemCollected { kind, .. } => {
                    info!("Frame {}: collected {:?}", event.frame, kind);
                }
                GameEventData::BonusExpired { kind } => {
                    info!("Frame {}: {:?} bonus expired", event.frame, kind);
                }
                GameEventData::UnitWrapped { unit, position } => {
                    info!("Frame {}: unit {} wrapped to {}", event.frame, unit.0, position);
                }
                _ => {}
            }
        }

        match result.outcome {
            FrameOutcome::Continue => {}
            FrameOutcome::PlayerDefeated => {
                warn!("Player defeated at frame {}", world.frame);
            }
            FrameOutcome::GameOver | FrameOutcome::ExitRequested => break,
        }
    }

    // Print final results
    info!("=== Run Results ===");
    info!("Frames simulated: {}", world.frame);
    info!("Player health: {}/{}", world.player.health(), world.player.max_health());
    info!("Enemies remaining: {}", world.enemies_remaining());
    info!("Total events: {}", total_events);

    let hash = world.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let loaded = source
        .load(level_name)
        .and_then(|layout| layout.parse(config.grid_cell_size))
        .context("failed to reload level")?;
    let (replayed, _) = replay(loaded, config, &recorded).context("replay failed")?;
    let replay_hash = replayed.compute_hash();

    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        anyhow::bail!("determinism failure: hashes differ")
    }
}
