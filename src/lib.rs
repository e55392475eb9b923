//! # Platformer Core
//!
//! Deterministic simulation core for a 2D side-scrolling platformer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PLATFORMER CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point arithmetic             │
//! │  ├── vec2.rs     - 2D vector with fixed-point                │
//! │  ├── rect.rs     - Integer axis-aligned rectangles           │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Simulation (deterministic)                │
//! │  ├── level.rs    - Tiles, spatial index, level sources       │
//! │  ├── collision.rs- Collision predicates                      │
//! │  ├── unit.rs     - Units and capability traits               │
//! │  ├── locomotion.rs - Jump/fall/walk state machine            │
//! │  ├── combat.rs   - Projectile-vs-unit resolution             │
//! │  ├── world.rs    - Entity registry                           │
//! │  ├── frame.rs    - Frame orchestrator and replay             │
//! │  └── render.rs   - Ordered draw pass                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The simulation is single-threaded and fixed-step:
//! - Positions and speeds are Q16.16 fixed-point
//! - Collections iterate in spawn order
//! - No system time dependencies inside a frame
//! - All randomness from a seeded Xorshift128+
//!
//! Given identical inputs, level and seed, two runs produce identical
//! state hashes.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use core::vec2::FixedVec2;
pub use core::rect::Rect;
pub use core::rng::DeterministicRng;
pub use game::{SimConfig, World, step_frame};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
