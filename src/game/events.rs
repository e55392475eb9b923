//! Game Events
//!
//! Everything observable that happened during a frame, in the order the
//! frame phases produced it. Used for logging and replay comparison.

use serde::{Serialize, Deserialize};

use crate::core::vec2::FixedVec2;
use crate::game::item::{BonusKind, ItemKind};
use crate::game::projectile::ProjectileKind;
use crate::game::unit::{Faction, UnitId};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A unit fired a projectile
    ProjectileFired {
        projectile_id: u32,
        owner: UnitId,
        kind: ProjectileKind,
    },

    /// A projectile hit a unit of the other faction
    UnitDamaged {
        unit: UnitId,
        projectile_id: u32,
        amount: i32,
        health: i32,
    },

    /// A projectile was consumed by a hit
    ProjectileNullified {
        projectile_id: u32,
    },

    /// An enemy ran out of health
    UnitDefeated {
        unit: UnitId,
        faction: Faction,
    },

    /// The player ran out of health
    PlayerDefeated {
        unit: UnitId,
    },

    /// The player picked up an item
    ItemCollected {
        item_id: u32,
        kind: ItemKind,
    },

    /// A timed bonus ran out and was reverted
    BonusExpired {
        kind: BonusKind,
    },

    /// A unit left the level and reappeared
    UnitWrapped {
        unit: UnitId,
        position: FixedVec2,
    },
}

/// A game event stamped with its frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when the event occurred
    pub frame: u64,
    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    pub fn new(frame: u64, data: GameEventData) -> Self {
        Self { frame, data }
    }

    /// Unit the event is about, if any.
    pub fn unit(&self) -> Option<UnitId> {
        match &self.data {
            GameEventData::ProjectileFired { owner, .. } => Some(*owner),
            GameEventData::UnitDamaged { unit, .. } => Some(*unit),
            GameEventData::UnitDefeated { unit, .. } => Some(*unit),
            GameEventData::PlayerDefeated { unit } => Some(*unit),
            GameEventData::UnitWrapped { unit, .. } => Some(*unit),
            _ => None,
        }
    }

    pub fn projectile_fired(frame: u64, projectile_id: u32, owner: UnitId, kind: ProjectileKind) -> Self {
        Self::new(frame, GameEventData::ProjectileFired { projectile_id, owner, kind })
    }

    pub fn unit_damaged(frame: u64, unit: UnitId, projectile_id: u32, amount: i32, health: i32) -> Self {
        Self::new(
            frame,
            GameEventData::UnitDamaged {
                unit,
                projectile_id,
                amount,
                health,
            },
        )
    }

    pub fn projectile_nullified(frame: u64, projectile_id: u32) -> Self {
        Self::new(frame, GameEventData::ProjectileNullified { projectile_id })
    }

    pub fn unit_defeated(frame: u64, unit: UnitId, faction: Faction) -> Self {
        Self::new(frame, GameEventData::UnitDefeated { unit, faction })
    }

    pub fn player_defeated(frame: u64, unit: UnitId) -> Self {
        Self::new(frame, GameEventData::PlayerDefeated { unit })
    }

    pub fn item_collected(frame: u64, item_id: u32, kind: ItemKind) -> Self {
        Self::new(frame, GameEventData::ItemCollected { item_id, kind })
    }

    pub fn bonus_expired(frame: u64, kind: BonusKind) -> Self {
        Self::new(frame, GameEventData::BonusExpired { kind })
    }

    pub fn unit_wrapped(frame: u64, unit: UnitId, position: FixedVec2) -> Self {
        Self::new(frame, GameEventData::UnitWrapped { unit, position })
    }
}
