//! Items and Timed Bonuses
//!
//! Items sit in the level until the player touches them. Health packs heal
//! on the spot; boosts change a player stat and leave behind a
//! [`TimedBonus`] that reverts the change when its countdown runs out.

use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::core::fixed::Fixed;
use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::core::vec2::FixedVec2;
use crate::game::body::Body;
use crate::game::collision::Collidable;
use crate::game::config::SimConfig;
use crate::game::error::UnitError;
use crate::game::timer::CountdownTimer;
use crate::game::unit::{Damageable, Unit};

/// Pickup type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ItemKind {
    /// Faster walking for a while
    SpeedBoost = 0,
    /// Higher jumps for a while
    JumpBoost = 1,
    /// Immediate heal
    HealthPack = 2,
}

/// Stat a timed bonus is holding up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BonusKind {
    Speed = 0,
    Jump = 1,
}

impl ItemKind {
    /// Bonus left behind by this item, if any.
    pub fn bonus(self) -> Option<BonusKind> {
        match self {
            ItemKind::SpeedBoost => Some(BonusKind::Speed),
            ItemKind::JumpBoost => Some(BonusKind::Jump),
            ItemKind::HealthPack => None,
        }
    }
}

// =============================================================================
// ITEMS
// =============================================================================

/// A pickup placed by the level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub body: Body,
}

impl Item {
    /// Square item of side `size`, centred horizontally on the cell and
    /// resting on its floor.
    pub fn in_cell(id: u32, kind: ItemKind, cell: Rect, size: i32) -> Self {
        let x = cell.x + (cell.width - size) / 2;
        let y = cell.bottom() - size;
        Self {
            id,
            kind,
            body: Body::new(FixedVec2::from_ints(x, y), size, size),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id);
        hasher.update_u8(self.kind as u8);
        self.body.hash_into(hasher);
    }
}

impl Collidable for Item {
    #[inline]
    fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }
}

// =============================================================================
// TIMED BONUSES
// =============================================================================

/// A running stat change that undoes itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedBonus {
    pub kind: BonusKind,
    pub timer: CountdownTimer,
    /// Set once the countdown has expired
    pub is_timed_out: bool,
    /// Stat value to restore on expiry
    restore_to: Fixed,
}

impl TimedBonus {
    /// Advance the countdown; flags `is_timed_out` on expiry.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if self.timer.check_timer(elapsed) {
            self.is_timed_out = true;
        }
        self.is_timed_out
    }

    /// Undo the stat change on `unit`.
    pub fn revert(&self, unit: &mut Unit) -> Result<(), UnitError> {
        match self.kind {
            BonusKind::Speed => unit.set_movement_speed(unit.default_movement_speed()),
            BonusKind::Jump => unit.set_default_jump_speed(self.restore_to),
        }
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.kind as u8);
        hasher.update_u64(self.timer.remaining().as_nanos() as u64);
        hasher.update_bool(self.timer.is_active());
        hasher.update_bool(self.is_timed_out);
        hasher.update_fixed(self.restore_to);
    }
}

/// What a pickup did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupEffect {
    /// Health restored
    Healed(i32),
    /// New bonus registered
    BonusStarted(BonusKind),
    /// Bonus of this kind was already running; its timer restarted
    BonusRefreshed(BonusKind),
}

/// Apply `kind` to the player.
///
/// A boost of a kind that is still running only restarts its timer, so
/// repeated pickups never stack.
pub fn apply_pickup(
    kind: ItemKind,
    player: &mut Unit,
    bonuses: &mut Vec<TimedBonus>,
    config: &SimConfig,
) -> Result<PickupEffect, UnitError> {
    let bonus_kind = match kind.bonus() {
        Some(bonus_kind) => bonus_kind,
        None => {
            let before = player.health();
            player.heal(config.health_pack);
            return Ok(PickupEffect::Healed(player.health() - before));
        }
    };

    if let Some(running) = bonuses
        .iter_mut()
        .find(|b| b.kind == bonus_kind && !b.is_timed_out)
    {
        running.timer.restart();
        return Ok(PickupEffect::BonusRefreshed(bonus_kind));
    }

    let restore_to = match bonus_kind {
        BonusKind::Speed => {
            let boosted = player.default_movement_speed().saturating_add(config.speed_boost);
            player.set_movement_speed(boosted)?;
            player.default_movement_speed()
        }
        BonusKind::Jump => {
            let previous = player.default_jump_speed();
            player.set_default_jump_speed(previous.saturating_add(config.jump_boost))?;
            previous
        }
    };

    bonuses.push(TimedBonus {
        kind: bonus_kind,
        timer: CountdownTimer::started(config.bonus_duration()),
        is_timed_out: false,
        restore_to,
    });
    Ok(PickupEffect::BonusStarted(bonus_kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::UnitStats;
    use crate::game::unit::{Faction, UnitId};

    fn player() -> Unit {
        Unit::new(UnitId(0), Faction::Player, FixedVec2::ZERO, &UnitStats::PLAYER).unwrap()
    }

    #[test]
    fn test_item_rests_on_cell_floor() {
        let item = Item::in_cell(3, ItemKind::HealthPack, Rect::new(40, 80, 40, 40), 30);
        assert_eq!(item.bounding_box(), Rect::new(45, 90, 30, 30));
    }

    #[test]
    fn test_health_pack_heals_clamped() {
        let config = SimConfig::default();
        let mut player = player();
        let mut bonuses = Vec::new();
        player.take_damage(4);

        let effect = apply_pickup(ItemKind::HealthPack, &mut player, &mut bonuses, &config).unwrap();
        assert_eq!(effect, PickupEffect::Healed(4));
        assert_eq!(player.health(), player.max_health());
        assert!(bonuses.is_empty());
    }

    #[test]
    fn test_speed_boost_and_revert() {
        let config = SimConfig::default();
        let mut player = player();
        let mut bonuses = Vec::new();
        let base = player.movement_speed();

        let effect = apply_pickup(ItemKind::SpeedBoost, &mut player, &mut bonuses, &config).unwrap();
        assert_eq!(effect, PickupEffect::BonusStarted(BonusKind::Speed));
        assert_eq!(player.movement_speed(), base + config.speed_boost);

        let bonus = &mut bonuses[0];
        assert!(!bonus.update(config.bonus_duration() / 2));
        assert!(bonus.update(config.bonus_duration()));
        bonus.revert(&mut player).unwrap();
        assert_eq!(player.movement_speed(), base);
    }

    #[test]
    fn test_repeat_pickup_restarts_timer() {
        let config = SimConfig::default();
        let mut player = player();
        let mut bonuses = Vec::new();
        let base_jump = player.default_jump_speed();

        apply_pickup(ItemKind::JumpBoost, &mut player, &mut bonuses, &config).unwrap();
        bonuses[0].update(config.bonus_duration() / 2);

        let effect = apply_pickup(ItemKind::JumpBoost, &mut player, &mut bonuses, &config).unwrap();
        assert_eq!(effect, PickupEffect::BonusRefreshed(BonusKind::Jump));
        assert_eq!(bonuses.len(), 1);
        assert_eq!(bonuses[0].timer.remaining(), config.bonus_duration());
        assert_eq!(player.default_jump_speed(), base_jump + config.jump_boost);

        bonuses[0].update(config.bonus_duration());
        bonuses[0].revert(&mut player).unwrap();
        assert_eq!(player.default_jump_speed(), base_jump);
    }
}
