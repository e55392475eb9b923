//! Combat Resolution
//!
//! Runs after every entity has updated itself. Each live projectile is
//! paired with each live unit in registry order; hits only count across
//! factions. Standard projectiles are consumed by their first hit, beams
//! keep going.

use tracing::debug;

use crate::game::collision::collides_between;
use crate::game::config::SimConfig;
use crate::game::events::GameEvent;
use crate::game::projectile::Projectile;
use crate::game::unit::{Damageable, Faction, RangedAttacker, Unit};

/// Tally of one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatSummary {
    /// Damaging hits applied
    pub hits: u32,
    /// Projectiles consumed
    pub nullified: u32,
}

/// Damage a projectile deals on hit.
///
/// Beams deal the fixed beam damage. Standard shots use the shooter's
/// current ranged damage, or the value captured at firing time if the
/// shooter is gone.
pub fn hit_damage(projectile: &Projectile, shooter: Option<&Unit>, config: &SimConfig) -> i32 {
    if projectile.is_beam() {
        return config.beam_damage;
    }
    shooter
        .map(|unit| unit.ranged_damage())
        .unwrap_or(projectile.owner_damage)
}

/// Only player shots hurt enemies and only enemy shots hurt the player.
#[inline]
pub fn crosses_factions(projectile: &Projectile, target: &Unit) -> bool {
    match projectile.owner_faction {
        Faction::Player => target.faction() == Faction::Enemy,
        Faction::Enemy => target.faction() == Faction::Player,
    }
}

/// Pair every live projectile with every live unit.
pub fn resolve_projectiles(
    projectiles: &mut [Projectile],
    units: &mut [&mut Unit],
    config: &SimConfig,
    frame: u64,
    events: &mut Vec<GameEvent>,
) -> CombatSummary {
    let mut summary = CombatSummary::default();

    for projectile in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }
        if !projectile.able_to_do_damage() {
            projectile.tick_arming();
            continue;
        }

        let damage = {
            let shooter = units
                .iter()
                .find(|u| u.id() == projectile.owner && u.is_active())
                .map(|u| &**u);
            hit_damage(projectile, shooter, config)
        };

        for target in units.iter_mut() {
            if !target.is_active()
                || !crosses_factions(projectile, &**target)
                || !collides_between(&*projectile, &**target)
            {
                continue;
            }

            target.take_damage(damage);
            summary.hits += 1;
            events.push(GameEvent::unit_damaged(
                frame,
                target.id(),
                projectile.id,
                damage,
                target.health(),
            ));

            if !projectile.is_beam() {
                projectile.nullify();
                summary.nullified += 1;
                debug!(projectile = projectile.id, target = target.id().0, "projectile nullified");
                events.push(GameEvent::projectile_nullified(frame, projectile.id));
                break;
            }
        }
    }

    summary
}

/// Deactivate enemies at zero health. Returns true if the player is down.
pub fn sweep_casualties<'a, I>(player: &Unit, enemies: I, frame: u64, events: &mut Vec<GameEvent>) -> bool
where
    I: IntoIterator<Item = &'a mut Unit>,
{
    for enemy in enemies {
        if enemy.is_active() && enemy.is_defeated() {
            enemy.body.deactivate();
            debug!(unit = enemy.id().0, "enemy defeated");
            events.push(GameEvent::unit_defeated(frame, enemy.id(), enemy.faction()));
        }
    }
    player.is_defeated()
}
