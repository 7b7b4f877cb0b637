//! Damage application
//!
//! Handles:
//! - Critical hits (double damage)
//! - Reducing health and dispatching defeat at zero

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::living::{DefeatOutcome, EntityId, Lethality, Living};
use crate::rules::RollEngine;

/// Damage dealt by one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Rolled damage
    pub base_damage: i32,
    /// Damage after the critical multiplier
    pub final_damage: i32,
    /// Whether this was a critical hit
    pub is_critical: bool,
}

impl DamageResult {
    pub fn new(base: i32, is_crit: bool) -> Self {
        let final_damage = if is_crit { base * 2 } else { base };
        Self {
            base_damage: base,
            final_damage,
            is_critical: is_crit,
        }
    }
}

/// Hurt `target` and, once its health reaches zero, defeat it.
///
/// Returns the defeat outcome when one happened. Entities that are already
/// dead only take the damage.
pub fn apply_damage(
    engine: &mut RollEngine,
    target: &mut dyn Living,
    amount: i32,
    attacker: Option<EntityId>,
    lethality: Lethality,
) -> Option<DefeatOutcome> {
    let was_alive = target.entity().is_alive();
    target.entity_mut().take_damage(amount, attacker);

    if !was_alive || target.entity().hp > 0 {
        return None;
    }

    let outcome = target.defeat(engine, lethality);
    debug!("{} defeated: {:?}", target.entity().name, outcome);
    Some(outcome)
}
