//! Attack resolution and looting

use tracing::{debug, info};

use super::damage::{apply_damage, DamageResult};
use crate::living::{DefeatOutcome, Lethality, Living};
use crate::rules::{Ability, RollEngine, RollError, SaveQuality, SavingThrowResult};

/// Everything that happened in one attack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    /// Name of the weapon used
    pub weapon: String,
    /// The opposed throw
    pub throw: SavingThrowResult,
    /// Damage dealt, if the attack hit
    pub damage: Option<DamageResult>,
    /// Set when the hit defeated the defender
    pub defeat: Option<DefeatOutcome>,
}

impl AttackReport {
    pub fn hit(&self) -> bool {
        self.throw.succeeded
    }

    /// One-line narration
    pub fn summary(&self, attacker: &str, defender: &str) -> String {
        match &self.damage {
            Some(damage) if damage.is_critical => format!(
                "{} lands a critical hit on {} with the {} for {} damage!",
                attacker, defender, self.weapon, damage.final_damage
            ),
            Some(damage) => format!(
                "{} hits {} with the {} for {} damage.",
                attacker, defender, self.weapon, damage.final_damage
            ),
            None => format!("{} misses {} with the {}.", attacker, defender, self.weapon),
        }
    }
}

/// Attack with the attacker's current weapon.
///
/// The weapon's attack axis is thrown against the defender's defense axis;
/// a hit rolls the weapon's damage, doubled on a natural 20.
pub fn attack(
    engine: &mut RollEngine,
    attacker: &mut dyn Living,
    defender: &mut dyn Living,
    lethality: Lethality,
    advantage: bool,
    disadvantage: bool,
) -> Result<AttackReport, RollError> {
    let weapon = attacker.entity().equipment().current_weapon().into_owned();
    let attack_axis = weapon.attack.unwrap_or(Ability::Weapon);
    let defense_axis = weapon.defense.unwrap_or(Ability::Armor);

    let throw = engine.opposed_saving_throw(
        attacker.entity(),
        defender.entity(),
        attack_axis,
        defense_axis,
        advantage,
        disadvantage,
    );

    if !throw.succeeded {
        debug!("{} misses {}", attacker.entity().name, defender.entity().name);
        return Ok(AttackReport {
            weapon: weapon.name,
            throw,
            damage: None,
            defeat: None,
        });
    }

    let base = engine.roll_dice(weapon.damage_dice()?);
    let damage = DamageResult::new(base, throw.quality == SaveQuality::CriticalSuccess);
    let defeat = apply_damage(
        engine,
        defender,
        damage.final_damage,
        Some(attacker.entity().id),
        lethality,
    );

    info!(
        "{} hits {} with {} for {}",
        attacker.entity().name,
        defender.entity().name,
        weapon.name,
        damage.final_damage
    );

    Ok(AttackReport {
        weapon: weapon.name,
        throw,
        damage: Some(damage),
        defeat,
    })
}

/// Loot a defeated foe. Returns `None` while the target is still standing.
pub fn loot_defeated(
    engine: &mut RollEngine,
    looter: &mut dyn Living,
    target: &mut dyn Living,
) -> Result<Option<i64>, RollError> {
    if target.entity().hp > 0 {
        return Ok(None);
    }
    looter.loot(target, engine).map(Some)
}
