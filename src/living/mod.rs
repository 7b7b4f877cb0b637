//! Living things
//!
//! Players and creatures share an `Entity` (abilities, health, coins,
//! equipment) and differ in what happens when they are defeated:
//! - Creatures die outright
//! - Players roll on the death table, or are beaten but kept alive where
//!   death is not allowed

mod creature;
mod entity;
mod player;

use tracing::debug;

use crate::rules::{DeathOutcome, RollEngine, RollError};

pub use creature::{Allegiance, Creature, DEFAULT_MORALE};
pub use entity::{
    Abilities, Entity, EntityId, Notice, Vitality, DEFAULT_BONUS, DEFAULT_HP, MAX_NOTICES,
};
pub use player::Player;

/// Whether a defeat may kill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lethality {
    #[default]
    Lethal,
    NonLethal,
}

impl Lethality {
    /// Lethality of a place that does or does not allow death
    pub fn from_allow_death(allow_death: bool) -> Self {
        if allow_death {
            Lethality::Lethal
        } else {
            Lethality::NonLethal
        }
    }
}

/// What a defeat led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefeatOutcome {
    /// Removed from play without a death roll
    Died,
    /// Rolled on the death table
    DeathRoll(DeathOutcome),
    /// Knocked out somewhere non-lethal and healed back to full
    Beaten { healed: i32 },
    /// The death roll itself failed; the message is for narration
    Unresolved(String),
}

impl DefeatOutcome {
    pub fn is_fatal(&self) -> bool {
        match self {
            DefeatOutcome::Died => true,
            DefeatOutcome::DeathRoll(outcome) => outcome.is_fatal(),
            DefeatOutcome::Beaten { .. } | DefeatOutcome::Unresolved(_) => false,
        }
    }
}

/// Behavior shared by everything that can fight, bleed and be robbed
pub trait Living {
    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn is_player(&self) -> bool {
        false
    }

    /// Called once health drops to zero or below. Defeat is death by default.
    fn defeat(&mut self, _engine: &mut RollEngine, _lethality: Lethality) -> DefeatOutcome {
        self.die();
        DefeatOutcome::Died
    }

    /// Remove from play
    fn die(&mut self);

    /// Steal up to 1d10 coins from `target`. Returns the amount stolen.
    fn loot(&mut self, target: &mut dyn Living, engine: &mut RollEngine) -> Result<i64, RollError> {
        let max_steal = i64::from(engine.roll("1d10")?);
        let stolen = target.entity_mut().pay(max_steal);

        let looter = self.entity_mut();
        looter.coins += stolen;
        let looter_name = looter.name.clone();
        let target_name = target.entity().name.clone();
        looter.notify(Notice::Looted {
            from: target_name.clone(),
            amount: stolen,
        });
        target.entity_mut().notify(Notice::Robbed {
            by: looter_name,
            amount: stolen,
        });

        debug!("{} looted {} coins from {}", self.entity().name, stolen, target_name);
        Ok(stolen)
    }
}
