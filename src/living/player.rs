//! Player characters

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{DefeatOutcome, Entity, Lethality, Living, Notice, Vitality};
use crate::rules::RollEngine;

/// A player-controlled character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub entity: Entity,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            entity: Entity::new(name),
        }
    }

    pub fn from_entity(entity: Entity) -> Self {
        Self { entity }
    }
}

impl Living for Player {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn is_player(&self) -> bool {
        true
    }

    /// Roll on the death table where death is allowed, otherwise get beaten
    /// and healed to full
    fn defeat(&mut self, engine: &mut RollEngine, lethality: Lethality) -> DefeatOutcome {
        match lethality {
            Lethality::Lethal => match engine.resolve_death(&mut self.entity) {
                Ok(outcome) => DefeatOutcome::DeathRoll(outcome),
                Err(e) => {
                    error!("death roll for {} failed: {}", self.entity.name, e);
                    DefeatOutcome::Unresolved(format!(
                        "{} hovers between life and death.",
                        self.entity.name
                    ))
                }
            },
            Lethality::NonLethal => {
                info!("{} is beaten but alive", self.entity.name);
                self.entity.notify(Notice::Beaten);
                self.entity.vitality = Vitality::Beaten;
                let missing = self.entity.hp_max - self.entity.hp;
                let healed = self.entity.heal(missing);
                DefeatOutcome::Beaten { healed }
            }
        }
    }

    fn die(&mut self) {
        info!("{} dies", self.entity.name);
        self.entity.mark_dead();
    }
}
