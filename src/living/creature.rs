//! Non-player creatures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use super::{Entity, Living};

/// Morale a creature starts with
pub const DEFAULT_MORALE: i32 = 9;

/// How a creature feels about players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Allegiance {
    #[default]
    Hostile,
    Neutral,
    Friendly,
}

impl FromStr for Allegiance {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hostile" => Ok(Allegiance::Hostile),
            "neutral" => Ok(Allegiance::Neutral),
            "friendly" | "ally" => Ok(Allegiance::Friendly),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Allegiance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Allegiance::Hostile => "hostile",
            Allegiance::Neutral => "neutral",
            Allegiance::Friendly => "friendly",
        };
        write!(f, "{}", s)
    }
}

/// A monster or NPC. Defeat is death.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub entity: Entity,
    /// Checked with 2d6 when things go badly
    pub morale: i32,
    pub allegiance: Allegiance,
}

impl Creature {
    pub fn new(name: &str) -> Self {
        Self {
            entity: Entity::new(name),
            morale: DEFAULT_MORALE,
            allegiance: Allegiance::default(),
        }
    }

    pub fn with_allegiance(mut self, allegiance: Allegiance) -> Self {
        self.allegiance = allegiance;
        self
    }

    pub fn with_morale(mut self, morale: i32) -> Self {
        self.morale = morale;
        self
    }

    pub fn is_hostile(&self) -> bool {
        self.allegiance == Allegiance::Hostile
    }
}

impl Living for Creature {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn die(&mut self) {
        info!("{} dies", self.entity.name);
        self.entity.mark_dead();
    }
}
