//! Ability axes used to pick a bonus when resolving a throw

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six ability bonuses plus the two derived resolution axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Endurance,
    Intelligence,
    Perception,
    Willpower,
    /// Defense derived from worn armor, shield and helmet
    Armor,
    /// Attack axis of the wielded weapon
    Weapon,
}

impl Ability {
    /// The six rolled abilities, in character-sheet order
    pub const BASE: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Endurance,
        Ability::Intelligence,
        Ability::Perception,
        Ability::Willpower,
    ];

    /// Whether this is one of the six rolled abilities
    pub fn is_base(&self) -> bool {
        !matches!(self, Ability::Armor | Ability::Weapon)
    }

    /// Three-letter abbreviation used on character sheets
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Endurance => "END",
            Ability::Intelligence => "INT",
            Ability::Perception => "PER",
            Ability::Willpower => "WIL",
            Ability::Armor => "ARM",
            Ability::Weapon => "WPN",
        }
    }
}

impl FromStr for Ability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" => Ok(Ability::Strength),
            "dexterity" | "dex" => Ok(Ability::Dexterity),
            "endurance" | "end" | "con" => Ok(Ability::Endurance),
            "intelligence" | "int" => Ok(Ability::Intelligence),
            "perception" | "per" => Ok(Ability::Perception),
            "willpower" | "wil" | "will" => Ok(Ability::Willpower),
            "armor" | "armour" => Ok(Ability::Armor),
            "weapon" => Ok(Ability::Weapon),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Endurance => "endurance",
            Ability::Intelligence => "intelligence",
            Ability::Perception => "perception",
            Ability::Willpower => "willpower",
            Ability::Armor => "armor",
            Ability::Weapon => "weapon",
        };
        write!(f, "{}", s)
    }
}
