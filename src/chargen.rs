//! Character generation
//!
//! A `CharacterSheet` is the throwaway draft a new player looks at before
//! committing: random abilities, health, traits and starting gear. The player
//! may rename it and swap two abilities once, then `apply` turns it into a
//! `Player` with the gear carried and worn.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::equipment::EquipmentError;
use crate::living::{Abilities, Entity, Player};
use crate::objects::{Item, WieldLocation};
use crate::rules::{Ability, DiceRoll, RandomTable, RollEngine, RollError};

/// Chargen errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChargenError {
    #[error("abilities can only be swapped once")]
    SwapAlreadyUsed,

    #[error("unrecognized ability: {0}")]
    UnknownAbility(String),

    #[error("name cannot be empty")]
    EmptyName,

    #[error(transparent)]
    Roll(#[from] RollError),

    #[error(transparent)]
    Equipment(#[from] EquipmentError),
}

const NAMES: &[&str] = &[
    "Aldric", "Brenna", "Cador", "Dunstan", "Edda", "Faramond", "Gisla", "Hrodric", "Ilse",
    "Jorund", "Kenna", "Leofric", "Maude", "Norbert", "Osric", "Petra", "Quenild", "Roswitha",
    "Sigeric", "Tamsin",
];

const PHYSIQUE: &[&str] = &[
    "athletic", "brawny", "corpulent", "delicate", "gaunt", "hulking", "lanky", "ripped",
    "rugged", "scrawny", "short", "sinewy", "slender", "flabby", "statuesque", "stout", "tiny",
    "towering", "willowy", "wiry",
];

const FACE: &[&str] = &[
    "bloated", "blunt", "bony", "chiseled", "delicate", "elongated", "patrician", "pinched",
    "hawkish", "broken", "impish", "narrow", "ratlike", "round", "sunken", "sharp", "soft",
    "square", "wide", "wolfish",
];

const SKIN: &[&str] = &[
    "battle scarred", "birthmarked", "burn scarred", "dark", "makeup-painted", "oily", "pale",
    "perfect", "pierced", "pockmarked", "reeking", "tattooed", "rosy", "rough", "sallow",
    "sunburned", "tanned", "war-painted", "weathered", "whip scarred",
];

const HAIR: &[&str] = &[
    "bald", "braided", "bristly", "cropped", "curly", "disheveled", "dreadlocked", "filthy",
    "frizzy", "greased", "limp", "long", "luxurious", "mohawked", "oily", "ponytailed", "silky",
    "topknotted", "wavy", "wispy",
];

const CLOTHING: &[&str] = &[
    "antique", "bloody", "ceremonial", "decorated", "eccentric", "elegant", "fashionable",
    "filthy", "flamboyant", "stained", "foreign", "frayed", "frumpy", "livery", "oversized",
    "patched", "perfumed", "rancid", "torn", "undersized",
];

const SPEECH: &[&str] = &[
    "blunt", "booming", "breathy", "cryptic", "drawling", "droning", "flowery", "formal",
    "gravelly", "hoarse", "mumbling", "precise", "quaint", "rambling", "rapid-fire", "dialect",
    "slow", "squeaky", "stuttering", "whispery",
];

const VIRTUE: &[&str] = &[
    "ambitious", "cautious", "courageous", "courteous", "curious", "disciplined", "focused",
    "generous", "gregarious", "honest", "honorable", "humble", "idealistic", "just", "loyal",
    "merciful", "righteous", "serene", "stoic", "tolerant",
];

const VICE: &[&str] = &[
    "aggressive", "arrogant", "bitter", "cowardly", "cruel", "deceitful", "flippant",
    "gluttonous", "greedy", "irascible", "lazy", "nervous", "prejudiced", "reckless", "rude",
    "suspicious", "vain", "vengeful", "wasteful", "whiny",
];

const BACKGROUND: &[&str] = &[
    "alchemist", "beggar", "butcher", "burglar", "charlatan", "cleric", "cook", "cultist",
    "gambler", "herbalist", "magician", "mariner", "mercenary", "merchant", "outlaw",
    "performer", "pickpocket", "smuggler", "student", "tracker",
];

const MISFORTUNE: &[&str] = &[
    "abandoned", "addicted", "blackmailed", "condemned", "cursed", "defrauded", "demoted",
    "discredited", "disowned", "exiled", "framed", "haunted", "kidnapped", "mutilated",
    "poor", "pursued", "rejected", "replaced", "robbed", "suspected",
];

const ALIGNMENT: &[&str] = &["law", "neutrality", "chaos"];

const WEAPONS: &[&str] = &[
    "dagger", "cudgel", "sickle", "staff", "spear", "sword", "mace", "axe", "flail",
    "halberd", "war hammer", "long sword", "battle axe",
];

/// Weapons that need both hands
const TWO_HANDED: &[&str] = &["staff", "halberd", "war hammer", "battle axe"];

const DUNGEONING_GEAR: &[&str] = &[
    "rope, 50ft", "pulleys", "candles, 5", "chain, 10ft", "chalk, 10", "crowbar",
    "tinderbox", "grappling hook", "hammer", "waterskin", "lantern", "lamp oil", "padlock",
    "manacles", "mirror", "pole, 10ft", "sack", "tent", "spikes, 5", "torches, 5",
];

const GENERAL_GEAR_1: &[&str] = &[
    "air bladder", "bear trap", "shovel", "bellows", "grease", "saw", "bucket", "caltrops",
    "chisel", "drill", "fishing rod", "marbles", "glue", "pick", "hourglass", "net", "tongs",
    "lockpicks", "metal file", "nails",
];

const GENERAL_GEAR_2: &[&str] = &[
    "incense", "sponge", "lens", "perfume", "horn", "bottle", "soap", "spyglass", "tar pot",
    "twine", "fake jewels", "blank book", "card deck", "dice set", "cook pots", "face paint",
    "whistle", "instrument", "quill and ink", "small bell",
];

/// Rations every new character starts with
const STARTING_RATIONS: usize = 2;

fn armor_table() -> Result<RandomTable<Option<(&'static str, i32)>>, RollError> {
    RandomTable::ranged([
        ("1-3", None),
        ("4-14", Some(("gambeson", 1))),
        ("15-19", Some(("brigandine", 2))),
        ("20", Some(("chain", 3))),
    ])
}

/// (helmet, shield)
fn helmet_and_shield_table() -> Result<RandomTable<(bool, bool)>, RollError> {
    RandomTable::ranged([
        ("1-13", (false, false)),
        ("14-16", (true, false)),
        ("17-19", (false, true)),
        ("20", (true, true)),
    ])
}

/// Roll once on a flat list, with a die as big as the list
fn pick(engine: &mut RollEngine, entries: &'static [&'static str]) -> Result<&'static str, RollError> {
    let table = RandomTable::flat(entries.iter().copied());
    let expression = DiceRoll::new(1, entries.len() as u32).to_string();
    engine.roll_random_table(&expression, &table).copied()
}

/// Prefix a word with "a" or "an"
fn with_article(word: &str) -> String {
    let article = match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{} {}", article, word)
}

/// Uppercase the first letter, lowercase the rest
fn capitalize(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A draft character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub abilities: Abilities,
    pub hp_max: i32,
    pub description: String,
    /// Body armor and its bonus
    pub armor: Option<(String, i32)>,
    pub helmet: bool,
    pub shield: bool,
    pub weapon: String,
    pub backpack: Vec<String>,
    /// Whether the one-time ability swap has been spent
    pub swapped: bool,
}

impl CharacterSheet {
    /// Roll up a new character
    pub fn generate(engine: &mut RollEngine) -> Result<Self, ChargenError> {
        let name = pick(engine, NAMES)?.to_string();

        let mut abilities = Abilities::default();
        for ability in Ability::BASE {
            abilities.set(ability, Self::roll_ability(engine));
        }

        let description = format!(
            "You are {} with {} face, {} skin, {} hair, {} speech, and {} clothing. \
             You were {}, but you were {} and ended up a knave. You are {} but also {}. \
             You are of the {} alignment.",
            pick(engine, PHYSIQUE)?,
            with_article(pick(engine, FACE)?),
            pick(engine, SKIN)?,
            pick(engine, HAIR)?,
            pick(engine, SPEECH)?,
            pick(engine, CLOTHING)?,
            with_article(pick(engine, BACKGROUND)?),
            pick(engine, MISFORTUNE)?,
            pick(engine, VIRTUE)?,
            pick(engine, VICE)?,
            pick(engine, ALIGNMENT)?,
        );

        let hp_max = engine.roll("1d8")?.max(5);

        let armor = (*engine.roll_random_table("1d20", &armor_table()?)?)
            .map(|(name, bonus)| (name.to_string(), bonus));
        let (helmet, shield) = *engine.roll_random_table("1d20", &helmet_and_shield_table()?)?;
        let weapon = pick(engine, WEAPONS)?.to_string();

        let mut backpack = vec!["ration".to_string(); STARTING_RATIONS];
        for table in [DUNGEONING_GEAR, DUNGEONING_GEAR, GENERAL_GEAR_1, GENERAL_GEAR_2] {
            backpack.push(pick(engine, table)?.to_string());
        }

        debug!("generated character sheet for {}", name);
        Ok(Self {
            name,
            abilities,
            hp_max,
            description,
            armor,
            helmet,
            shield,
            weapon,
            backpack,
            swapped: false,
        })
    }

    /// Lowest of three d6
    fn roll_ability(engine: &mut RollEngine) -> i32 {
        let d6 = DiceRoll::new(1, 6);
        (0..3).map(|_| engine.roll_dice(d6)).min().unwrap_or(1)
    }

    /// Replace the name, normalizing its case
    pub fn rename(&mut self, name: &str) -> Result<(), ChargenError> {
        let name = capitalize(name);
        if name.is_empty() {
            return Err(ChargenError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    /// Swap two abilities, given by name or abbreviation ("STR", "int"). Only once.
    pub fn swap_abilities(&mut self, first: &str, second: &str) -> Result<(), ChargenError> {
        if self.swapped {
            return Err(ChargenError::SwapAlreadyUsed);
        }
        let parse = |name: &str| {
            name.parse::<Ability>()
                .ok()
                .filter(Ability::is_base)
                .ok_or_else(|| ChargenError::UnknownAbility(name.to_string()))
        };
        let (a, b) = (parse(first)?, parse(second)?);

        self.abilities.swap(a, b);
        self.swapped = true;
        Ok(())
    }

    /// Every piece of gear by name: armor, helmet, shield, weapon, then the backpack
    pub fn gear(&self) -> Vec<String> {
        let mut gear = Vec::new();
        if let Some((name, _)) = &self.armor {
            gear.push(name.clone());
        }
        if self.helmet {
            gear.push("helmet".to_string());
        }
        if self.shield {
            gear.push("shield".to_string());
        }
        gear.push(self.weapon.clone());
        gear.extend(self.backpack.iter().cloned());
        gear
    }

    /// Human-readable sheet
    pub fn show_sheet(&self) -> String {
        let abilities = Ability::BASE
            .iter()
            .map(|&ability| {
                format!("{} {:+}", ability.abbreviation(), self.abilities.get(ability))
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nHP {}\n{}\n\n{}\n\nYour belongings:\n{}",
            self.name,
            self.hp_max,
            abilities,
            self.description,
            self.gear().join(", ")
        )
    }

    /// Create the player: abilities and health from the sheet, worn gear
    /// equipped, everything else in the backpack. A shield alongside a
    /// two-handed weapon is carried rather than worn.
    pub fn apply(&self) -> Result<Player, ChargenError> {
        let mut entity = Entity::new(&self.name);
        entity.abilities = self.abilities;
        entity.hp_max = self.hp_max;
        entity.hp = self.hp_max;
        entity.description = self.description.clone();

        let weapon = self.weapon_item();
        let two_handed = weapon.slot == WieldLocation::TwoHands;
        let mut worn = vec![weapon];
        let mut carried = Vec::new();
        if self.shield {
            if two_handed {
                carried.push(Item::shield("shield"));
            } else {
                worn.push(Item::shield("shield"));
            }
        }
        if let Some((name, bonus)) = &self.armor {
            worn.push(Item::armor(name).with_armor(*bonus));
        }
        if self.helmet {
            worn.push(Item::helmet("helmet"));
        }

        let mut equipment = entity.equipment_mut();
        for item in worn {
            let id = item.id;
            equipment.add_to_backpack(item)?;
            equipment.equip(id)?;
        }
        for item in carried {
            equipment.add_to_backpack(item)?;
        }
        for name in &self.backpack {
            let item = if name == "ration" {
                Item::consumable(name)
            } else {
                Item::new(name)
            };
            equipment.add_to_backpack(item)?;
        }

        info!("created character {}", self.name);
        Ok(Player::from_entity(entity))
    }

    fn weapon_item(&self) -> Item {
        if TWO_HANDED.contains(&self.weapon.as_str()) {
            Item::two_handed_weapon(&self.weapon)
        } else {
            Item::weapon(&self.weapon)
        }
    }
}
