//! Shared state of every living thing: abilities, health, coins, equipment

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::equipment::{EquipmentHandler, EquipmentState};
use crate::rules::{Ability, RollEngine};

/// Bonus used for any axis an entity has no score for
pub const DEFAULT_BONUS: i32 = 1;

/// Starting (and maximum) health of a fresh entity
pub const DEFAULT_HP: i32 = 8;

/// Pending notices kept per entity; older ones are dropped past this
pub const MAX_NOTICES: usize = 64;

/// Stable entity identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six ability bonuses. Values may go negative after permanent loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub strength: i32,
    pub dexterity: i32,
    pub endurance: i32,
    pub intelligence: i32,
    pub perception: i32,
    pub willpower: i32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self::uniform(DEFAULT_BONUS)
    }
}

impl Abilities {
    /// Every ability set to the same value
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            dexterity: value,
            endurance: value,
            intelligence: value,
            perception: value,
            willpower: value,
        }
    }

    /// Read an ability. Armor and weapon are not stored here and read as the default.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Endurance => self.endurance,
            Ability::Intelligence => self.intelligence,
            Ability::Perception => self.perception,
            Ability::Willpower => self.willpower,
            Ability::Armor | Ability::Weapon => DEFAULT_BONUS,
        }
    }

    /// Write an ability. Derived axes (armor, weapon) are ignored.
    pub fn set(&mut self, ability: Ability, value: i32) {
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Endurance => &mut self.endurance,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Perception => &mut self.perception,
            Ability::Willpower => &mut self.willpower,
            Ability::Armor | Ability::Weapon => {
                debug!("ignoring write to derived axis {}", ability);
                return;
            }
        };
        *slot = value;
    }

    /// Exchange two abilities' values
    pub fn swap(&mut self, a: Ability, b: Ability) {
        let (first, second) = (self.get(a), self.get(b));
        self.set(a, second);
        self.set(b, first);
    }
}

/// Whether an entity is still in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vitality {
    #[default]
    Alive,
    /// Defeated somewhere death is not allowed
    Beaten,
    Dead,
}

/// Something that happened to an entity, for the presentation layer to narrate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Healed(i32),
    Damaged { amount: i32, by: Option<EntityId> },
    Paid(i64),
    Looted { from: String, amount: i64 },
    Robbed { by: String, amount: i64 },
    SurvivedDeath { ability: Ability, loss: i32 },
    Beaten,
    Died,
    ItemUsedUp(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Healed(amount) => write!(f, "You heal for {} HP.", amount),
            Notice::Damaged { amount, .. } => write!(f, "You take {} damage.", amount),
            Notice::Paid(amount) => write!(f, "You pay {} coins.", amount),
            Notice::Looted { from, amount } => {
                write!(f, "You loot {} coins from {}.", amount, from)
            }
            Notice::Robbed { by, amount } => write!(f, "{} steals {} of your coins.", by, amount),
            Notice::SurvivedDeath { ability, loss } => write!(
                f,
                "You survive your brush with death, but lose {} {} permanently.",
                loss, ability
            ),
            Notice::Beaten => write!(f, "You collapse in a heap, alive but beaten."),
            Notice::Died => write!(f, "You collapse in a heap, embraced by death."),
            Notice::ItemUsedUp(name) => write!(f, "Your {} is used up.", name),
        }
    }
}

/// A living thing's stats and belongings
///
/// State changes queue `Notice`s for whoever presents the entity. The owner
/// is expected to call `drain_notices` after acting on it; undrained notices
/// are capped at `MAX_NOTICES`, oldest dropped first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub abilities: Abilities,
    /// Current health; may go negative when damaged
    pub hp: i32,
    pub hp_max: i32,
    pub level: u32,
    pub xp: u32,
    /// Coin balance. Kept non-negative by `pay`.
    pub coins: i64,
    pub vitality: Vitality,
    #[serde(default)]
    equipment: EquipmentState,
    #[serde(skip)]
    notices: VecDeque<Notice>,
}

impl Entity {
    /// A fresh entity with every ability at +1 and 8 health
    pub fn new(name: &str) -> Self {
        Self {
            id: EntityId::new(),
            name: name.to_string(),
            description: String::new(),
            abilities: Abilities::default(),
            hp: DEFAULT_HP,
            hp_max: DEFAULT_HP,
            level: 1,
            xp: 0,
            coins: 0,
            vitality: Vitality::Alive,
            equipment: EquipmentState::new(),
            notices: VecDeque::new(),
        }
    }

    /// Bonus on a resolution axis: armor comes from worn equipment, weapon
    /// and anything unknown use the default
    pub fn bonus(&self, axis: Ability) -> i32 {
        match axis {
            Ability::Armor => self.equipment.current_armor_bonus(),
            other => self.abilities.get(other),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.vitality != Vitality::Dead
    }

    /// Heal up to `amount`, never past `hp_max`. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.min(self.hp_max - self.hp).max(0);
        self.hp += healed;
        self.notify(Notice::Healed(healed));
        healed
    }

    /// Pay up to `amount` coins, never going below zero. Returns the amount paid.
    pub fn pay(&mut self, amount: i64) -> i64 {
        let paid = amount.min(self.coins).max(0);
        self.coins -= paid;
        self.notify(Notice::Paid(paid));
        paid
    }

    /// Lose health. Defeat is up to the caller once `hp <= 0`.
    pub fn take_damage(&mut self, amount: i32, attacker: Option<EntityId>) {
        self.hp -= amount;
        debug!("{} takes {} damage ({} hp left)", self.name, amount, self.hp);
        self.notify(Notice::Damaged {
            amount,
            by: attacker,
        });
    }

    /// Move to the terminal dead state
    pub fn mark_dead(&mut self) {
        if self.vitality != Vitality::Dead {
            self.vitality = Vitality::Dead;
            self.notify(Notice::Died);
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    /// Take every pending notice, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn equipment(&self) -> &EquipmentState {
        &self.equipment
    }

    /// Mutating equipment access, sized by current endurance
    pub fn equipment_mut(&mut self) -> EquipmentHandler<'_> {
        EquipmentHandler::new(&mut self.equipment, self.abilities.endurance)
    }

    pub fn max_slots(&self) -> i32 {
        self.abilities.endurance + crate::equipment::BASE_SLOTS
    }

    /// Rest: heal 1d8 + endurance and recharge rune stones. Returns the amount healed.
    pub fn rest(&mut self, engine: &mut RollEngine) -> i32 {
        let healed = engine.heal_from_rest(self);
        let recharged = self.equipment_mut().recharge();
        debug!("{} rests: {} healed, {} items recharged", self.name, healed, recharged);
        healed
    }
}
