//! Item types and core structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::rules::{parse_dice, Ability, DiceRoll, RollError};

/// Damage rolled when fighting without a weapon
pub const EMPTY_HANDS_DAMAGE: &str = "1d4";

/// Quality of bare hands; they never break
const EMPTY_HANDS_QUALITY: i32 = 100_000;

/// Default quality of weapons and armor
const DEFAULT_QUALITY: i32 = 3;

/// Stable item identity, used for equality and location lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identity shared by every bare-hands fallback weapon
    pub fn empty_hands() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an item is used from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WieldLocation {
    Backpack,
    WeaponHand,
    ShieldHand,
    TwoHands,
    /// Armor
    Body,
    /// Helmets
    Head,
}

impl WieldLocation {
    /// The five single-item slots, in listing order
    pub const SLOTS: [WieldLocation; 5] = [
        WieldLocation::WeaponHand,
        WieldLocation::ShieldHand,
        WieldLocation::TwoHands,
        WieldLocation::Body,
        WieldLocation::Head,
    ];

    /// Whether this location holds a single item (everything but the backpack)
    pub fn is_slot(&self) -> bool {
        !matches!(self, WieldLocation::Backpack)
    }

    /// Wearable locations
    pub fn wearable() -> &'static [WieldLocation] {
        &[WieldLocation::Body, WieldLocation::Head]
    }

    /// Wieldable locations
    pub fn wieldable() -> &'static [WieldLocation] {
        &[
            WieldLocation::WeaponHand,
            WieldLocation::TwoHands,
            WieldLocation::ShieldHand,
        ]
    }
}

impl FromStr for WieldLocation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "backpack" => Ok(WieldLocation::Backpack),
            "weapon_hand" | "weapon" => Ok(WieldLocation::WeaponHand),
            "shield_hand" | "shield" => Ok(WieldLocation::ShieldHand),
            "two_hands" | "two_handed" | "two_handed_weapons" => Ok(WieldLocation::TwoHands),
            "body" | "armor" => Ok(WieldLocation::Body),
            "head" | "helmet" => Ok(WieldLocation::Head),
            _ => Err(()),
        }
    }
}

impl fmt::Display for WieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WieldLocation::Backpack => "backpack",
            WieldLocation::WeaponHand => "weapon hand",
            WieldLocation::ShieldHand => "shield hand",
            WieldLocation::TwoHands => "two hands",
            WieldLocation::Body => "body",
            WieldLocation::Head => "head",
        };
        write!(f, "{}", s)
    }
}

/// Kind tags an item can carry (an item may have several)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjType {
    Weapon,
    Armor,
    Shield,
    Helmet,
    Consumable,
    Gear,
    Magic,
    Quest,
    Treasure,
}

/// An in-game item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Kind tags
    pub kinds: Vec<ObjType>,
    /// Location the item occupies when equipped
    pub slot: WieldLocation,
    /// Capacity cost
    pub size: u32,
    /// Worth in coins
    pub value: u32,
    /// Ability the item attacks with
    pub attack: Option<Ability>,
    /// Ability the target defends with
    pub defense: Option<Ability>,
    /// Damage expression, e.g. "1d6"
    pub damage: Option<String>,
    /// Bonus to armor
    pub armor: Option<i32>,
    /// Wear before breaking
    pub quality: Option<i32>,
    /// Remaining uses for consumables
    pub uses: Option<u32>,
    /// Whether spent uses come back after a rest instead of destroying the item
    #[serde(default)]
    pub rechargeable: bool,
}

impl Item {
    /// Create a plain piece of gear: size 1, worthless, lives in the backpack
    pub fn new(name: &str) -> Self {
        Self {
            id: ItemId::new(),
            name: name.to_string(),
            description: String::new(),
            kinds: vec![ObjType::Gear],
            slot: WieldLocation::Backpack,
            size: 1,
            value: 0,
            attack: None,
            defense: None,
            damage: None,
            armor: None,
            quality: None,
            uses: None,
            rechargeable: false,
        }
    }

    /// A one-handed weapon: 1d6, strength against armor
    pub fn weapon(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Weapon],
            slot: WieldLocation::WeaponHand,
            attack: Some(Ability::Strength),
            defense: Some(Ability::Armor),
            damage: Some("1d6".to_string()),
            quality: Some(DEFAULT_QUALITY),
            ..Self::new(name)
        }
    }

    /// A two-handed weapon
    pub fn two_handed_weapon(name: &str) -> Self {
        Self::weapon(name)
            .with_slot(WieldLocation::TwoHands)
            .with_damage("1d8")
    }

    /// A rune stone: two-handed magic, intelligence against dexterity,
    /// one use that comes back after a rest
    pub fn rune_stone(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Weapon, ObjType::Magic],
            slot: WieldLocation::TwoHands,
            attack: Some(Ability::Intelligence),
            defense: Some(Ability::Dexterity),
            damage: Some("1d8".to_string()),
            quality: Some(DEFAULT_QUALITY),
            uses: Some(1),
            rechargeable: true,
            ..Self::new(name)
        }
    }

    /// Body armor with an armor bonus of 1
    pub fn armor(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Armor],
            slot: WieldLocation::Body,
            armor: Some(1),
            quality: Some(DEFAULT_QUALITY),
            ..Self::new(name)
        }
    }

    /// A shield, held in the shield hand
    pub fn shield(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Shield],
            slot: WieldLocation::ShieldHand,
            ..Self::armor(name)
        }
    }

    /// A helmet, worn on the head
    pub fn helmet(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Helmet],
            slot: WieldLocation::Head,
            ..Self::armor(name)
        }
    }

    /// A consumable with a single use
    pub fn consumable(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Consumable],
            uses: Some(1),
            ..Self::new(name)
        }
    }

    /// Treasure, mostly good for selling
    pub fn treasure(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Treasure],
            value: 100,
            ..Self::new(name)
        }
    }

    /// A quest item
    pub fn quest(name: &str) -> Self {
        Self {
            kinds: vec![ObjType::Quest],
            ..Self::new(name)
        }
    }

    /// The fallback weapon used when nothing is wielded
    pub fn empty_hands() -> Self {
        Self {
            id: ItemId::empty_hands(),
            damage: Some(EMPTY_HANDS_DAMAGE.to_string()),
            quality: Some(EMPTY_HANDS_QUALITY),
            size: 0,
            ..Self::weapon("Empty Hands")
        }
    }

    /// Set the capacity cost
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the value in coins
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    /// Set the equip location
    pub fn with_slot(mut self, slot: WieldLocation) -> Self {
        self.slot = slot;
        self
    }

    /// Set the damage expression
    pub fn with_damage(mut self, damage: &str) -> Self {
        self.damage = Some(damage.to_string());
        self
    }

    /// Set the armor bonus
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Set the attack and defense axes
    pub fn with_axes(mut self, attack: Ability, defense: Ability) -> Self {
        self.attack = Some(attack);
        self.defense = Some(defense);
        self
    }

    /// Set the remaining uses
    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses = Some(uses);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Check if the item carries a kind tag
    pub fn has_kind(&self, kind: ObjType) -> bool {
        self.kinds.contains(&kind)
    }

    /// Whether the item can be used right now
    pub fn is_usable(&self) -> bool {
        self.uses.is_some_and(|uses| uses > 0)
    }

    /// Parse the damage expression, falling back to bare-hands damage
    pub fn damage_dice(&self) -> Result<DiceRoll, RollError> {
        parse_dice(self.damage.as_deref().unwrap_or(EMPTY_HANDS_DAMAGE))
    }

    /// Restore a rechargeable item to one use
    pub fn recharge(&mut self) -> bool {
        if self.rechargeable && !self.is_usable() {
            self.uses = Some(1);
            return true;
        }
        false
    }

    /// Multi-line stat readout; `worn` names the location when carried
    pub fn stats(&self, worn: Option<WieldLocation>) -> String {
        let carried = match worn {
            Some(location) if location.is_slot() => format!(", Worn: [{}]", location),
            _ => String::new(),
        };
        let show = |v: Option<i64>| v.map_or_else(|| "N/A".to_string(), |v| v.to_string());

        format!(
            "{name}\nValue: ~{value} coins{carried}\n\n{desc}\n\n\
             Slots: {size}, Used from: {slot}\n\
             Quality: {quality}, Uses: {uses}\n\
             Attacks using {attack} against {defense}\n\
             Damage roll: {damage}",
            name = self.name,
            value = self.value,
            carried = carried,
            desc = self.description,
            size = self.size,
            slot = self.slot,
            quality = show(self.quality.map(i64::from)),
            uses = show(self.uses.map(i64::from)),
            attack = self.attack.map_or_else(|| "No attack".to_string(), |a| a.to_string()),
            defense = self.defense.map_or_else(|| "No defense".to_string(), |d| d.to_string()),
            damage = self.damage.as_deref().unwrap_or("None"),
        )
    }
}
