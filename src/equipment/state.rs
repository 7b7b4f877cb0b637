//! Equipment state: five single-item slots plus an ordered backpack
//!
//! This is the data that gets persisted with a character. All mutation goes
//! through `EquipmentHandler`, which knows the owner's capacity.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

use super::EquipmentError;
use crate::objects::{Item, ItemId, WieldLocation};

/// Armor bonus of an empty body slot
pub const UNARMORED_BONUS: i32 = 1;

/// Where every carried item currently is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentState {
    weapon_hand: Option<Item>,
    shield_hand: Option<Item>,
    two_hands: Option<Item>,
    body: Option<Item>,
    head: Option<Item>,
    #[serde(default)]
    backpack: Vec<Item>,
}

impl EquipmentState {
    /// Create an empty equipment state
    pub fn new() -> Self {
        Self::default()
    }

    /// The occupant of a single-item slot (always `None` for the backpack)
    pub fn slot(&self, location: WieldLocation) -> Option<&Item> {
        match location {
            WieldLocation::WeaponHand => self.weapon_hand.as_ref(),
            WieldLocation::ShieldHand => self.shield_hand.as_ref(),
            WieldLocation::TwoHands => self.two_hands.as_ref(),
            WieldLocation::Body => self.body.as_ref(),
            WieldLocation::Head => self.head.as_ref(),
            WieldLocation::Backpack => None,
        }
    }

    /// Backpack contents in insertion order
    pub fn backpack(&self) -> &[Item] {
        &self.backpack
    }

    /// Total size of everything slotted or in the backpack, saturating at `i32::MAX`
    pub fn used_slots(&self) -> i32 {
        let total: u64 = self
            .list_all()
            .iter()
            .map(|(item, _)| u64::from(item.size))
            .sum();
        i32::try_from(total).unwrap_or(i32::MAX)
    }

    /// Where an item is, if it is tracked here
    pub fn locate(&self, id: ItemId) -> Option<WieldLocation> {
        self.list_all()
            .into_iter()
            .find(|(item, _)| item.id == id)
            .map(|(_, location)| location)
    }

    /// Check whether an item is tracked anywhere
    pub fn contains(&self, id: ItemId) -> bool {
        self.locate(id).is_some()
    }

    /// Look up a tracked item
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.list_all()
            .into_iter()
            .find(|(item, _)| item.id == id)
            .map(|(item, _)| item)
    }

    /// Every item with its location: the five slots in fixed order, then the
    /// backpack in insertion order
    pub fn list_all(&self) -> Vec<(&Item, WieldLocation)> {
        WieldLocation::SLOTS
            .iter()
            .filter_map(|&location| self.slot(location).map(|item| (item, location)))
            .chain(
                self.backpack
                    .iter()
                    .map(|item| (item, WieldLocation::Backpack)),
            )
            .collect()
    }

    /// The wielded weapon: two-handed first, then weapon hand, else bare hands
    pub fn current_weapon(&self) -> Cow<'_, Item> {
        match self.two_hands.as_ref().or(self.weapon_hand.as_ref()) {
            Some(weapon) => Cow::Borrowed(weapon),
            None => Cow::Owned(Item::empty_hands()),
        }
    }

    /// Armor bonus from body, shield hand and head
    pub fn current_armor_bonus(&self) -> i32 {
        let body = self
            .body
            .as_ref()
            .map_or(UNARMORED_BONUS, |item| item.armor.unwrap_or(0));
        let shield = self.shield_hand.as_ref().and_then(|item| item.armor);
        let head = self.head.as_ref().and_then(|item| item.armor);

        body + shield.unwrap_or(0) + head.unwrap_or(0)
    }

    /// Backpack items whose equip location is one of `locations`
    pub fn filter_by_affinity(&self, locations: &[WieldLocation]) -> Vec<&Item> {
        self.backpack
            .iter()
            .filter(|item| locations.contains(&item.slot))
            .collect()
    }

    /// Armor and helmets in the backpack
    pub fn wearables(&self) -> Vec<&Item> {
        self.filter_by_affinity(WieldLocation::wearable())
    }

    /// Weapons, shields and rune stones in the backpack
    pub fn wieldables(&self) -> Vec<&Item> {
        self.filter_by_affinity(WieldLocation::wieldable())
    }

    /// Backpack items that can be used right now
    pub fn usables(&self) -> Vec<&Item> {
        self.backpack.iter().filter(|item| item.is_usable()).collect()
    }

    /// One line per backpack item
    pub fn describe_backpack(&self) -> String {
        if self.backpack.is_empty() {
            return "Your backpack is empty.".to_string();
        }
        self.backpack
            .iter()
            .map(|item| format!("{} : {} slots", item.name, item.size))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One line per equipped item
    pub fn describe_loadout(&self) -> String {
        let lines: Vec<String> = WieldLocation::SLOTS
            .iter()
            .filter_map(|&location| {
                self.slot(location)
                    .map(|item| format!("{} : {}", location, item.name))
            })
            .collect();

        if lines.is_empty() {
            "You're not wearing anything. How embarrassing!".to_string()
        } else {
            lines.join("\n")
        }
    }

    /// Check the slot exclusivity and uniqueness invariants, e.g. after
    /// loading a persisted state
    pub fn validate(&self) -> Result<(), EquipmentError> {
        if !self.hands_consistent() {
            return Err(EquipmentError::InvalidSlotTransition(
                "two-handed item held alongside a one-handed item".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (item, _) in self.list_all() {
            if !seen.insert(item.id) {
                return Err(EquipmentError::DuplicateItem(item.id));
            }
        }
        Ok(())
    }

    /// Two hands never coexist with weapon hand or shield hand
    pub(super) fn hands_consistent(&self) -> bool {
        self.two_hands.is_none() || (self.weapon_hand.is_none() && self.shield_hand.is_none())
    }

    /// Mutable access to a single-item slot (`None` for the backpack)
    pub(super) fn slot_entry(&mut self, location: WieldLocation) -> Option<&mut Option<Item>> {
        match location {
            WieldLocation::WeaponHand => Some(&mut self.weapon_hand),
            WieldLocation::ShieldHand => Some(&mut self.shield_hand),
            WieldLocation::TwoHands => Some(&mut self.two_hands),
            WieldLocation::Body => Some(&mut self.body),
            WieldLocation::Head => Some(&mut self.head),
            WieldLocation::Backpack => None,
        }
    }

    pub(super) fn backpack_mut(&mut self) -> &mut Vec<Item> {
        &mut self.backpack
    }

    /// Mutable access to a tracked item wherever it is
    pub(super) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        let location = self.locate(id)?;
        if location == WieldLocation::Backpack {
            return self.backpack.iter_mut().find(|item| item.id == id);
        }
        self.slot_entry(location).and_then(|entry| entry.as_mut())
    }

    /// Remove a tracked item from wherever it is
    pub(super) fn take(&mut self, id: ItemId) -> Option<Item> {
        let location = self.locate(id)?;
        if location == WieldLocation::Backpack {
            let index = self.backpack.iter().position(|item| item.id == id)?;
            return Some(self.backpack.remove(index));
        }
        self.slot_entry(location).and_then(|entry| entry.take())
    }
}
