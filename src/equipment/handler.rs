//! Capacity-aware equipment operations
//!
//! An `EquipmentHandler` borrows an entity's `EquipmentState` together with
//! its current endurance, so capacity is always computed from live stats.

use std::ops::Deref;

use tracing::{debug, warn};

use super::{EquipmentError, EquipmentState};
use crate::objects::{Item, ItemId, WieldLocation};

/// Capacity every entity has before endurance is added
pub const BASE_SLOTS: i32 = 10;

/// Result of equipping an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipOutcome {
    /// Where the item ended up
    pub location: WieldLocation,
    /// Items moved back into the backpack to make room, in eviction order
    pub displaced: Vec<ItemId>,
}

/// Result of using an item
#[derive(Debug, Clone, PartialEq)]
pub enum UseOutcome {
    /// The item still has uses left (or will recharge)
    Used { remaining: u32 },
    /// The item was used up and removed
    UsedUp(Item),
}

/// Mutating view over an entity's equipment
#[derive(Debug)]
pub struct EquipmentHandler<'a> {
    state: &'a mut EquipmentState,
    endurance: i32,
}

impl Deref for EquipmentHandler<'_> {
    type Target = EquipmentState;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl<'a> EquipmentHandler<'a> {
    /// Wrap an equipment state for an owner with the given endurance
    pub fn new(state: &'a mut EquipmentState, endurance: i32) -> Self {
        Self { state, endurance }
    }

    /// Maximum capacity, recomputed on every call
    pub fn max_slots(&self) -> i32 {
        self.endurance.saturating_add(BASE_SLOTS)
    }

    /// Current usage and maximum, for display
    pub fn slot_usage(&self) -> (i32, i32) {
        (self.state.used_slots(), self.max_slots())
    }

    /// Usage rendered as "used/max"
    pub fn display_slot_usage(&self) -> String {
        let (used, max) = self.slot_usage();
        format!("{}/{}", used, max)
    }

    /// Check that an item fits
    pub fn validate_capacity(&self, item: &Item) -> Result<(), EquipmentError> {
        let (used, max) = self.slot_usage();
        if i64::from(used) + i64::from(item.size) > i64::from(max) {
            return Err(EquipmentError::CapacityExceeded {
                remaining: max.saturating_sub(used),
                needed: item.size,
            });
        }
        Ok(())
    }

    /// Put an item at the end of the backpack
    pub fn add_to_backpack(&mut self, item: Item) -> Result<(), EquipmentError> {
        if self.state.contains(item.id) {
            warn!("refusing to add {} twice", item.name);
            return Err(EquipmentError::DuplicateItem(item.id));
        }
        if let Err(e) = self.validate_capacity(&item) {
            debug!("cannot add {}: {}", item.name, e);
            return Err(e);
        }

        debug!("added {} to backpack", item.name);
        self.state.backpack_mut().push(item);
        Ok(())
    }

    /// Take an item out of the backpack
    pub fn remove_from_backpack(&mut self, id: ItemId) -> Result<Item, EquipmentError> {
        self.take_from_backpack(id).map(|(_, item)| item)
    }

    /// Empty a single slot and hand its occupant to the caller
    pub fn unequip(&mut self, location: WieldLocation) -> Result<Item, EquipmentError> {
        let entry = self.state.slot_entry(location).ok_or_else(|| {
            EquipmentError::InvalidSlotTransition(
                "the backpack is not a single-item slot".to_string(),
            )
        })?;
        let item = entry.take().ok_or(EquipmentError::EmptySlot(location))?;

        debug!("unequipped {} from {}", item.name, location);
        Ok(item)
    }

    /// Unequip a slot and put the item back into the backpack
    ///
    /// Size is conserved, so no capacity check is needed.
    pub fn unequip_to_backpack(&mut self, location: WieldLocation) -> Result<ItemId, EquipmentError> {
        let item = self.unequip(location)?;
        let id = item.id;
        self.state.backpack_mut().push(item);
        Ok(id)
    }

    /// Empty a location (the whole backpack by default) and return everything in it
    pub fn unequip_all(&mut self, location: WieldLocation) -> Result<Vec<Item>, EquipmentError> {
        let removed: Vec<Item> = match self.state.slot_entry(location) {
            Some(entry) => entry.take().into_iter().collect(),
            None => self.state.backpack_mut().drain(..).collect(),
        };

        if removed.is_empty() {
            return Err(EquipmentError::NothingToRemove(location));
        }
        debug!("removed {} items from {}", removed.len(), location);
        Ok(removed)
    }

    /// Move a backpack item into the location it belongs to.
    ///
    /// Two-handed items evict both hands; one-handed items and shields evict
    /// a two-handed item; whatever was in the target slot goes back into the
    /// backpack. Backpack-only items stay where they were.
    pub fn equip(&mut self, id: ItemId) -> Result<EquipOutcome, EquipmentError> {
        let (index, item) = self.take_from_backpack(id)?;
        let location = item.slot;
        let name = item.name.clone();

        let mut displaced = Vec::new();
        match location {
            WieldLocation::TwoHands => {
                displaced.extend(self.take_slot(WieldLocation::WeaponHand));
                displaced.extend(self.take_slot(WieldLocation::ShieldHand));
                displaced.extend(self.place(location, item)?);
            }
            WieldLocation::WeaponHand | WieldLocation::ShieldHand => {
                displaced.extend(self.take_slot(WieldLocation::TwoHands));
                displaced.extend(self.place(location, item)?);
            }
            WieldLocation::Backpack => {
                self.state.backpack_mut().insert(index, item);
                return Ok(EquipOutcome {
                    location,
                    displaced: Vec::new(),
                });
            }
            WieldLocation::Body | WieldLocation::Head => {
                displaced.extend(self.place(location, item)?);
            }
        }

        let displaced_ids = displaced.iter().map(|item| item.id).collect();
        self.state.backpack_mut().extend(displaced);

        if !self.state.hands_consistent() {
            return Err(EquipmentError::InvalidSlotTransition(format!(
                "equipping {} left both hand slots and two hands occupied",
                name
            )));
        }

        debug!("equipped {} to {}", name, location);
        Ok(EquipOutcome {
            location,
            displaced: displaced_ids,
        })
    }

    /// Spend one use of an item; consumables that run out are removed
    pub fn use_item(&mut self, id: ItemId) -> Result<UseOutcome, EquipmentError> {
        let item = self
            .state
            .get_mut(id)
            .ok_or(EquipmentError::NotFound(id))?;
        let remaining = match item.uses {
            Some(uses) if uses > 0 => uses - 1,
            _ => return Err(EquipmentError::NotUsable(id)),
        };
        item.uses = Some(remaining);

        if remaining == 0 && !item.rechargeable {
            let item = self.state.take(id).ok_or(EquipmentError::NotFound(id))?;
            debug!("{} was used up", item.name);
            return Ok(UseOutcome::UsedUp(item));
        }
        Ok(UseOutcome::Used { remaining })
    }

    /// Restore every spent rechargeable item, returning how many recharged
    pub fn recharge(&mut self) -> usize {
        let ids: Vec<ItemId> = self.state.list_all().iter().map(|(item, _)| item.id).collect();
        let mut recharged = 0;
        for id in ids {
            if let Some(item) = self.state.get_mut(id) {
                if item.recharge() {
                    recharged += 1;
                }
            }
        }
        recharged
    }

    fn take_from_backpack(&mut self, id: ItemId) -> Result<(usize, Item), EquipmentError> {
        let backpack = self.state.backpack_mut();
        let index = backpack
            .iter()
            .position(|item| item.id == id)
            .ok_or(EquipmentError::NotFound(id))?;
        Ok((index, backpack.remove(index)))
    }

    fn take_slot(&mut self, location: WieldLocation) -> Option<Item> {
        self.state.slot_entry(location).and_then(|entry| entry.take())
    }

    /// Occupy a slot, returning its previous occupant
    fn place(&mut self, location: WieldLocation, item: Item) -> Result<Option<Item>, EquipmentError> {
        let entry = self.state.slot_entry(location).ok_or_else(|| {
            EquipmentError::InvalidSlotTransition(format!("{} is not a slot", location))
        })?;
        Ok(entry.replace(item))
    }
}
