//! Equipment module
//!
//! Tracks what a character carries and wears:
//! - Five single-item slots (weapon hand, shield hand, two hands, body, head)
//! - An ordered backpack
//! - Size-based capacity (endurance + 10)
//! - Two-handed vs one-handed conflict resolution when equipping

mod handler;
mod state;

use thiserror::Error;

use crate::objects::{ItemId, WieldLocation};

pub use handler::{EquipOutcome, EquipmentHandler, UseOutcome, BASE_SLOTS};
pub use state::{EquipmentState, UNARMORED_BONUS};

/// Equipment errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipmentError {
    #[error("equipment full ({remaining} slots remaining, item needs {needed})")]
    CapacityExceeded { remaining: i32, needed: u32 },

    #[error("item {0} is already carried")]
    DuplicateItem(ItemId),

    #[error("item {0} is not carried there")]
    NotFound(ItemId),

    #[error("there's nothing equipped in the {0}")]
    EmptySlot(WieldLocation),

    #[error("there's nothing to remove from the {0}")]
    NothingToRemove(WieldLocation),

    #[error("item {0} cannot be used right now")]
    NotUsable(ItemId),

    #[error("invalid slot transition: {0}")]
    InvalidSlotTransition(String),
}
