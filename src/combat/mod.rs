//! Combat resolution
//!
//! Ties the roll engine, living things and equipment together:
//! - Opposed attack throws with the current weapon
//! - Damage, critical hits and defeat dispatch
//! - Looting defeated foes

mod attack;
mod damage;

pub use attack::{attack, loot_defeated, AttackReport};
pub use damage::{apply_damage, DamageResult};
