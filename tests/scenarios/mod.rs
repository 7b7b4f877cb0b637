//! Scenario tests
//!
//! Play scenarios covering:
//! - Equipment: filling up, swapping weapons, capacity and uniqueness
//! - Death: defeats in lethal and non-lethal places
//! - Combat: fights to the finish and looting the loser
//! - Chargen: from rolled sheet to playable character

pub mod chargen;
pub mod combat;
pub mod death;
pub mod equipment;
