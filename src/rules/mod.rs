//! Rules module
//!
//! Implements the Knave resolution rules:
//! - Dice rolling ("2d6", "1d20") against a pluggable random source
//! - Advantage/disadvantage and saving throws (single and opposed)
//! - Flat and ranged random tables
//! - The death/maiming table

mod ability;
mod dice;
mod engine;
mod tables;

pub use ability::Ability;
pub use dice::{
    is_critical, is_fumble, parse_dice, DiceRoll, RandomSource, RollError, ScriptedRandom,
    SeededRandom,
};
pub use engine::{
    DeathOutcome, RollEngine, SaveQuality, SavingThrowResult, ABILITY_FLOOR, OPPOSED_BASE,
};
pub use tables::{death_table, DeathRow, RandomTable, RollRange, DEATH_DICE};
