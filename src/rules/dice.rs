//! Dice notation and random sources
//!
//! Parses dice notation of the form "NdS" (e.g. "2d6", "1d20") and provides
//! the uniform integer generators every roll draws from:
//! - `SeededRandom` for play (optionally seeded for reproducible sessions)
//! - `ScriptedRandom` for tests that need to force exact draws

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors raised while rolling dice or resolving random tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollError {
    #[error("invalid dice expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    #[error("roll of {roll} on {expression} is outside every table row")]
    OutOfRangeRoll { expression: String, roll: i32 },

    #[error("invalid table range '{0}'")]
    InvalidRange(String),

    #[error("random table has no rows")]
    EmptyTable,
}

impl RollError {
    fn invalid(expression: &str, reason: impl Into<String>) -> Self {
        RollError::InvalidExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

/// A parsed dice roll specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
}

impl DiceRoll {
    /// Create a new dice roll
    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Roll the dice against a random source and return the total
    ///
    /// Totals past `i32::MAX` saturate; `parse_dice` never produces such rolls.
    pub fn roll(&self, source: &mut dyn RandomSource) -> i32 {
        let total = (0..self.count)
            .map(|_| u64::from(source.roll_die(self.sides)))
            .fold(0u64, u64::saturating_add);
        i32::try_from(total).unwrap_or(i32::MAX)
    }

    /// Roll and return the individual die results
    pub fn roll_detailed(&self, source: &mut dyn RandomSource) -> Vec<u32> {
        (0..self.count).map(|_| source.roll_die(self.sides)).collect()
    }

    /// Get the minimum possible result
    pub fn min(&self) -> i32 {
        i32::try_from(self.count).unwrap_or(i32::MAX)
    }

    /// Get the maximum possible result
    pub fn max(&self) -> i32 {
        self.count
            .checked_mul(self.sides)
            .and_then(|max| i32::try_from(max).ok())
            .unwrap_or(i32::MAX)
    }
}

impl FromStr for DiceRoll {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Parse a dice notation string like "2d6"
pub fn parse_dice(notation: &str) -> Result<DiceRoll, RollError> {
    let normalized = notation.trim().to_lowercase();

    // Split on the first 'd' only
    let (count_str, sides_str) = normalized
        .split_once('d')
        .ok_or_else(|| RollError::invalid(notation, "missing 'd' separator"))?;

    let count: u32 = count_str
        .parse()
        .map_err(|_| RollError::invalid(notation, format!("invalid dice count '{}'", count_str)))?;
    if count == 0 {
        return Err(RollError::invalid(notation, "dice count must be at least 1"));
    }

    let sides: u32 = sides_str
        .parse()
        .map_err(|_| RollError::invalid(notation, format!("invalid die sides '{}'", sides_str)))?;
    if sides == 0 {
        return Err(RollError::invalid(notation, "die sides must be at least 1"));
    }

    let fits = count
        .checked_mul(sides)
        .is_some_and(|max| i32::try_from(max).is_ok());
    if !fits {
        return Err(RollError::invalid(notation, "largest total does not fit in an i32"));
    }

    Ok(DiceRoll { count, sides })
}

/// A uniform integer generator
pub trait RandomSource {
    /// Draw a single die, uniform over `1..=sides`
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// Random source backed by a seedable `StdRng`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
    seed: u64,
}

impl SeededRandom {
    /// Create a source that replays the same draws for the same seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a source with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the seed used to create this source
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}

/// Random source that returns a fixed sequence of draws
///
/// Values are returned verbatim regardless of the die size, so tests can
/// force results a real die could never produce.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<u32>,
}

impl ScriptedRandom {
    /// Create a source from the draws it should return, in order
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Queue more draws
    pub fn push(&mut self, draw: u32) {
        self.draws.push_back(draw);
    }

    /// Number of draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    /// # Panics
    /// Panics when the script runs out; a test consumed more draws than it forced.
    fn roll_die(&mut self, sides: u32) -> u32 {
        match self.draws.pop_front() {
            Some(draw) => draw,
            None => panic!("scripted random source exhausted (rolling 1d{})", sides),
        }
    }
}

/// Check if a d20 roll is a natural 20
pub fn is_critical(roll: i32) -> bool {
    roll == 20
}

/// Check if a d20 roll is a natural 1
pub fn is_fumble(roll: i32) -> bool {
    roll == 1
}
