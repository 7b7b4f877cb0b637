//! Random tables
//!
//! Two table shapes are supported:
//! - Flat: an ordered list indexed 1..=N, rolls outside that range are clamped
//! - Ranged: rows keyed by "lo-hi" or a single value, first matching row wins

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::ability::Ability;
use super::dice::RollError;

/// "lo-hi" or "v", both bounds non-negative
static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(?:-\s*(\d+)\s*)?$").unwrap());

/// An inclusive range of roll results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollRange {
    pub low: i32,
    pub high: i32,
}

impl RollRange {
    /// Range covering a single value
    pub fn single(value: i32) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// Check whether a roll falls in this range
    pub fn contains(&self, roll: i32) -> bool {
        self.low <= roll && roll <= self.high
    }
}

impl FromStr for RollRange {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RANGE_REGEX
            .captures(s)
            .ok_or_else(|| RollError::InvalidRange(s.to_string()))?;

        let parse = |m: regex::Match<'_>| {
            m.as_str()
                .parse::<i32>()
                .map_err(|_| RollError::InvalidRange(s.to_string()))
        };

        let low = match caps.get(1) {
            Some(m) => parse(m)?,
            None => return Err(RollError::InvalidRange(s.to_string())),
        };
        let high = match caps.get(2) {
            Some(m) => parse(m)?,
            None => low,
        };

        if high < low {
            return Err(RollError::InvalidRange(s.to_string()));
        }

        Ok(Self { low, high })
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// A table of outcomes selected by a die roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomTable<T> {
    Flat(Vec<T>),
    Ranged(Vec<(RollRange, T)>),
}

impl<T> RandomTable<T> {
    /// Build a flat table
    pub fn flat(outcomes: impl IntoIterator<Item = T>) -> Self {
        RandomTable::Flat(outcomes.into_iter().collect())
    }

    /// Build a ranged table from ("lo-hi", outcome) rows
    pub fn ranged<S: AsRef<str>>(
        rows: impl IntoIterator<Item = (S, T)>,
    ) -> Result<Self, RollError> {
        let rows = rows
            .into_iter()
            .map(|(range, outcome)| Ok((range.as_ref().parse::<RollRange>()?, outcome)))
            .collect::<Result<Vec<_>, RollError>>()?;
        Ok(RandomTable::Ranged(rows))
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            RandomTable::Flat(rows) => rows.len(),
            RandomTable::Ranged(rows) => rows.len(),
        }
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Select the outcome for a roll result, if any row matches
    pub fn lookup(&self, roll: i32) -> Option<&T> {
        match self {
            RandomTable::Flat(rows) => {
                if rows.is_empty() {
                    return None;
                }
                let index = roll.clamp(1, rows.len() as i32) as usize - 1;
                rows.get(index)
            }
            RandomTable::Ranged(rows) => rows
                .iter()
                .find(|(range, _)| range.contains(roll))
                .map(|(_, outcome)| outcome),
        }
    }
}

/// Outcome of a row on the death table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathRow {
    /// The character dies outright
    Dead,
    /// The character may survive by losing points of this ability
    Lose(Ability),
}

impl fmt::Display for DeathRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathRow::Dead => write!(f, "dead"),
            DeathRow::Lose(ability) => write!(f, "{}", ability),
        }
    }
}

/// Die rolled on the death table
pub const DEATH_DICE: &str = "1d8";

/// One row per face of the d8
const DEATH_ROWS: [(i32, DeathRow); 8] = [
    (1, DeathRow::Dead),
    (2, DeathRow::Dead),
    (3, DeathRow::Lose(Ability::Endurance)),
    (4, DeathRow::Lose(Ability::Strength)),
    (5, DeathRow::Lose(Ability::Dexterity)),
    (6, DeathRow::Lose(Ability::Intelligence)),
    (7, DeathRow::Lose(Ability::Perception)),
    (8, DeathRow::Lose(Ability::Willpower)),
];

/// The death/maiming table
pub fn death_table() -> RandomTable<DeathRow> {
    RandomTable::Ranged(
        DEATH_ROWS
            .iter()
            .map(|&(face, row)| (RollRange::single(face), row))
            .collect(),
    )
}
