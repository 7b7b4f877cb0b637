//! The roll engine
//!
//! One engine value is constructed at startup and passed by `&mut` to every
//! consumer. It owns the random source, so swapping in a `ScriptedRandom`
//! makes every roll in a test deterministic.

use std::fmt;

use tracing::{debug, info};

use super::ability::Ability;
use super::dice::{is_critical, is_fumble, parse_dice, DiceRoll, RandomSource, RollError, ScriptedRandom, SeededRandom};
use super::tables::{death_table, DeathRow, RandomTable, DEATH_DICE};
use crate::living::{Creature, Entity, Notice};
use crate::Config;

/// Lowest value an ability may be reduced to by the death table
pub const ABILITY_FLOOR: i32 = -10;

/// Added to the defender's bonus to get the target of an opposed throw
pub const OPPOSED_BASE: i32 = 10;

/// Natural-roll quality of a saving throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveQuality {
    #[default]
    Normal,
    CriticalFailure,
    CriticalSuccess,
}

impl SaveQuality {
    /// Quality of a natural d20 result
    pub fn from_natural(roll: i32) -> Self {
        if is_fumble(roll) {
            SaveQuality::CriticalFailure
        } else if is_critical(roll) {
            SaveQuality::CriticalSuccess
        } else {
            SaveQuality::Normal
        }
    }
}

/// Result of a saving throw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingThrowResult {
    /// Whether roll + bonus beat the target
    pub succeeded: bool,
    /// Critical quality of the natural roll
    pub quality: SaveQuality,
    /// The retained natural d20
    pub roll: i32,
    /// Ability bonus added to the roll
    pub bonus: i32,
    /// Number that had to be exceeded
    pub target: i32,
}

impl SavingThrowResult {
    /// Roll plus bonus
    pub fn total(&self) -> i32 {
        self.roll + self.bonus
    }
}

/// Which branch of the death table was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathOutcome {
    /// Rolled a "dead" row
    Dead,
    /// The ability loss would have dropped the ability below the floor
    Died { ability: Ability, loss: i32 },
    /// Survived with a permanent ability loss and a little healing
    Survived {
        ability: Ability,
        loss: i32,
        healed: i32,
    },
}

impl DeathOutcome {
    /// Whether the entity is dead after this outcome
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DeathOutcome::Survived { .. })
    }
}

/// Dice, saving throws, random tables and the death table
pub struct RollEngine {
    source: Box<dyn RandomSource>,
}

impl fmt::Debug for RollEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollEngine").finish_non_exhaustive()
    }
}

impl RollEngine {
    /// Create an engine drawing from the given source
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Create an engine that replays the same rolls for the same seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededRandom::new(seed))
    }

    /// Create an engine with a random seed
    pub fn from_entropy() -> Self {
        let source = SeededRandom::from_entropy();
        debug!("roll engine seeded with {}", source.seed());
        Self::new(source)
    }

    /// Create an engine returning a fixed sequence of draws
    pub fn scripted(draws: impl IntoIterator<Item = u32>) -> Self {
        Self::new(ScriptedRandom::new(draws))
    }

    /// Create an engine from configuration (seeded when a seed is configured)
    pub fn from_config(config: &Config) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Roll a parsed dice specification
    pub fn roll_dice(&mut self, dice: DiceRoll) -> i32 {
        dice.roll(self.source.as_mut())
    }

    /// Roll a dice expression such as "2d6"
    pub fn roll(&mut self, expression: &str) -> Result<i32, RollError> {
        let dice = parse_dice(expression)?;
        let result = self.roll_dice(dice);
        debug!("rolled {} = {}", dice, result);
        Ok(result)
    }

    /// Roll a single d20
    pub fn roll_d20(&mut self) -> i32 {
        self.roll_dice(DiceRoll::new(1, 20))
    }

    /// Roll a d20 with advantage (best of two) or disadvantage (worst of two).
    ///
    /// When both or neither apply, a single fresh d20 is rolled.
    pub fn roll_with_advantage(&mut self, advantage: bool, disadvantage: bool) -> i32 {
        match (advantage, disadvantage) {
            (true, false) => {
                let first = self.roll_d20();
                let second = self.roll_d20();
                first.max(second)
            }
            (false, true) => {
                let first = self.roll_d20();
                let second = self.roll_d20();
                first.min(second)
            }
            _ => self.roll_d20(),
        }
    }

    /// Roll a saving throw, trying to beat `target` with the entity's `axis` bonus
    pub fn saving_throw(
        &mut self,
        entity: &Entity,
        axis: Ability,
        target: i32,
        advantage: bool,
        disadvantage: bool,
    ) -> SavingThrowResult {
        let roll = self.roll_with_advantage(advantage, disadvantage);
        let quality = SaveQuality::from_natural(roll);
        let bonus = entity.bonus(axis);
        let succeeded = roll + bonus > target;

        debug!(
            "{} saves on {}: {} + {} vs {} -> {}",
            entity.name,
            axis,
            roll,
            bonus,
            target,
            if succeeded { "success" } else { "failure" }
        );

        SavingThrowResult {
            succeeded,
            quality,
            roll,
            bonus,
            target,
        }
    }

    /// Roll a saving throw against a target set by the defender's `defense` bonus
    pub fn opposed_saving_throw(
        &mut self,
        attacker: &Entity,
        defender: &Entity,
        attack: Ability,
        defense: Ability,
        advantage: bool,
        disadvantage: bool,
    ) -> SavingThrowResult {
        let target = defender.bonus(defense) + OPPOSED_BASE;
        self.saving_throw(attacker, attack, target, advantage, disadvantage)
    }

    /// Check whether a creature holds its nerve (2d6 at or under its morale)
    pub fn morale_check(&mut self, creature: &Creature) -> bool {
        self.roll_dice(DiceRoll::new(2, 6)) <= creature.morale
    }

    /// A night's rest restores 1d8 + endurance health
    pub fn heal_from_rest(&mut self, entity: &mut Entity) -> i32 {
        let amount = self.roll_dice(DiceRoll::new(1, 8)) + entity.abilities.endurance;
        entity.heal(amount)
    }

    /// Roll `expression` and select the matching outcome from `table`
    pub fn roll_random_table<'t, T>(
        &mut self,
        expression: &str,
        table: &'t RandomTable<T>,
    ) -> Result<&'t T, RollError> {
        if table.is_empty() {
            return Err(RollError::EmptyTable);
        }

        let roll = self.roll(expression)?;
        table.lookup(roll).ok_or_else(|| RollError::OutOfRangeRoll {
            expression: expression.to_string(),
            roll,
        })
    }

    /// Roll on the death table for an entity brought to zero health
    pub fn resolve_death(&mut self, entity: &mut Entity) -> Result<DeathOutcome, RollError> {
        let table = death_table();
        let row = *self.roll_random_table(DEATH_DICE, &table)?;

        let ability = match row {
            DeathRow::Dead => {
                info!("{} rolled death", entity.name);
                entity.mark_dead();
                return Ok(DeathOutcome::Dead);
            }
            DeathRow::Lose(ability) => ability,
        };

        let loss = self.roll("1d4")?;
        let reduced = entity.abilities.get(ability) - loss;

        if reduced < ABILITY_FLOOR {
            info!("{} died from losing {} {}", entity.name, loss, ability);
            entity.mark_dead();
            return Ok(DeathOutcome::Died { ability, loss });
        }

        let recovery = self.roll("1d4")?;
        let healed = entity.heal(recovery);
        entity.abilities.set(ability, reduced);
        entity.notify(Notice::SurvivedDeath { ability, loss });
        info!("{} survived death, losing {} {}", entity.name, loss, ability);

        Ok(DeathOutcome::Survived {
            ability,
            loss,
            healed,
        })
    }
}
