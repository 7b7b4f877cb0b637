//! knave - command-line front end for the rules core

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knave::chargen::CharacterSheet;
use knave::living::{Entity, Living};
use knave::rules::{Ability, RandomTable, RollEngine, SaveQuality};
use knave::{Config, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "knave", version, about = "Knave dice, saves, tables and characters")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed the dice (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Roll a dice expression such as 2d6
    Roll {
        expression: String,
        /// How many times to roll
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Roll a saving throw
    Save {
        /// Base ability, e.g. STR or dexterity (armor and weapon come from equipment)
        #[arg(long, default_value = "strength")]
        ability: String,
        /// Bonus in that ability
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        bonus: i32,
        /// Number to beat
        #[arg(long, default_value_t = 15)]
        target: i32,
        #[arg(long)]
        advantage: bool,
        #[arg(long)]
        disadvantage: bool,
    },
    /// Roll on a table given as rows: "1-5=outcome" ranges, or plain outcomes
    Table {
        expression: String,
        #[arg(required = true)]
        rows: Vec<String>,
    },
    /// Generate a character
    Chargen {
        /// Print the sheet as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a character, drop it to zero health and resolve its defeat
    Death,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "knave=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn parse_table(rows: &[String]) -> Result<RandomTable<String>> {
    if !rows.iter().any(|row| row.contains('=')) {
        return Ok(RandomTable::flat(rows.iter().cloned()));
    }

    let ranged = rows
        .iter()
        .map(|row| {
            row.split_once('=')
                .map(|(range, outcome)| (range.to_string(), outcome.to_string()))
                .ok_or_else(|| anyhow!("row {:?} has no range; use lo-hi=outcome", row))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(RandomTable::ranged(ranged)?)
}

/// Parse the ability a command-line save rolls on; only base abilities take a bonus
fn save_ability(name: &str) -> Result<Ability> {
    let axis: Ability = name
        .parse()
        .map_err(|_| anyhow!("unknown ability: {}", name))?;
    if !axis.is_base() {
        bail!(
            "{} bonuses come from equipment; save on a base ability instead",
            axis
        );
    }
    Ok(axis)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    init_tracing(config.log_format);
    debug!("loaded config: {:?}", config);

    let mut engine = RollEngine::from_config(&config);

    match cli.command {
        Command::Roll { expression, times } => {
            for _ in 0..times {
                println!("{}", engine.roll(&expression)?);
            }
        }
        Command::Save {
            ability,
            bonus,
            target,
            advantage,
            disadvantage,
        } => {
            let axis = save_ability(&ability)?;
            let mut entity = Entity::new("You");
            entity.abilities.set(axis, bonus);

            let result = engine.saving_throw(&entity, axis, target, advantage, disadvantage);
            let quality = match result.quality {
                SaveQuality::CriticalSuccess => " (critical success)",
                SaveQuality::CriticalFailure => " (critical failure)",
                SaveQuality::Normal => "",
            };
            println!(
                "{} + {} vs {}: {}{}",
                result.roll,
                result.bonus,
                result.target,
                if result.succeeded { "success" } else { "failure" },
                quality
            );
        }
        Command::Table { expression, rows } => {
            let table = parse_table(&rows)?;
            println!("{}", engine.roll_random_table(&expression, &table)?);
        }
        Command::Chargen { json } => {
            let sheet = CharacterSheet::generate(&mut engine)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sheet)?);
            } else {
                println!("{}", sheet.show_sheet());
            }
        }
        Command::Death => {
            let mut player = CharacterSheet::generate(&mut engine)?.apply()?;
            player.entity.hp = 0;
            player.entity.drain_notices();

            let outcome = player.defeat(&mut engine, config.lethality());
            for notice in player.entity.drain_notices() {
                println!("{}", notice);
            }
            println!("{}: {:?}", player.entity.name, outcome);
        }
    }

    Ok(())
}
