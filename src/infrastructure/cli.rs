//! Command line front-end
//!
//! A thin consumer of the dice service: it parses formulas, forwards to the
//! service and prints results. It owns presentation only.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};

use crate::application::services::DiceRollService;
use crate::domain::services::{format_configuration, parse_dice_formula};
use crate::domain::value_objects::{ConfigurationId, Die, RollRequest, DICE_TYPES, QUANTITY_RANGE};
use crate::infrastructure::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "dicey", author, version, about = "Roll dice, save configurations, review history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Quick roll a formula such as `2d6 + 1d20-3`
    Roll {
        #[arg(required = true, num_args = 1.., value_name = "FORMULA")]
        formula: Vec<String>,
        /// Ignore group modifiers for this roll
        #[arg(long)]
        no_modifiers: bool,
    },
    /// Roll a saved configuration
    RollSaved {
        id: String,
        /// Ignore group modifiers for this roll
        #[arg(long)]
        no_modifiers: bool,
    },
    /// Save a named configuration
    Save {
        name: String,
        #[arg(required = true, num_args = 1.., value_name = "FORMULA")]
        formula: Vec<String>,
    },
    /// List saved configurations
    List,
    /// Delete a saved configuration
    Delete { id: String },
    /// Show recent rolls
    History {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Remove all roll history
    ClearHistory,
    /// Summarize roll totals across history
    Stats,
    /// Show or change settings
    Settings {
        #[arg(long, value_parser = BoolishValueParser::new(), value_name = "on|off")]
        modifiers: Option<bool>,
        #[arg(long, value_parser = BoolishValueParser::new(), value_name = "on|off")]
        sound: Option<bool>,
        #[arg(long, value_parser = BoolishValueParser::new(), value_name = "on|off")]
        animation: Option<bool>,
        /// Restore default settings
        #[arg(long, conflicts_with_all = ["modifiers", "sound", "animation"])]
        reset: bool,
    },
}

/// Join formula arguments, accepting both `2d6 + 1d8` and `2d6 1d8`
fn parse_formula_args(args: &[String]) -> Result<Vec<Die>> {
    let groups: Vec<&str> = args
        .iter()
        .map(|arg| arg.trim())
        .filter(|arg| !arg.is_empty() && *arg != "+")
        .collect();
    let formula = groups.join(" + ");
    parse_dice_formula(&formula).with_context(|| format!("Could not parse dice formula '{}'", formula))
}

/// Hints for groups outside the builder's standard die types or quantity range.
/// Such groups are still rolled and saved as given.
fn custom_group_notes(dice: &[Die]) -> Vec<String> {
    let mut notes = Vec::new();
    for die in dice {
        if !die.is_standard_type() {
            notes.push(format!(
                "note: {} uses a custom die size (standard: {})",
                die,
                DICE_TYPES.map(|sides| format!("d{}", sides)).join(", ")
            ));
        }
        if !die.is_standard_quantity() {
            notes.push(format!(
                "note: {} rolls more dice than the builder offers ({}-{})",
                die,
                QUANTITY_RANGE.start(),
                QUANTITY_RANGE.end()
            ));
        }
    }
    notes
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Execute one command against the application state, writing output to `out`
pub async fn run<W: Write>(command: Command, state: &AppState, out: &mut W) -> Result<()> {
    let service = &state.dice_service;

    match command {
        Command::Roll {
            formula,
            no_modifiers,
        } => {
            let dice = parse_formula_args(&formula)?;
            let notes = custom_group_notes(&dice);
            let modifiers_enabled = !no_modifiers && state.settings_service.modifiers_enabled().await;
            let result = service
                .roll_and_record(RollRequest::QuickRoll(dice), modifiers_enabled)
                .await?;
            writeln!(out, "{}: {}", result.configuration_name, result.breakdown())?;
            for note in notes {
                writeln!(out, "{}", note)?;
            }
        }
        Command::RollSaved { id, no_modifiers } => {
            let id = ConfigurationId::from(id);
            let Some(configuration) = service.get_configuration(&id).await else {
                bail!("No saved configuration with id {}", id);
            };
            let modifiers_enabled = !no_modifiers && state.settings_service.modifiers_enabled().await;
            let result = service
                .roll_and_record(RollRequest::Saved(configuration), modifiers_enabled)
                .await?;
            writeln!(out, "{}: {}", result.configuration_name, result.breakdown())?;
        }
        Command::Save { name, formula } => {
            let dice = parse_formula_args(&formula)?;
            let notes = custom_group_notes(&dice);
            let configuration = service.save_configuration(&name, dice).await?;
            writeln!(
                out,
                "Saved {} ({}) as {}",
                configuration.name,
                format_configuration(&configuration.dice),
                configuration.id
            )?;
            for note in notes {
                writeln!(out, "{}", note)?;
            }
        }
        Command::List => {
            let configurations = service.list_configurations().await;
            if configurations.is_empty() {
                writeln!(out, "No saved configurations")?;
            }
            for configuration in configurations {
                writeln!(
                    out,
                    "{}  {}  {}  (created {})",
                    configuration.id,
                    configuration.name,
                    format_configuration(&configuration.dice),
                    configuration.created_at.format("%Y-%m-%d")
                )?;
            }
        }
        Command::Delete { id } => {
            let id = ConfigurationId::from(id);
            if service.delete_configuration(&id).await? {
                writeln!(out, "Deleted {}", id)?;
            } else {
                writeln!(out, "No saved configuration with id {}", id)?;
            }
        }
        Command::History { limit } => {
            let history = service.list_history().await;
            if history.is_empty() {
                writeln!(out, "No rolls yet")?;
            }
            for roll in history.iter().take(limit) {
                writeln!(
                    out,
                    "{}  {}  {}  = {}",
                    roll.timestamp.format("%Y-%m-%d %H:%M"),
                    roll.configuration_name,
                    format_configuration(&roll.dice),
                    roll.total
                )?;
            }
        }
        Command::ClearHistory => {
            service.clear_history().await?;
            writeln!(out, "Roll history cleared")?;
        }
        Command::Stats => match service.statistics().await {
            None => writeln!(out, "No roll data yet")?,
            Some(stats) => {
                writeln!(out, "Total rolls: {}", stats.total_rolls)?;
                writeln!(out, "Average total: {:.1}", stats.average)?;
                writeln!(out, "Minimum roll: {}", stats.min)?;
                writeln!(out, "Maximum roll: {}", stats.max)?;
                for frequency in &stats.distribution {
                    let width = (stats.relative_frequency(frequency.count) * 40.0).ceil() as usize;
                    writeln!(
                        out,
                        "{:>6} | {} {}",
                        frequency.total,
                        "#".repeat(width.max(1)),
                        frequency.count
                    )?;
                }
            }
        },
        Command::Settings {
            modifiers,
            sound,
            animation,
            reset,
        } => {
            let settings = if reset {
                state.settings_service.reset().await?
            } else {
                let mut settings = state.settings_service.get().await;
                if modifiers.is_some() || sound.is_some() || animation.is_some() {
                    settings.modifiers_enabled = modifiers.unwrap_or(settings.modifiers_enabled);
                    settings.sound_enabled = sound.unwrap_or(settings.sound_enabled);
                    settings.animation_enabled = animation.unwrap_or(settings.animation_enabled);
                    state.settings_service.update(settings).await?;
                }
                settings
            };
            writeln!(out, "modifiers: {}", on_off(settings.modifiers_enabled))?;
            writeln!(out, "sound: {}", on_off(settings.sound_enabled))?;
            writeln!(out, "animation: {}", on_off(settings.animation_enabled))?;
        }
    }

    Ok(())
}
