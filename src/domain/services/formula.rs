//! Dice formula rendering, parsing and validation
//!
//! The formula text (e.g. "2D6 + 1D20-3") is what saved configurations and history
//! entries display, so rendering must be deterministic for identical input.

use crate::domain::value_objects::{DiceParseError, Die};

const GROUP_SEPARATOR: &str = " + ";

/// The gate applied before a configuration may be saved or rolled: at least one
/// group, and every group with non-zero quantity and sides
pub fn is_valid_configuration(dice: &[Die]) -> bool {
    !dice.is_empty() && dice.iter().all(Die::is_valid)
}

/// Render groups as "{quantity}D{sides}" with a signed modifier when non-zero, joined by " + "
pub fn format_configuration(dice: &[Die]) -> String {
    dice.iter()
        .map(Die::to_string)
        .collect::<Vec<_>>()
        .join(GROUP_SEPARATOR)
}

/// Parse a multi-group formula as produced by [`format_configuration`]
///
/// Groups are separated by whitespace-surrounded '+'; a '+' without surrounding
/// whitespace belongs to the preceding group's modifier ("1d20+5").
pub fn parse_dice_formula(input: &str) -> Result<Vec<Die>, DiceParseError> {
    if input.trim().is_empty() {
        return Err(DiceParseError::Empty);
    }

    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .split(GROUP_SEPARATOR)
        .map(str::parse)
        .collect()
}
