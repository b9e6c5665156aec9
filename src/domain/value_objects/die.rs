//! Die group value object and single-group formula parsing
//!
//! Supports group formulas like "1d20+5", "2d6-1", "d100".

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conventional die types offered by the dice builder
pub const DICE_TYPES: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

/// Quantity range offered by the dice builder. The roll engine accepts any positive quantity.
pub const QUANTITY_RANGE: RangeInclusive<u32> = 1..=20;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// One die group: `quantity` dice with `sides` faces, plus a flat modifier added once per group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    pub sides: u32,
    pub quantity: u32,
    /// Absent in records written before modifiers existed
    #[serde(default, skip_serializing_if = "is_zero")]
    pub modifier: i32,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl Die {
    pub fn new(sides: u32, quantity: u32) -> Self {
        Self {
            sides,
            quantity,
            modifier: 0,
        }
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Whether this group passes the configuration gate (non-zero sides and quantity)
    pub fn is_valid(&self) -> bool {
        self.quantity > 0 && self.sides > 0
    }

    /// Whether the side count is one of the builder's standard die types
    pub fn is_standard_type(&self) -> bool {
        DICE_TYPES.contains(&self.sides)
    }

    /// Whether the quantity lies inside the builder's offered range
    pub fn is_standard_quantity(&self) -> bool {
        QUANTITY_RANGE.contains(&self.quantity)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D{}", self.quantity, self.sides)?;
        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)?;
        }
        Ok(())
    }
}

impl FromStr for Die {
    type Err = DiceParseError;

    /// Parse a group formula string like "1d20+5", "2D6-1", "d100"
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let count_str = &input[..d_pos];
        let quantity: u32 = if count_str.is_empty() {
            1
        } else {
            count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
            })?
        };
        if quantity == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }

        let after_d = &input[d_pos + 1..];
        let (sides_str, modifier) = match after_d.find(['+', '-']) {
            Some(0) => {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Invalid die size: '{}'",
                    after_d
                )))
            }
            Some(pos) => {
                let modifier: i32 = after_d[pos..].parse().map_err(|_| {
                    DiceParseError::InvalidFormat(format!("Invalid modifier: '{}'", &after_d[pos..]))
                })?;
                (&after_d[..pos], modifier)
            }
            None => (after_d, 0),
        };

        let sides: u32 = sides_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", sides_str))
        })?;
        if sides < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }

        Ok(Self {
            sides,
            quantity,
            modifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let die: Die = "2d6".parse().unwrap();
        assert_eq!(die, Die::new(6, 2));
    }

    #[test]
    fn test_parse_shorthand_and_case() {
        let die: Die = " D20 ".parse().unwrap();
        assert_eq!(die, Die::new(20, 1));
    }

    #[test]
    fn test_parse_modifiers() {
        let die: Die = "1d20+5".parse().unwrap();
        assert_eq!(die.modifier, 5);
        let die: Die = "3d8-2".parse().unwrap();
        assert_eq!(die, Die::new(8, 3).with_modifier(-2));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Die>(), Err(DiceParseError::Empty));
        assert_eq!("0d6".parse::<Die>(), Err(DiceParseError::InvalidDiceCount));
        assert_eq!("1d1".parse::<Die>(), Err(DiceParseError::InvalidDieSize));
        assert!(matches!("20".parse::<Die>(), Err(DiceParseError::InvalidFormat(_))));
        assert!(matches!("1d-4".parse::<Die>(), Err(DiceParseError::InvalidFormat(_))));
        assert!(matches!("1d6+x".parse::<Die>(), Err(DiceParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Die::new(6, 2).to_string(), "2D6");
        assert_eq!(Die::new(20, 1).with_modifier(5).to_string(), "1D20+5");
        assert_eq!(Die::new(20, 1).with_modifier(-3).to_string(), "1D20-3");
    }

    #[test]
    fn test_missing_modifier_defaults_to_zero() {
        let die: Die = serde_json::from_str(r#"{"sides":6,"quantity":3}"#).unwrap();
        assert_eq!(die.modifier, 0);
        assert_eq!(serde_json::to_string(&die).unwrap(), r#"{"sides":6,"quantity":3}"#);
    }

    #[test]
    fn test_builder_ranges() {
        assert!(Die::new(6, 3).is_standard_type());
        assert!(!Die::new(7, 1).is_standard_type());
        assert!(Die::new(20, 20).is_standard_quantity());
        assert!(!Die::new(20, 21).is_standard_quantity());

        // Custom sizes outside the builder ranges are still valid groups
        let huge = Die::new(u32::MAX, u32::MAX);
        assert!(huge.is_valid());
        assert!(!huge.is_standard_type());
        assert!(!huge.is_standard_quantity());
    }
}
