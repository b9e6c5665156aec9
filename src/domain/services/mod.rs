//! Domain services - Pure business logic operations

mod formula;

pub use formula::{format_configuration, is_valid_configuration, parse_dice_formula};
