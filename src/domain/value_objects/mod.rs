//! Value objects - Immutable objects defined by their attributes

mod die;
mod ids;
mod roll_request;
mod settings;
mod statistics;

pub use die::{DiceParseError, Die, DICE_TYPES, QUANTITY_RANGE};
pub use ids::{ConfigurationId, RollId, QUICK_ROLL_ID, QUICK_ROLL_NAME};
pub use roll_request::RollRequest;
pub use settings::DiceSettings;
pub use statistics::{RollStatistics, TotalFrequency};
