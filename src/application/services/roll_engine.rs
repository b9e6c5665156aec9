//! Roll engine - Turns a dice configuration into a roll result
//!
//! Pure with respect to storage: the engine only draws faces and reads the clock.
//! Recording the result is the dice service's job.

use std::sync::Arc;

use crate::application::ports::outbound::{ClockPort, RandomPort};
use crate::domain::entities::{DiceConfiguration, RollResult};
use crate::domain::errors::DiceError;
use crate::domain::value_objects::RollId;

pub struct RollEngine {
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl RollEngine {
    pub fn new(random: Arc<dyn RandomPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { random, clock }
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Roll every die group in order.
    ///
    /// Each group draws `quantity` faces; its effective modifier is the group's
    /// modifier when `modifiers_enabled`, otherwise 0. An empty configuration rolls
    /// to a zero total.
    pub fn roll(
        &self,
        configuration: &DiceConfiguration,
        modifiers_enabled: bool,
    ) -> Result<RollResult, DiceError> {
        let mut results = Vec::with_capacity(configuration.dice.len());
        let mut modifiers = Vec::with_capacity(configuration.dice.len());
        let mut total: i64 = 0;

        for die in &configuration.dice {
            let faces = (0..die.quantity)
                .map(|_| self.random.roll_face(die.sides))
                .collect::<Result<Vec<u32>, DiceError>>()?;
            total += faces.iter().map(|&face| i64::from(face)).sum::<i64>();
            results.push(faces);

            let modifier = if modifiers_enabled { die.modifier } else { 0 };
            total += i64::from(modifier);
            modifiers.push(modifier);
        }

        Ok(RollResult {
            id: RollId::new(),
            configuration_id: configuration.id.clone(),
            configuration_name: configuration.name.clone(),
            dice: configuration.dice.clone(),
            results,
            modifiers,
            total,
            timestamp: self.clock.now(),
        })
    }
}
