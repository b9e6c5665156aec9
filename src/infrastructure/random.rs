//! Clock and random implementations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use tracing::warn;

use crate::application::ports::outbound::{ClockPort, RandomPort};
use crate::domain::errors::DiceError;

/// Map a uniform 32-bit word onto `[1, sides]` as `floor(word / 2^32 * sides) + 1`.
///
/// Matches the scaled-floor mapping dice rolls have always used; the bias for
/// non-power-of-two side counts is below 1 in 2^32 / sides.
pub fn scale_to_face(word: u32, sides: u32) -> u32 {
    ((u64::from(word) * u64::from(sides)) >> 32) as u32 + 1
}

fn check_sides(sides: u32) -> Result<(), DiceError> {
    if sides == 0 {
        return Err(DiceError::InvalidSides { sides });
    }
    Ok(())
}

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - OS entropy, falling back to the thread-local generator when the
/// OS source is unavailable.
#[derive(Default)]
pub struct SystemRandom {
    fallback_reported: AtomicBool,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_word(&self) -> u32 {
        let mut bytes = [0u8; 4];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => u32::from_le_bytes(bytes),
            Err(e) => {
                if !self.fallback_reported.swap(true, Ordering::Relaxed) {
                    warn!(error = %e, "OS entropy unavailable, falling back to thread RNG");
                }
                rand::thread_rng().next_u32()
            }
        }
    }
}

impl RandomPort for SystemRandom {
    fn roll_face(&self, sides: u32) -> Result<u32, DiceError> {
        check_sides(sides)?;
        Ok(scale_to_face(self.next_word(), sides))
    }
}

/// Seeded random - reproducible sequences of faces for a given seed.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRandom {
    fn roll_face(&self, sides: u32) -> Result<u32, DiceError> {
        check_sides(sides)?;
        let word = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .next_u32();
        Ok(scale_to_face(word, sides))
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scripted faces for testing, cycled in order and capped at the die's side count.
#[cfg(test)]
pub struct SequenceRandom {
    faces: Vec<u32>,
    next: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(faces: Vec<u32>) -> Self {
        Self {
            faces,
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn roll_face(&self, sides: u32) -> Result<u32, DiceError> {
        check_sides(sides)?;
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        let face = self.faces[index % self.faces.len()];
        Ok(face.clamp(1, sides))
    }
}
