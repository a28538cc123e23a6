//! Dice rolling and the move budget of a roll.
//!
//! Randomness sits behind the [`DiceSource`] trait so a game can be driven
//! by a seeded generator or a fixed script.

use crate::game::GameError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest face of a die
pub const DIE_FACES: u8 = 6;

/// Anything that can produce single die values in `1..=6`
pub trait DiceSource {
    /// Draw one die value
    fn roll_die(&mut self) -> u8;
}

/// Uniform dice backed by a standard RNG
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible dice for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DiceSource for RandomDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// A scripted sequence of die values, repeated once exhausted
#[derive(Debug, Clone)]
pub struct FixedDice {
    values: Vec<u8>,
    cursor: usize,
}

impl FixedDice {
    pub fn new(values: impl Into<Vec<u8>>) -> Result<Self, GameError> {
        let values = values.into();
        if values.is_empty() {
            return Err(GameError::InvalidConfig("dice script is empty".into()));
        }
        if let Some(bad) = values.iter().find(|&&v| !(1..=DIE_FACES).contains(&v)) {
            return Err(GameError::InvalidConfig(format!(
                "die value {} is outside 1..={}",
                bad, DIE_FACES
            )));
        }
        Ok(Self { values, cursor: 0 })
    }

    /// Script whole rolls, each contributing two die values in order
    pub fn rolls(rolls: &[(u8, u8)]) -> Result<Self, GameError> {
        Self::new(rolls.iter().flat_map(|&(a, b)| [a, b]).collect::<Vec<_>>())
    }
}

impl DiceSource for FixedDice {
    fn roll_die(&mut self) -> u8 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// The result of rolling two dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    pub d1: u8,
    pub d2: u8,
}

impl DiceRoll {
    pub fn new(d1: u8, d2: u8) -> Result<Self, GameError> {
        for value in [d1, d2] {
            if !(1..=DIE_FACES).contains(&value) {
                return Err(GameError::InvalidConfig(format!(
                    "die value {} is outside 1..={}",
                    value, DIE_FACES
                )));
            }
        }
        Ok(Self { d1, d2 })
    }

    pub fn is_doubles(&self) -> bool {
        is_doubles(self.d1, self.d2)
    }

    /// The die values this roll lets the player move
    pub fn move_values(&self) -> Vec<u8> {
        move_values(self.d1, self.d2)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.d1, self.d2)
    }
}

/// Roll two independent dice from `source`.
///
/// Fails if the source produces a value outside `1..=6`.
pub fn roll<S: DiceSource + ?Sized>(source: &mut S) -> Result<DiceRoll, GameError> {
    let d1 = source.roll_die();
    let d2 = source.roll_die();
    DiceRoll::new(d1, d2)
}

pub fn is_doubles(d1: u8, d2: u8) -> bool {
    d1 == d2
}

/// Move distances granted by a roll: both values, or four of the value on
/// doubles.
pub fn move_values(d1: u8, d2: u8) -> Vec<u8> {
    if is_doubles(d1, d2) {
        vec![d1; 4]
    } else {
        vec![d1, d2]
    }
}
