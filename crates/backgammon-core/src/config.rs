//! Game options.

use crate::dice::RandomDice;
use crate::game::GameError;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Options fixed for the lifetime of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Who moves first when no opening roll is used
    pub first_player: Player,
    /// Each player rolls one die, the higher moves first and plays both dice
    pub opening_roll: bool,
    /// Hand the turn over as soon as it completes instead of waiting for
    /// `end_turn`
    pub auto_end_turn: bool,
    /// Seed for the default dice; entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_player: Player::White,
            opening_roll: false,
            auto_end_turn: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))
    }

    /// The dice a game uses unless told otherwise
    pub fn dice(&self) -> RandomDice {
        match self.seed {
            Some(seed) => RandomDice::seeded(seed),
            None => RandomDice::from_entropy(),
        }
    }
}
