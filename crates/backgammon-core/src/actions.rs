//! Commands a host can issue and the events they produce.
//!
//! Every command returns its events in order. Hosts that prefer a push
//! model register a [`GameListener`] and receive the same events.

use crate::dice::DiceRoll;
use crate::moves::{Destination, Origin};
use crate::player::Player;
use crate::win::WinKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All commands the engine accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Begin a game from the opening position
    StartGame,
    /// Roll the dice at the start of a turn
    RollDice,
    /// Move one checker using one of the remaining dice
    ProposeMove { from: Origin, to: Destination },
    /// Pass the turn once it is complete
    EndTurn,
    /// Abandon the current game
    ResetGame,
}

impl GameAction {
    /// Operation this action performs, as named in logs and errors
    pub fn command(&self) -> Command {
        match self {
            GameAction::StartGame => Command::StartGame,
            GameAction::RollDice => Command::RollDice,
            GameAction::ProposeMove { .. } => Command::ProposeMove,
            GameAction::EndTurn => Command::EndTurn,
            GameAction::ResetGame => Command::ResetGame,
        }
    }
}

/// Operation named in state errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    StartGame,
    RollDice,
    ProposeMove,
    EndTurn,
    ResetGame,
    QueryMoves,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::StartGame => "start a game",
            Command::RollDice => "roll dice",
            Command::ProposeMove => "move",
            Command::EndTurn => "end the turn",
            Command::ResetGame => "reset the game",
            Command::QueryMoves => "list moves",
        };
        f.write_str(name)
    }
}

/// Events that occur as a result of commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A game began
    GameStarted { first_player: Player },

    /// Dice were rolled
    DiceRolled { player: Player, roll: DiceRoll },

    /// A checker moved
    MoveApplied {
        player: Player,
        from: Origin,
        to: Destination,
        die: u8,
    },

    /// A lone checker was sent to the bar
    CheckerHit { victim: Player, point: u8 },

    /// A checker left the board
    CheckerBorneOff { player: Player, from: u8 },

    /// The roll could not be used at all
    NoLegalMoves { player: Player, roll: DiceRoll },

    /// Turn passed to the other player
    TurnEnded { player: Player, next_player: Player },

    /// A player bore off their last checker
    GameWon { player: Player, kind: WinKind },

    /// The game was abandoned and the board restored
    GameReset,
}

/// Receives every event a game emits
pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trips_through_json() {
        let action = GameAction::ProposeMove {
            from: Origin::Bar,
            to: Destination::Point(20),
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
        assert_eq!(back.command(), Command::ProposeMove);
    }

    #[test]
    fn test_closure_listener() {
        let mut count = 0;
        {
            let mut listener = |_: &GameEvent| count += 1;
            listener.on_event(&GameEvent::GameReset);
            listener.on_event(&GameEvent::GameReset);
        }
        assert_eq!(count, 2);
    }
}
