//! Core game state machine.
//!
//! This module contains the `Game` struct, the turn phases and all command
//! handling. A turn runs `AwaitingRoll → RollInProgress → SelectingMoves →
//! TurnComplete` and then hands over to the other player's `AwaitingRoll`,
//! unless the mover has borne off everything and the game is over.

use crate::actions::{Command, GameAction, GameEvent, GameListener};
use crate::board::Board;
use crate::config::GameConfig;
use crate::dice::{self, DiceRoll, DiceSource};
use crate::legality::{self, MoveSequence};
use crate::moves::{self, Destination, Move, Origin};
use crate::player::Player;
use crate::win::{self, WinKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Tied opening rolls tolerated before the dice source is rejected
const MAX_OPENING_ROLLS: usize = 100;

/// Phase of the turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board is set up but play has not begun
    NotStarted,

    /// The current player must roll
    AwaitingRoll,

    /// Dice are rolled and legal moves are being computed
    RollInProgress { roll: DiceRoll },

    /// The current player is choosing moves for the remaining dice
    SelectingMoves,

    /// No dice remain usable; waiting for the turn to be ended
    TurnComplete,

    /// Game is over
    GameOver { winner: Player, kind: WinKind },
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::NotStarted => write!(f, "the game has not started"),
            GamePhase::AwaitingRoll => write!(f, "awaiting a roll"),
            GamePhase::RollInProgress { roll } => write!(f, "rolling {}", roll),
            GamePhase::SelectingMoves => write!(f, "selecting moves"),
            GamePhase::TurnComplete => write!(f, "the turn is complete"),
            GamePhase::GameOver { winner, .. } => write!(f, "the game is over ({} won)", winner),
        }
    }
}

/// Errors that can occur when issuing commands
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("cannot {action} while {phase}")]
    InvalidState { action: Command, phase: GamePhase },

    #[error("{player} does not hold the turn")]
    NotYourTurn { player: Player },

    #[error("illegal move {from}/{to}")]
    IllegalMove { from: Origin, to: Destination },

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// Whether the error reports a command issued in the wrong state
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            GameError::InvalidState { .. } | GameError::NotYourTurn { .. }
        )
    }
}

/// State of the turn in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    player: Player,
    roll: DiceRoll,
    /// Die values not yet used
    remaining: Vec<u8>,
    /// Moves already applied this turn
    played: Vec<Move>,
    /// Moves that may be played next
    legal: Vec<Move>,
}

impl Turn {
    /// Player whose turn this is
    pub fn player(&self) -> Player {
        self.player
    }

    /// Dice rolled at the start of the turn
    pub fn roll(&self) -> DiceRoll {
        self.roll
    }

    /// Die values not yet used
    pub fn remaining(&self) -> &[u8] {
        &self.remaining
    }

    /// Moves applied so far this turn
    pub fn played(&self) -> &[Move] {
        &self.played
    }

    /// Moves that may be played next
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }
}

/// Serializable view of a game for hosts and renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Player,
    pub phase: GamePhase,
    pub turn: Option<Turn>,
    pub turn_number: u32,
}

/// A single game of backgammon
pub struct Game {
    board: Board,
    current_player: Player,
    phase: GamePhase,
    turn: Option<Turn>,
    /// Turn number (starts at 1 once play begins)
    turn_number: u32,
    config: GameConfig,
    dice: Box<dyn DiceSource>,
    listeners: Vec<Box<dyn GameListener>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("current_player", &self.current_player)
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("turn_number", &self.turn_number)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a game with default options and random dice
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Create a game whose dice come from the config's seed or entropy
    pub fn with_config(config: GameConfig) -> Self {
        let dice = config.dice();
        Self::with_dice(config, dice)
    }

    /// Create a game with an explicit dice source
    pub fn with_dice(config: GameConfig, dice: impl DiceSource + 'static) -> Self {
        Self {
            board: Board::new(),
            current_player: config.first_player,
            phase: GamePhase::NotStarted,
            turn: None,
            turn_number: 0,
            config,
            dice: Box::new(dice),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for every subsequent event
    pub fn subscribe(&mut self, listener: impl GameListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ==================== Queries ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> Option<&Turn> {
        self.turn.as_ref()
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Die values still to be used this turn
    pub fn remaining_dice(&self) -> &[u8] {
        match &self.turn {
            Some(turn) => &turn.remaining,
            None => &[],
        }
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Get the winner if the game is finished
    pub fn winner(&self) -> Option<Player> {
        if let GamePhase::GameOver { winner, .. } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// Moves the current player may play next
    pub fn legal_moves(&self) -> Result<Vec<Move>, GameError> {
        let turn = self.selecting_turn()?;
        Ok(turn.legal.clone())
    }

    /// Like [`Game::legal_moves`], but fails unless `player` holds the turn
    pub fn legal_moves_for(&self, player: Player) -> Result<Vec<Move>, GameError> {
        if player != self.current_player {
            return Err(GameError::NotYourTurn { player });
        }
        self.legal_moves()
    }

    /// Every distinct way to play out the remaining dice
    pub fn legal_sequences(&self) -> Result<Vec<MoveSequence>, GameError> {
        let turn = self.selecting_turn()?;
        Ok(legality::legal_sequences(
            &self.board,
            turn.player,
            &turn.remaining,
        ))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current_player: self.current_player,
            phase: self.phase,
            turn: self.turn.clone(),
            turn_number: self.turn_number,
        }
    }

    fn selecting_turn(&self) -> Result<&Turn, GameError> {
        match (&self.phase, &self.turn) {
            (GamePhase::SelectingMoves, Some(turn)) => Ok(turn),
            _ => Err(self.invalid(Command::QueryMoves)),
        }
    }

    // ==================== Commands ====================

    /// Apply a command
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        debug!(action = %action.command(), phase = %self.phase, "applying action");
        match action {
            GameAction::StartGame => self.start_game(),
            GameAction::RollDice => self.roll_dice(),
            GameAction::ProposeMove { from, to } => self.propose_move(from, to),
            GameAction::EndTurn => self.end_turn(),
            GameAction::ResetGame => self.reset_game(),
        }
    }

    /// Begin a game from the opening position.
    ///
    /// Allowed before the first game and after a game is over.
    pub fn start_game(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.begin(Board::new(), None)
    }

    /// Begin a game from an arbitrary position with `player` to roll.
    pub fn start_from_position(
        &mut self,
        board: Board,
        player: Player,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.begin(board, Some(player))
    }

    fn begin(&mut self, board: Board, to_move: Option<Player>) -> Result<Vec<GameEvent>, GameError> {
        if !matches!(self.phase, GamePhase::NotStarted | GamePhase::GameOver { .. }) {
            return Err(self.invalid(Command::StartGame));
        }
        board.validate()?;
        if let Some(player) = win::winner(&board) {
            return Err(GameError::InvalidBoard(format!(
                "{} has already borne off every checker",
                player
            )));
        }

        let opening = match to_move {
            None if self.config.opening_roll => Some(self.opening_roll()?),
            _ => None,
        };

        let mut events = Vec::new();
        self.board = board;
        self.turn = None;
        self.turn_number = 1;

        match (to_move, opening) {
            (Some(player), _) => self.open_with_roll_pending(player, &mut events),
            (None, Some((player, roll))) => {
                self.current_player = player;
                info!(first_player = %player, %roll, "game started with opening roll");
                events.push(GameEvent::GameStarted {
                    first_player: player,
                });
                events.push(GameEvent::DiceRolled { player, roll });
                self.phase = GamePhase::RollInProgress { roll };
                self.begin_turn(roll, &mut events);
            }
            (None, None) => self.open_with_roll_pending(self.config.first_player, &mut events),
        }

        Ok(self.publish(events))
    }

    fn open_with_roll_pending(&mut self, player: Player, events: &mut Vec<GameEvent>) {
        self.current_player = player;
        self.phase = GamePhase::AwaitingRoll;
        info!(first_player = %player, "game started");
        events.push(GameEvent::GameStarted {
            first_player: player,
        });
    }

    /// Each side rolls one die until they differ. The higher die moves first
    /// and plays both values.
    fn opening_roll(&mut self) -> Result<(Player, DiceRoll), GameError> {
        for _ in 0..MAX_OPENING_ROLLS {
            let white = self.dice.roll_die();
            let black = self.dice.roll_die();
            if white > black {
                return Ok((Player::White, DiceRoll::new(white, black)?));
            }
            if black > white {
                return Ok((Player::Black, DiceRoll::new(black, white)?));
            }
            DiceRoll::new(white, black)?;
            debug!(value = white, "opening roll tied, rolling again");
        }
        Err(GameError::InvalidConfig(format!(
            "opening roll still tied after {} attempts",
            MAX_OPENING_ROLLS
        )))
    }

    /// Roll the dice for the current player
    pub fn roll_dice(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::AwaitingRoll {
            return Err(self.invalid(Command::RollDice));
        }

        let player = self.current_player;
        let roll = dice::roll(self.dice.as_mut())?;
        debug!(%player, %roll, "dice rolled");

        let mut events = vec![GameEvent::DiceRolled { player, roll }];
        self.phase = GamePhase::RollInProgress { roll };
        self.begin_turn(roll, &mut events);

        Ok(self.publish(events))
    }

    /// Move the checker at `from` to `to` with one of the remaining dice.
    ///
    /// When several dice could make the same move, the smallest one is used.
    pub fn propose_move(
        &mut self,
        from: Origin,
        to: Destination,
    ) -> Result<Vec<GameEvent>, GameError> {
        let player = self.current_player;
        let mv = {
            let turn = match (&self.phase, &self.turn) {
                (GamePhase::SelectingMoves, Some(turn)) => turn,
                _ => return Err(self.invalid(Command::ProposeMove)),
            };
            turn.legal
                .iter()
                .filter(|mv| mv.connects(from, to))
                .min_by_key(|mv| mv.die)
                .copied()
                .ok_or(GameError::IllegalMove { from, to })?
        };

        let outcome = moves::apply(&mut self.board, player, mv)?;
        debug!(%player, %mv, die = mv.die, hit = ?outcome.hit, "move applied");

        let mut events = vec![GameEvent::MoveApplied {
            player,
            from: mv.from,
            to: mv.to,
            die: mv.die,
        }];
        if let Some(point) = outcome.hit {
            events.push(GameEvent::CheckerHit {
                victim: player.opponent(),
                point,
            });
        }
        if let (true, Origin::Point(index)) = (outcome.borne_off, mv.from) {
            events.push(GameEvent::CheckerBorneOff {
                player,
                from: index,
            });
        }

        if let Some(kind) = win::win_kind(&self.board, player) {
            info!(
                winner = %player,
                ?kind,
                points = kind.points(),
                turn = self.turn_number,
                "game won"
            );
            self.phase = GamePhase::GameOver {
                winner: player,
                kind,
            };
            self.turn = None;
            events.push(GameEvent::GameWon { player, kind });
            return Ok(self.publish(events));
        }

        let exhausted = match self.turn.as_mut() {
            Some(turn) => {
                if let Some(slot) = turn.remaining.iter().position(|&d| d == mv.die) {
                    turn.remaining.remove(slot);
                }
                turn.played.push(mv);
                turn.legal = legality::legal_first_moves(&self.board, player, &turn.remaining);
                turn.legal.is_empty()
            }
            None => true,
        };

        if exhausted {
            self.complete_turn(&mut events);
        }

        Ok(self.publish(events))
    }

    /// Pass the turn once all usable dice have been played
    pub fn end_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::TurnComplete {
            return Err(self.invalid(Command::EndTurn));
        }

        let mut events = Vec::new();
        self.pass_turn(&mut events);
        Ok(self.publish(events))
    }

    /// Abandon the current game and restore the opening position
    pub fn reset_game(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.board = Board::new();
        self.current_player = self.config.first_player;
        self.phase = GamePhase::NotStarted;
        self.turn = None;
        self.turn_number = 0;
        info!("game reset");
        Ok(self.publish(vec![GameEvent::GameReset]))
    }

    // ==================== Helper Methods ====================

    /// Compute the legal moves for a fresh roll and enter move selection,
    /// or complete the turn at once if nothing can be played.
    fn begin_turn(&mut self, roll: DiceRoll, events: &mut Vec<GameEvent>) {
        let player = self.current_player;
        let remaining = roll.move_values();
        let legal = legality::legal_first_moves(&self.board, player, &remaining);
        let blocked = legal.is_empty();

        self.turn = Some(Turn {
            player,
            roll,
            remaining,
            played: Vec::new(),
            legal,
        });

        if blocked {
            debug!(%player, %roll, "no legal moves");
            events.push(GameEvent::NoLegalMoves { player, roll });
            self.complete_turn(events);
        } else {
            self.phase = GamePhase::SelectingMoves;
        }
    }

    fn complete_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::TurnComplete;
        if self.config.auto_end_turn {
            self.pass_turn(events);
        }
    }

    fn pass_turn(&mut self, events: &mut Vec<GameEvent>) {
        let player = self.current_player;
        let next_player = player.opponent();
        self.current_player = next_player;
        self.turn = None;
        self.turn_number += 1;
        self.phase = GamePhase::AwaitingRoll;
        debug!(%player, %next_player, turn = self.turn_number, "turn ended");
        events.push(GameEvent::TurnEnded {
            player,
            next_player,
        });
    }

    fn invalid(&self, action: Command) -> GameError {
        GameError::InvalidState {
            action,
            phase: self.phase,
        }
    }

    /// Deliver events to listeners and hand them back to the caller
    fn publish(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        for listener in &mut self.listeners {
            for event in &events {
                listener.on_event(event);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::FixedDice;
    use crate::player::POINT_COUNT;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scripted(rolls: &[(u8, u8)]) -> Game {
        Game::with_dice(GameConfig::default(), FixedDice::rolls(rolls).unwrap())
    }

    fn position(points: &[(usize, i8)], bar: [u8; 2]) -> Board {
        let mut layout = [0; POINT_COUNT];
        for &(index, count) in points {
            layout[index] = count;
        }
        Board::from_points(layout, bar).unwrap()
    }

    #[test]
    fn test_new_game_not_started() {
        let game = Game::new();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.board(), &Board::new());
        assert!(game.turn().is_none());
        assert!(game.remaining_dice().is_empty());
    }

    #[test]
    fn test_start_emits_game_started() {
        let mut game = scripted(&[(6, 5)]);
        let events = game.start_game().unwrap();
        assert_eq!(
            events,
            vec![GameEvent::GameStarted {
                first_player: Player::White
            }]
        );
        assert_eq!(game.phase(), GamePhase::AwaitingRoll);
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let mut game = scripted(&[(6, 5)]);
        game.start_game().unwrap();
        let err = game.start_game().unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_roll_before_start_is_invalid() {
        let mut game = scripted(&[(6, 5)]);
        assert_eq!(
            game.roll_dice(),
            Err(GameError::InvalidState {
                action: Command::RollDice,
                phase: GamePhase::NotStarted,
            })
        );
    }

    #[test]
    fn test_move_before_roll_is_invalid() {
        let mut game = scripted(&[(6, 5)]);
        game.start_game().unwrap();
        let err = game
            .propose_move(Origin::Point(23), Destination::Point(17))
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidState {
                action: Command::ProposeMove,
                phase: GamePhase::AwaitingRoll
            }
        ));
        assert!(game.legal_moves().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_roll_twice_is_invalid() {
        let mut game = scripted(&[(6, 5)]);
        game.start_game().unwrap();
        game.roll_dice().unwrap();
        assert!(game.roll_dice().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_legal_moves_for_other_player() {
        let mut game = scripted(&[(6, 5)]);
        game.start_game().unwrap();
        game.roll_dice().unwrap();
        assert_eq!(
            game.legal_moves_for(Player::Black),
            Err(GameError::NotYourTurn {
                player: Player::Black
            })
        );
        assert!(!game.legal_moves_for(Player::White).unwrap().is_empty());
    }

    #[test]
    fn test_doubles_give_four_dice() {
        let mut game = scripted(&[(3, 3)]);
        game.start_game().unwrap();
        game.roll_dice().unwrap();
        assert_eq!(game.remaining_dice(), &[3, 3, 3, 3]);
        assert_eq!(game.phase(), GamePhase::SelectingMoves);
    }

    #[test]
    fn test_illegal_move_rejected_without_change() {
        let mut game = scripted(&[(6, 5)]);
        game.start_game().unwrap();
        game.roll_dice().unwrap();
        let before = game.snapshot();

        let err = game
            .propose_move(Origin::Point(23), Destination::Point(18))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                from: Origin::Point(23),
                to: Destination::Point(18),
            }
        );
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_end_turn_with_moves_left_is_invalid() {
        let mut game = scripted(&[(6, 5)]);
        game.start_game().unwrap();
        game.roll_dice().unwrap();
        game.propose_move(Origin::Point(23), Destination::Point(17))
            .unwrap();
        assert!(game.end_turn().unwrap_err().is_invalid_state());
        assert_eq!(game.remaining_dice(), &[5]);
    }

    #[test]
    fn test_blocked_roll_completes_turn() {
        // Black is on the bar against a closed board
        let board = position(
            &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2), (5, 5), (20, -14)],
            [0, 1],
        );
        let mut game = scripted(&[(6, 5)]);
        game.start_from_position(board, Player::Black).unwrap();
        let events = game.roll_dice().unwrap();

        let roll = DiceRoll { d1: 6, d2: 5 };
        assert_eq!(
            events,
            vec![
                GameEvent::DiceRolled {
                    player: Player::Black,
                    roll
                },
                GameEvent::NoLegalMoves {
                    player: Player::Black,
                    roll
                },
            ]
        );
        assert_eq!(game.phase(), GamePhase::TurnComplete);
        assert!(game.turn().unwrap().played().is_empty());

        game.end_turn().unwrap();
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.phase(), GamePhase::AwaitingRoll);
    }

    struct Loaded(u8);

    impl DiceSource for Loaded {
        fn roll_die(&mut self) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_out_of_range_dice_rejected_before_any_change() {
        let board = position(&[(5, 14), (20, -15)], [1, 0]);
        let mut game = Game::with_dice(GameConfig::default(), Loaded(0));
        game.start_from_position(board, Player::White).unwrap();
        let before = game.snapshot();

        assert!(matches!(
            game.roll_dice(),
            Err(GameError::InvalidConfig(_))
        ));
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.phase(), GamePhase::AwaitingRoll);
    }

    #[test]
    fn test_opening_roll_rejects_broken_dice() {
        let config = GameConfig {
            opening_roll: true,
            ..GameConfig::default()
        };
        let mut game = Game::with_dice(config.clone(), Loaded(3));
        assert!(matches!(
            game.start_game(),
            Err(GameError::InvalidConfig(_))
        ));
        assert_eq!(game.phase(), GamePhase::NotStarted);

        let mut game = Game::with_dice(config, Loaded(7));
        assert!(matches!(
            game.start_game(),
            Err(GameError::InvalidConfig(_))
        ));
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_start_from_finished_position_rejected() {
        let board = position(&[(20, -15)], [0, 0]);
        let mut game = scripted(&[(6, 5)]);
        assert!(matches!(
            game.start_from_position(board, Player::Black),
            Err(GameError::InvalidBoard(_))
        ));
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_smallest_die_used_for_ambiguous_bear_off() {
        let board = position(&[(0, 2), (23, -15)], [0, 0]);
        let mut game = scripted(&[(4, 1)]);
        game.start_from_position(board, Player::White).unwrap();
        game.roll_dice().unwrap();

        // Both the exact one and the overshooting four bear this checker off
        let events = game.propose_move(Origin::Point(0), Destination::Off).unwrap();
        assert!(events.contains(&GameEvent::MoveApplied {
            player: Player::White,
            from: Origin::Point(0),
            to: Destination::Off,
            die: 1,
        }));
        assert!(events.contains(&GameEvent::CheckerBorneOff {
            player: Player::White,
            from: 0,
        }));
        assert_eq!(game.remaining_dice(), &[4]);
    }

    #[test]
    fn test_opening_roll_picks_higher_die() {
        let config = GameConfig {
            opening_roll: true,
            ..GameConfig::default()
        };
        // Tie first, then Black wins the opening 5 against 2
        let dice = FixedDice::new(vec![4, 4, 2, 5]).unwrap();
        let mut game = Game::with_dice(config, dice);
        let events = game.start_game().unwrap();

        assert_eq!(
            &events[..2],
            [
                GameEvent::GameStarted {
                    first_player: Player::Black
                },
                GameEvent::DiceRolled {
                    player: Player::Black,
                    roll: DiceRoll { d1: 5, d2: 2 }
                },
            ]
        );
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.phase(), GamePhase::SelectingMoves);
        assert_eq!(game.remaining_dice(), &[5, 2]);
    }

    #[test]
    fn test_listeners_see_every_event() {
        let seen: Rc<RefCell<Vec<GameEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut game = scripted(&[(6, 5)]);
        game.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));

        let mut returned = game.start_game().unwrap();
        returned.extend(game.roll_dice().unwrap());
        returned.extend(game.reset_game().unwrap());

        assert_eq!(*seen.borrow(), returned);
        assert_eq!(returned.last(), Some(&GameEvent::GameReset));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = scripted(&[(2, 1)]);
        game.start_game().unwrap();
        game.roll_dice().unwrap();
        let snapshot = game.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidState {
            action: Command::RollDice,
            phase: GamePhase::TurnComplete,
        };
        assert_eq!(err.to_string(), "cannot roll dice while the turn is complete");
        let err = GameError::IllegalMove {
            from: Origin::Bar,
            to: Destination::Point(3),
        };
        assert_eq!(err.to_string(), "illegal move bar/4");
    }
}
