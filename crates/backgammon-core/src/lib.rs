//! Backgammon rules engine
//!
//! This crate provides the game logic for two-player backgammon, including:
//! - Board representation with the standard opening layout
//! - Dice rolling behind a substitutable source
//! - Turn-scoped legal move enumeration (forced moves, higher die, doubles)
//! - Move application with hits and bear-off
//! - A turn state machine with commands, events and win detection
//!
//! # Architecture
//!
//! The engine is a plain library with no global state. A host (UI, test,
//! browser binding) owns a [`Game`], issues commands and reads back the
//! events each command returns or subscribes a [`GameListener`].
//!
//! # Modules
//!
//! - [`player`]: Player identity and direction of travel
//! - [`board`]: Points, bar and off-areas
//! - [`dice`]: Rolls and dice sources
//! - [`legality`]: Legal move enumeration
//! - [`moves`]: Move types and application
//! - [`win`]: Win detection
//! - [`game`]: Turn state machine

pub mod actions;
pub mod board;
pub mod config;
pub mod dice;
pub mod game;
pub mod legality;
pub mod moves;
pub mod player;
#[cfg(feature = "wasm")]
pub mod wasm;
pub mod win;

// Re-export commonly used types
pub use actions::{Command, GameAction, GameEvent, GameListener};
pub use board::Board;
pub use config::GameConfig;
pub use dice::{DiceRoll, DiceSource, FixedDice, RandomDice};
pub use game::{Game, GameError, GamePhase, GameSnapshot, Turn};
pub use legality::MoveSequence;
pub use moves::{Destination, Move, MoveOutcome, Origin};
pub use player::{Player, CHECKERS_PER_PLAYER, POINT_COUNT};
pub use win::WinKind;
