//! Single-die moves and their application to a board.

use crate::board::Board;
use crate::game::GameError;
use crate::legality;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a moving checker starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Origin {
    /// Re-entry of a hit checker
    Bar,
    /// A point index (0-23)
    Point(u8),
}

/// Where a moving checker ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Destination {
    /// A point index (0-23)
    Point(u8),
    /// Borne off
    Off,
}

/// A checker moved by one die value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub from: Origin,
    pub to: Destination,
    /// The die value this move consumes
    pub die: u8,
}

impl Move {
    pub fn new(from: Origin, to: Destination, die: u8) -> Self {
        Self { from, to, die }
    }

    /// Whether this move starts at `from` and ends at `to`
    pub fn connects(&self, from: Origin, to: Destination) -> bool {
        self.from == from && self.to == to
    }
}

/// What happened when a move was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub mv: Move,
    /// Point where a lone opposing checker was sent to the bar
    pub hit: Option<u8>,
    pub borne_off: bool,
}

/// Apply a single move for `player`.
///
/// The move must be legal for its die on the current board; otherwise the
/// board is left untouched and `GameError::IllegalMove` is returned.
pub fn apply(board: &mut Board, player: Player, mv: Move) -> Result<MoveOutcome, GameError> {
    if !legality::is_legal_single(board, player, mv) {
        return Err(GameError::IllegalMove {
            from: mv.from,
            to: mv.to,
        });
    }
    Ok(apply_unchecked(board, player, mv))
}

/// Like [`apply`], but returns the resulting board and leaves the input alone.
pub fn applied(board: &Board, player: Player, mv: Move) -> Result<(Board, MoveOutcome), GameError> {
    let mut next = *board;
    let outcome = apply(&mut next, player, mv)?;
    Ok((next, outcome))
}

/// Apply a move already known to be legal.
pub(crate) fn apply_unchecked(board: &mut Board, player: Player, mv: Move) -> MoveOutcome {
    match mv.from {
        Origin::Bar => board.take_from_bar(player),
        Origin::Point(index) => board.remove_checker(index as usize, player),
    }

    let mut hit = None;
    let mut borne_off = false;
    match mv.to {
        Destination::Off => {
            board.bear_off(player);
            borne_off = true;
        }
        Destination::Point(index) => {
            let index = index as usize;
            if board.is_blot_for(index, player) {
                board.hit(index, player);
                hit = Some(index as u8);
            }
            board.add_checker(index, player);
        }
    }

    MoveOutcome { mv, hit, borne_off }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Bar => write!(f, "bar"),
            Origin::Point(index) => write!(f, "{}", index + 1),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Point(index) => write!(f, "{}", index + 1),
            Destination::Off => write!(f, "off"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::POINT_COUNT;

    fn position(points: &[(usize, i8)], bar: [u8; 2]) -> Board {
        let mut layout = [0; POINT_COUNT];
        for &(index, count) in points {
            layout[index] = count;
        }
        Board::from_points(layout, bar).unwrap()
    }

    #[test]
    fn test_plain_move() {
        let mut board = Board::new();
        let mv = Move::new(Origin::Point(12), Destination::Point(7), 5);
        let outcome = apply(&mut board, Player::White, mv).unwrap();
        assert_eq!(outcome.hit, None);
        assert!(!outcome.borne_off);
        assert_eq!(board.point(12), 4);
        assert_eq!(board.point(7), 4);
    }

    #[test]
    fn test_hit_sends_blot_to_bar() {
        let mut board = position(&[(10, 1), (5, 14), (7, -1), (20, -14)], [0, 0]);
        let mv = Move::new(Origin::Point(10), Destination::Point(7), 3);
        let outcome = apply(&mut board, Player::White, mv).unwrap();
        assert_eq!(outcome.hit, Some(7));
        assert_eq!(board.point(7), 1);
        assert_eq!(board.bar(Player::Black), 1);
        assert_eq!(board.checkers(Player::Black), 15);
        assert_eq!(board.checkers(Player::White), 15);
    }

    #[test]
    fn test_bear_off_increments_off() {
        let mut board = position(&[(1, 2), (23, -15)], [0, 0]);
        let mv = Move::new(Origin::Point(1), Destination::Off, 2);
        let outcome = apply(&mut board, Player::White, mv).unwrap();
        assert!(outcome.borne_off);
        assert_eq!(board.off(Player::White), 14);
        assert_eq!(board.point(1), 1);
    }

    #[test]
    fn test_entry_from_bar() {
        let mut board = position(&[(5, 14), (18, -15)], [1, 0]);
        let mv = Move::new(Origin::Bar, Destination::Point(20), 4);
        apply(&mut board, Player::White, mv).unwrap();
        assert_eq!(board.bar(Player::White), 0);
        assert_eq!(board.point(20), 1);
    }

    #[test]
    fn test_illegal_move_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board;
        // Index 18 holds five Black checkers
        let mv = Move::new(Origin::Point(23), Destination::Point(18), 5);
        let result = apply(&mut board, Player::White, mv);
        assert_eq!(
            result,
            Err(GameError::IllegalMove {
                from: Origin::Point(23),
                to: Destination::Point(18),
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_die_must_match_distance() {
        let mut board = Board::new();
        let mv = Move::new(Origin::Point(12), Destination::Point(7), 4);
        assert!(apply(&mut board, Player::White, mv).is_err());
    }

    #[test]
    fn test_applied_is_pure() {
        let board = Board::new();
        let mv = Move::new(Origin::Point(0), Destination::Point(6), 6);
        let (next, outcome) = applied(&board, Player::Black, mv).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(next.point(6), -1);
        assert_eq!(outcome.mv, mv);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Move::new(Origin::Bar, Destination::Point(20), 4).to_string(),
            "bar/21"
        );
        assert_eq!(
            Move::new(Origin::Point(1), Destination::Off, 2).to_string(),
            "2/off"
        );
    }
}
