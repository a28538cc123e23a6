//! Win detection and classification.

use crate::board::Board;
use crate::player::{Player, CHECKERS_PER_PLAYER, POINT_COUNT};
use serde::{Deserialize, Serialize};

/// How decisively a game was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinKind {
    /// The loser had borne off at least one checker
    Single,
    /// The loser had borne off nothing
    Gammon,
    /// A gammon where the loser still has a checker on the bar or in the
    /// winner's home quadrant
    Backgammon,
}

impl WinKind {
    /// Points scored for this result
    pub fn points(&self) -> u32 {
        match self {
            WinKind::Single => 1,
            WinKind::Gammon => 2,
            WinKind::Backgammon => 3,
        }
    }
}

/// True once all of the player's checkers are borne off
pub fn has_won(board: &Board, player: Player) -> bool {
    board.off(player) == CHECKERS_PER_PLAYER
}

/// The player who has borne everything off, if any
pub fn winner(board: &Board) -> Option<Player> {
    Player::ALL.into_iter().find(|&p| has_won(board, p))
}

/// Classify a finished game, or `None` if `winner` has not won.
pub fn win_kind(board: &Board, winner: Player) -> Option<WinKind> {
    if !has_won(board, winner) {
        return None;
    }
    let loser = winner.opponent();
    if board.off(loser) > 0 {
        return Some(WinKind::Single);
    }
    let stranded = board.bar(loser) > 0
        || (0..POINT_COUNT).any(|i| winner.is_home(i) && board.count_for(i, loser) > 0);
    if stranded {
        Some(WinKind::Backgammon)
    } else {
        Some(WinKind::Gammon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(loser_points: &[(usize, i8)], loser_bar: u8) -> Board {
        let mut layout = [0; POINT_COUNT];
        for &(index, count) in loser_points {
            layout[index] = count;
        }
        Board::from_points(layout, [0, loser_bar]).unwrap()
    }

    #[test]
    fn test_no_winner_at_start() {
        let board = Board::new();
        assert!(!has_won(&board, Player::White));
        assert!(!has_won(&board, Player::Black));
        assert_eq!(winner(&board), None);
        assert_eq!(win_kind(&board, Player::White), None);
    }

    #[test]
    fn test_single_win() {
        let board = finished(&[(20, -10)], 0);
        assert_eq!(winner(&board), Some(Player::White));
        assert_eq!(win_kind(&board, Player::White), Some(WinKind::Single));
    }

    #[test]
    fn test_gammon() {
        let board = finished(&[(20, -15)], 0);
        assert_eq!(win_kind(&board, Player::White), Some(WinKind::Gammon));
        assert_eq!(WinKind::Gammon.points(), 2);
    }

    #[test]
    fn test_backgammon_from_home_quadrant() {
        let board = finished(&[(20, -14), (3, -1)], 0);
        assert_eq!(win_kind(&board, Player::White), Some(WinKind::Backgammon));
    }

    #[test]
    fn test_backgammon_from_bar() {
        let board = finished(&[(20, -14)], 1);
        assert_eq!(win_kind(&board, Player::White), Some(WinKind::Backgammon));
    }
}
