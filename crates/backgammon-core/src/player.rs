//! Player identity and direction of travel.
//!
//! Points are addressed by a 0-based index into the track. Index `i` is
//! point `i + 1` in White's numbering: White travels from index 23 down to
//! index 0 and bears off below it, Black travels from index 0 up to index 23
//! and bears off above it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of checkers each player owns
pub const CHECKERS_PER_PLAYER: u8 = 15;

/// Number of points on the track
pub const POINT_COUNT: usize = 24;

/// Number of points in a home quadrant
pub const HOME_SIZE: u8 = 6;

/// Distance to off for a checker waiting on the bar
pub const BAR_DISTANCE: u8 = 25;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Both players, White first
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// The other side
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Slot used for per-player arrays (bar, off)
    pub fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// Sign of this player's checkers on a point
    pub fn sign(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Pips a checker on `index` still has to travel to be borne off.
    pub fn distance_to_off(self, index: usize) -> u8 {
        match self {
            Player::White => index as u8 + 1,
            Player::Black => (POINT_COUNT - index) as u8,
        }
    }

    /// Index of the point that lies `distance` pips from off (1..=24).
    pub fn point_at_distance(self, distance: u8) -> usize {
        match self {
            Player::White => distance as usize - 1,
            Player::Black => POINT_COUNT - distance as usize,
        }
    }

    /// Point a checker re-enters on from the bar with `die`.
    ///
    /// Entry happens in the opponent's home quadrant.
    pub fn entry_point(self, die: u8) -> usize {
        self.point_at_distance(BAR_DISTANCE - die)
    }

    /// Destination of a checker on `index` moved `die` pips, or `None` when
    /// the move would carry it past the end of the track.
    pub fn target(self, index: usize, die: u8) -> Option<usize> {
        let distance = self.distance_to_off(index);
        if die >= distance {
            None
        } else {
            Some(self.point_at_distance(distance - die))
        }
    }

    /// Whether `index` lies in this player's home quadrant
    pub fn is_home(self, index: usize) -> bool {
        self.distance_to_off(index) <= HOME_SIZE
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}
