//! Board representation: the 24-point track, the bar and the off-areas.
//!
//! This module contains:
//! - The `Board` struct with signed checker counts per point
//! - The standard opening layout
//! - Read queries used by the legality engine and the win detector
//!
//! Mutation is crate-private and only reached through move application.

use crate::game::GameError;
use crate::player::{Player, BAR_DISTANCE, CHECKERS_PER_PLAYER, POINT_COUNT};
use serde::{Deserialize, Serialize};

/// The complete board.
///
/// Each point holds a signed count: positive for White, negative for Black,
/// zero when empty. A sign per point makes mixed occupancy unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardLayout")]
pub struct Board {
    /// Checkers on each point, signed by owner
    points: [i8; POINT_COUNT],
    /// Checkers waiting on the bar, indexed by `Player::index`
    bar: [u8; 2],
    /// Checkers borne off, indexed by `Player::index`
    off: [u8; 2],
}

/// Unchecked wire form of a board, validated on the way in
#[derive(Deserialize)]
struct BoardLayout {
    points: [i8; POINT_COUNT],
    bar: [u8; 2],
    off: [u8; 2],
}

impl TryFrom<BoardLayout> for Board {
    type Error = GameError;

    fn try_from(layout: BoardLayout) -> Result<Self, Self::Error> {
        Board::from_layout(layout.points, layout.bar, layout.off)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with the standard opening layout.
    ///
    /// Each side has, in its own numbering, two checkers on the 24-point,
    /// five on the 13-point, three on the 8-point and five on the 6-point.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for player in Player::ALL {
            for (distance, count) in [(24, 2), (13, 5), (8, 3), (6, 5)] {
                let index = player.point_at_distance(distance);
                board.points[index] = player.sign() * count;
            }
        }
        board
    }

    fn empty() -> Self {
        Self {
            points: [0; POINT_COUNT],
            bar: [0; 2],
            off: [0; 2],
        }
    }

    /// Build an arbitrary position.
    ///
    /// `bar` and `off` are indexed by `Player::index`. Fails unless each
    /// player owns exactly 15 checkers.
    pub fn from_layout(
        points: [i8; POINT_COUNT],
        bar: [u8; 2],
        off: [u8; 2],
    ) -> Result<Self, GameError> {
        let board = Self { points, bar, off };
        board.validate()?;
        Ok(board)
    }

    /// Check that each player owns exactly 15 checkers
    pub fn validate(&self) -> Result<(), GameError> {
        for player in Player::ALL {
            let total = self.checkers(player);
            if total != CHECKERS_PER_PLAYER as u32 {
                return Err(GameError::InvalidBoard(format!(
                    "{} has {} checkers, expected {}",
                    player, total, CHECKERS_PER_PLAYER
                )));
            }
        }
        Ok(())
    }

    /// Build a position where every checker not on a point or the bar has
    /// already been borne off.
    pub fn from_points(points: [i8; POINT_COUNT], bar: [u8; 2]) -> Result<Self, GameError> {
        let partial = Self {
            points,
            bar,
            off: [0; 2],
        };
        let mut off = [0; 2];
        for player in Player::ALL {
            let placed = partial.checkers(player);
            if placed > CHECKERS_PER_PLAYER as u32 {
                return Err(GameError::InvalidBoard(format!(
                    "{} has {} checkers in play, at most {} allowed",
                    player, placed, CHECKERS_PER_PLAYER
                )));
            }
            off[player.index()] = CHECKERS_PER_PLAYER - placed as u8;
        }
        Self::from_layout(points, bar, off)
    }

    // ==================== Query Methods ====================

    /// All points, signed by owner
    pub fn points(&self) -> &[i8; POINT_COUNT] {
        &self.points
    }

    /// Signed checker count on a point
    pub fn point(&self, index: usize) -> i8 {
        self.points[index]
    }

    /// Owner of a point, if any checkers are on it
    pub fn owner(&self, index: usize) -> Option<Player> {
        match self.points[index] {
            0 => None,
            n if n > 0 => Some(Player::White),
            _ => Some(Player::Black),
        }
    }

    /// Number of checkers on a point, regardless of owner
    pub fn count(&self, index: usize) -> u8 {
        self.points[index].unsigned_abs()
    }

    /// Number of `player`'s checkers on a point
    pub fn count_for(&self, index: usize, player: Player) -> u8 {
        if self.owner(index) == Some(player) {
            self.count(index)
        } else {
            0
        }
    }

    /// Checkers waiting on the bar
    pub fn bar(&self, player: Player) -> u8 {
        self.bar[player.index()]
    }

    /// Checkers borne off
    pub fn off(&self, player: Player) -> u8 {
        self.off[player.index()]
    }

    /// A point is blocked for `player` when the opponent holds two or more
    /// checkers on it.
    pub fn is_blocked_for(&self, index: usize, player: Player) -> bool {
        self.count_for(index, player.opponent()) >= 2
    }

    /// Whether a lone opposing checker sits on the point
    pub fn is_blot_for(&self, index: usize, player: Player) -> bool {
        self.count_for(index, player.opponent()) == 1
    }

    /// Total checkers owned by a player across points, bar and off
    pub fn checkers(&self, player: Player) -> u32 {
        let on_points: u32 = (0..POINT_COUNT)
            .map(|i| self.count_for(i, player) as u32)
            .sum();
        on_points + self.bar(player) as u32 + self.off(player) as u32
    }

    /// Whether all of the player's checkers are in the home quadrant or off
    pub fn all_home(&self, player: Player) -> bool {
        let home: u32 = (0..POINT_COUNT)
            .filter(|&i| player.is_home(i))
            .map(|i| self.count_for(i, player) as u32)
            .sum();
        home + self.off(player) as u32 == CHECKERS_PER_PLAYER as u32
    }

    /// Distance to off of the player's farthest-back checker.
    ///
    /// A checker on the bar counts as 25 pips away. `None` once everything
    /// is borne off.
    pub fn farthest_from_off(&self, player: Player) -> Option<u8> {
        if self.bar(player) > 0 {
            return Some(BAR_DISTANCE);
        }
        (0..POINT_COUNT)
            .filter(|&i| self.count_for(i, player) > 0)
            .map(|i| player.distance_to_off(i))
            .max()
    }

    /// Total pips the player still has to travel
    pub fn pip_count(&self, player: Player) -> u32 {
        let on_points: u32 = (0..POINT_COUNT)
            .map(|i| self.count_for(i, player) as u32 * player.distance_to_off(i) as u32)
            .sum();
        on_points + self.bar(player) as u32 * BAR_DISTANCE as u32
    }

    // ==================== Mutation Methods ====================

    pub(crate) fn remove_checker(&mut self, index: usize, player: Player) {
        debug_assert!(self.count_for(index, player) > 0);
        self.points[index] -= player.sign();
    }

    pub(crate) fn add_checker(&mut self, index: usize, player: Player) {
        debug_assert!(self.count_for(index, player.opponent()) == 0);
        self.points[index] += player.sign();
    }

    /// Lift a lone opposing checker off `index` and put it on its bar
    pub(crate) fn hit(&mut self, index: usize, player: Player) {
        let victim = player.opponent();
        debug_assert!(self.is_blot_for(index, player));
        self.points[index] = 0;
        self.bar[victim.index()] += 1;
    }

    pub(crate) fn take_from_bar(&mut self, player: Player) {
        debug_assert!(self.bar(player) > 0);
        self.bar[player.index()] -= 1;
    }

    pub(crate) fn bear_off(&mut self, player: Player) {
        self.off[player.index()] += 1;
    }
}
