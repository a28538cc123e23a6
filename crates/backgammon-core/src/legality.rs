//! Legal move enumeration.
//!
//! Legality in backgammon is scoped to the whole turn: a player must use as
//! many of the rolled values as any ordering allows, and when only one value
//! of a non-double roll can be used it must be the higher one. The searches
//! below therefore work on the full remaining dice multiset rather than on a
//! single die.
//!
//! Every search is bounded by [`MAX_PLIES`]: a roll grants at most four
//! values and each ply consumes one.

use crate::board::Board;
use crate::dice::DIE_FACES;
use crate::moves::{apply_unchecked, Destination, Move, Origin};
use crate::player::{Player, POINT_COUNT};
use std::collections::HashSet;
use tracing::trace;

/// Most die values a single roll can grant
pub const MAX_PLIES: usize = 4;

/// An ordered list of moves making up (part of) a turn
pub type MoveSequence = Vec<Move>;

/// All moves a single die allows, ignoring the rest of the roll.
pub fn single_moves(board: &Board, player: Player, die: u8) -> Vec<Move> {
    let mut moves = Vec::new();
    if die == 0 || die > DIE_FACES {
        return moves;
    }

    // Checkers on the bar must come in before anything else moves
    if board.bar(player) > 0 {
        let entry = player.entry_point(die);
        if !board.is_blocked_for(entry, player) {
            moves.push(Move::new(
                Origin::Bar,
                Destination::Point(entry as u8),
                die,
            ));
        }
        return moves;
    }

    let bearing_off = board.all_home(player);
    let farthest = board.farthest_from_off(player);

    for index in 0..POINT_COUNT {
        if board.count_for(index, player) == 0 {
            continue;
        }
        match player.target(index, die) {
            Some(target) => {
                if !board.is_blocked_for(target, player) {
                    moves.push(Move::new(
                        Origin::Point(index as u8),
                        Destination::Point(target as u8),
                        die,
                    ));
                }
            }
            None if bearing_off => {
                let distance = player.distance_to_off(index);
                // A larger die only bears off the farthest-back checker
                if die == distance || (die > distance && farthest == Some(distance)) {
                    moves.push(Move::new(Origin::Point(index as u8), Destination::Off, die));
                }
            }
            None => {}
        }
    }

    moves
}

/// Whether `mv` is a legal move for its die on `board`
pub fn is_legal_single(board: &Board, player: Player, mv: Move) -> bool {
    single_moves(board, player, mv.die).contains(&mv)
}

/// Most die values from `dice` that can be played in some order.
pub fn max_playable(board: &Board, player: Player, dice: &[u8]) -> usize {
    let dice = &dice[..dice.len().min(MAX_PLIES)];
    playable_depth(board, player, dice)
}

fn playable_depth(board: &Board, player: Player, dice: &[u8]) -> usize {
    let mut best = 0;
    for (slot, die) in distinct_dice(dice) {
        let rest = without(dice, slot);
        for mv in single_moves(board, player, die) {
            let mut next = *board;
            apply_unchecked(&mut next, player, mv);
            best = best.max(1 + playable_depth(&next, player, &rest));
            if best == dice.len() {
                return best;
            }
        }
    }
    best
}

/// Moves that may be played next from the remaining `dice`.
///
/// A move qualifies when it begins some maximal sequence. Empty when the
/// player cannot move at all.
pub fn legal_first_moves(board: &Board, player: Player, dice: &[u8]) -> Vec<Move> {
    let dice = &dice[..dice.len().min(MAX_PLIES)];
    let best = playable_depth(board, player, dice);
    if best == 0 {
        return Vec::new();
    }

    let mut moves = Vec::new();
    for (slot, die) in distinct_dice(dice) {
        let rest = without(dice, slot);
        for mv in single_moves(board, player, die) {
            let mut next = *board;
            apply_unchecked(&mut next, player, mv);
            if 1 + playable_depth(&next, player, &rest) == best {
                moves.push(mv);
            }
        }
    }

    if let Some(high) = forced_high_die(dice, best) {
        if moves.iter().any(|mv| mv.die == high) {
            moves.retain(|mv| mv.die == high);
        }
    }

    trace!(%player, ?dice, best, count = moves.len(), "legal first moves");
    moves
}

/// Every distinct legal full-turn sequence for `dice`.
///
/// Sequences are expanded one ply at a time from an explicit frontier.
/// Orderings that play the same set of moves reach the same board, so only
/// one ordering of each set is kept. Empty when no die can be used.
pub fn legal_sequences(board: &Board, player: Player, dice: &[u8]) -> Vec<MoveSequence> {
    let dice = &dice[..dice.len().min(MAX_PLIES)];

    let mut frontier: Vec<(Board, Vec<u8>, MoveSequence)> = vec![(*board, dice.to_vec(), Vec::new())];
    let mut complete: Vec<MoveSequence> = Vec::new();

    for _ply in 0..MAX_PLIES {
        let mut next_frontier = Vec::new();
        let mut seen: HashSet<MoveSequence> = HashSet::new();

        for (state, remaining, played) in &frontier {
            for (slot, die) in distinct_dice(remaining) {
                let rest = without(remaining, slot);
                for mv in single_moves(state, player, die) {
                    let mut sequence = played.clone();
                    sequence.push(mv);

                    let mut key = sequence.clone();
                    key.sort();
                    if !seen.insert(key) {
                        continue;
                    }

                    let mut next = *state;
                    apply_unchecked(&mut next, player, mv);
                    next_frontier.push((next, rest.clone(), sequence));
                }
            }
        }

        if next_frontier.is_empty() {
            break;
        }
        complete = next_frontier.iter().map(|(_, _, s)| s.clone()).collect();
        frontier = next_frontier;
    }

    // Only the deepest ply survives, so every kept sequence is maximal
    let best = complete.first().map_or(0, Vec::len);
    if let Some(high) = forced_high_die(dice, best) {
        if complete.iter().any(|s| s[0].die == high) {
            complete.retain(|s| s[0].die == high);
        }
    }

    trace!(%player, ?dice, count = complete.len(), "legal sequences");
    complete
}

/// The die that must be played when only one value of a non-double roll
/// can be used.
fn forced_high_die(dice: &[u8], best: usize) -> Option<u8> {
    match dice {
        [a, b] if a != b && best == 1 => Some(*a.max(b)),
        _ => None,
    }
}

/// First slot of each distinct value in `dice`
fn distinct_dice(dice: &[u8]) -> Vec<(usize, u8)> {
    let mut out: Vec<(usize, u8)> = Vec::with_capacity(dice.len());
    for (slot, &die) in dice.iter().enumerate() {
        if !out.iter().any(|&(_, d)| d == die) {
            out.push((slot, die));
        }
    }
    out
}

fn without(dice: &[u8], slot: usize) -> Vec<u8> {
    let mut rest = dice.to_vec();
    rest.remove(slot);
    rest
}
