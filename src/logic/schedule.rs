//! Fixed round/partner schedule for 8 players over 7 rounds.

use crate::models::{GameMatch, PlayerId, Team, MATCH_COUNT, ROUND_COUNT};

/// Pre-solved pairing design: 7 rounds of 2 matches. Each entry is
/// ((team A), (team B)) by player id. Every unordered pair of the 8 ids
/// partners together in exactly one match, and each round uses all 8 ids
/// exactly once (a resolvable 1-factorization of K8).
///
/// Frozen as a constant: the player count never varies, so there is nothing
/// to gain from solving the design at runtime.
#[rustfmt::skip]
pub const ROUND_MATCHUPS: [[((PlayerId, PlayerId), (PlayerId, PlayerId)); 2]; ROUND_COUNT] = [
    [((8, 1), (2, 6)), ((7, 5), (3, 4))],
    [((8, 2), (3, 7)), ((1, 6), (4, 5))],
    [((8, 3), (4, 1)), ((2, 7), (5, 6))],
    [((8, 4), (5, 2)), ((3, 1), (6, 7))],
    [((8, 5), (6, 3)), ((4, 2), (7, 1))],
    [((8, 6), (7, 4)), ((5, 3), (1, 2))],
    [((8, 7), (1, 5)), ((6, 4), (2, 3))],
];

/// Emit the 14 matches of a new tournament: no scores, not completed,
/// ids 1..=14 in round-major order.
pub fn schedule_matches() -> Vec<GameMatch> {
    let mut matches = Vec::with_capacity(MATCH_COUNT);
    let mut next_id = 1;
    for (round_index, round) in ROUND_MATCHUPS.iter().enumerate() {
        for &((a1, a2), (b1, b2)) in round {
            matches.push(GameMatch::new(
                next_id,
                round_index as u32 + 1,
                Team::new(a1, a2),
                Team::new(b1, b2),
            ));
            next_id += 1;
        }
    }
    matches
}
