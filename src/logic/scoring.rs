//! Scoring engine: score validation, match result application, round advancement.

use crate::models::{MatchId, Tournament, TournamentError, WinnerTeam, ROUND_COUNT};

/// A badminton game runs to exactly 21 points (no extended deuce).
pub const WINNING_SCORE: i32 = 21;

/// True iff exactly one side has 21 and the other is in [0, 21).
pub fn validate_score(score_a: i32, score_b: i32) -> bool {
    if score_a < 0 || score_b < 0 || score_a > WINNING_SCORE || score_b > WINNING_SCORE {
        return false;
    }
    (score_a == WINNING_SCORE && score_b < WINNING_SCORE)
        || (score_b == WINNING_SCORE && score_a < WINNING_SCORE)
}

/// Apply one match result to the snapshot.
///
/// Both teammates on a side receive their side's score into the round slot
/// (shared-score doubles, not individual tallies), and every player's total
/// is recomputed from the 7 slots.
///
/// `current_round` advances by one only when this is not an edit, the match
/// belongs to the current round, and the whole round is now completed. It is
/// capped at 7 and never moves backward; edits are corrections to history,
/// not progress events.
///
/// On `InvalidScore` or `MatchNotFound` the snapshot is left untouched.
/// Finalization is deliberately not checked here; that guard belongs to the
/// caller.
pub fn apply_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_a: i32,
    score_b: i32,
    is_edit: bool,
) -> Result<(), TournamentError> {
    if !validate_score(score_a, score_b) {
        return Err(TournamentError::InvalidScore);
    }

    let game = tournament
        .match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;

    game.score_a = Some(score_a);
    game.score_b = Some(score_b);
    game.completed = true;
    game.winner_team = Some(if score_a == WINNING_SCORE {
        WinnerTeam::A
    } else {
        WinnerTeam::B
    });

    let round = game.round;
    let team_a = game.team_a;
    let team_b = game.team_b;
    let slot = (round - 1) as usize;

    for id in [team_a.player1, team_a.player2] {
        if let Some(p) = tournament.player_mut(id) {
            p.scores[slot] = score_a;
        }
    }
    for id in [team_b.player1, team_b.player2] {
        if let Some(p) = tournament.player_mut(id) {
            p.scores[slot] = score_b;
        }
    }

    if !is_edit
        && round == tournament.current_round
        && round < ROUND_COUNT as u32
        && tournament.round_completed(round)
    {
        tournament.current_round = round + 1;
    }

    for p in &mut tournament.players {
        p.total_score = p.score_sum();
    }

    Ok(())
}
