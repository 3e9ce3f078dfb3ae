//! Ranking engine: tie-aware leaderboard derivation.

use crate::models::{Player, Tournament};

/// Players sorted descending by total score with competition ranks attached:
/// equal totals share the rank of the first player in the group, and the
/// next distinct total resumes at its own 1-based position (140, 140, 120
/// ranks as 1, 1, 3). The sort is stable, so tied players keep their
/// relative order. The snapshot itself is not mutated.
pub fn ranked_players(tournament: &Tournament) -> Vec<Player> {
    let mut sorted = tournament.players.clone();
    sorted.sort_by(|a, b| b.total_score.cmp(&a.total_score));

    let mut ranked: Vec<Player> = Vec::with_capacity(sorted.len());
    for (position, mut player) in sorted.into_iter().enumerate() {
        player.rank = match ranked.last() {
            Some(prev) if prev.total_score == player.total_score => prev.rank,
            _ => Some(position as u32 + 1),
        };
        ranked.push(player);
    }
    ranked
}
