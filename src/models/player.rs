//! Player data structure.

use crate::models::ROUND_COUNT;
use serde::{Deserialize, Serialize};

/// Player identifier, stable for the tournament lifetime (1..=8).
pub type PlayerId = u32;

/// A player in the tournament. One score slot per round; 0 means the round
/// has not been played yet for this player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub scores: [i32; ROUND_COUNT],
    pub total_score: i32,
    /// Set by the ranking engine on its output; never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl Player {
    /// Create a player with the given id and name. Scores start at zero.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            scores: [0; ROUND_COUNT],
            total_score: 0,
            rank: None,
        }
    }

    /// Sum of the 7 round slots.
    pub fn score_sum(&self) -> i32 {
        self.scores.iter().sum()
    }
}
