//! Match, Team, and WinnerTeam for 2v2 doubles games.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Match identifier, stable for the tournament lifetime (1..=14).
pub type MatchId = u32;

/// A partnership of two players. Composition is fixed at schedule time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub player1: PlayerId,
    pub player2: PlayerId,
}

impl Team {
    pub fn new(player1: PlayerId, player2: PlayerId) -> Self {
        Self { player1, player2 }
    }

    /// The pair as an unordered key (smaller id first).
    pub fn pair(&self) -> (PlayerId, PlayerId) {
        if self.player1 <= self.player2 {
            (self.player1, self.player2)
        } else {
            (self.player2, self.player1)
        }
    }
}

/// Which side took the game to 21.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum WinnerTeam {
    A,
    B,
}

/// A single doubles match: two teams, one shared score per side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMatch {
    pub id: MatchId,
    /// Round this match belongs to (1..=7).
    pub round: u32,
    pub team_a: Team,
    pub team_b: Team,
    /// None until the match has been played.
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
    pub completed: bool,
    /// Derived from the scores once completed.
    #[serde(default)]
    pub winner_team: Option<WinnerTeam>,
}

impl GameMatch {
    pub fn new(id: MatchId, round: u32, team_a: Team, team_b: Team) -> Self {
        Self {
            id,
            round,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            completed: false,
            winner_team: None,
        }
    }

    /// All four participating player ids, team A first.
    pub fn participants(&self) -> [PlayerId; 4] {
        [
            self.team_a.player1,
            self.team_a.player2,
            self.team_b.player1,
            self.team_b.player2,
        ]
    }
}
