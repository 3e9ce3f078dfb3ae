//! Data structures for the badminton doubles tournament: players, matches, snapshots.

mod game;
mod player;
mod tournament;

/// Fixed tournament shape: 8 players rotating through 7 rounds of 2 matches.
pub const PLAYER_COUNT: usize = 8;
pub const ROUND_COUNT: usize = 7;
pub const MATCH_COUNT: usize = 14;

pub use game::{GameMatch, MatchId, Team, WinnerTeam};
pub use player::{Player, PlayerId};
pub use tournament::{Tournament, TournamentError, TournamentId};
