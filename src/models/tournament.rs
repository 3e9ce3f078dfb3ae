//! Tournament snapshot and TournamentError.

use crate::models::game::{GameMatch, MatchId};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Local, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Score pair fails the 21-point rule (exactly one side at 21, other in 0..21).
    InvalidScore,
    /// No match with this id in the tournament.
    MatchNotFound(MatchId),
    /// Lookup by id or access code yielded nothing.
    TournamentNotFound,
    /// Another tournament is still active (single-active-tournament rule).
    ActiveTournamentConflict,
    /// Tournament is already finalized; scores and the flag can no longer change.
    AlreadyFinalized,
    /// Wrong number of player names (must be exactly 8).
    WrongNumberOfPlayers { needed: usize, got: usize },
    /// Player name is empty or longer than 8 characters.
    InvalidPlayerName(String),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Access code is empty.
    InvalidAccessCode,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidScore => {
                write!(f, "Invalid score: one side must reach exactly 21, the other must stay below 21")
            }
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::TournamentNotFound => write!(f, "No tournament"),
            TournamentError::ActiveTournamentConflict => write!(f, "active_tournament_exists"),
            TournamentError::AlreadyFinalized => write!(f, "Tournament is already finalized"),
            TournamentError::WrongNumberOfPlayers { needed, got } => {
                write!(f, "Need exactly {} player names (got {})", needed, got)
            }
            TournamentError::InvalidPlayerName(name) => {
                write!(f, "Invalid player name '{}' (1-8 characters required)", name)
            }
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::InvalidAccessCode => write!(f, "Access code must not be empty"),
        }
    }
}

/// Opaque tournament identifier (9-char lowercase base-36 token).
pub type TournamentId = String;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

fn generate_tournament_id() -> TournamentId {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// The complete tournament record, transferable as a single value. Every
/// mutation during live play goes through a copy of this snapshot which then
/// replaces the stored one wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    /// Short human-entered secret; also the relay room key.
    pub access_code: String,
    /// Display date (YYYY-MM-DD).
    pub date: String,
    pub players: Vec<Player>,
    pub matches: Vec<GameMatch>,
    /// Lowest round not yet fully completed (1..=7). Only ever advances.
    pub current_round: u32,
    /// One-way flag; flipped by the lifecycle manager.
    pub is_finalized: bool,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Assemble a fresh tournament with a generated id, round 1, not finalized.
    /// `date` defaults to today when not supplied.
    pub fn new(
        access_code: impl Into<String>,
        players: Vec<Player>,
        matches: Vec<GameMatch>,
        date: Option<String>,
    ) -> Self {
        Self {
            id: generate_tournament_id(),
            access_code: access_code.into(),
            date: date.unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
            players,
            matches,
            current_round: 1,
            is_finalized: false,
            created_at: Utc::now(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// True once every match has a result.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.completed)
    }

    /// True when every match of `round` has a result.
    pub fn round_completed(&self, round: u32) -> bool {
        self.matches
            .iter()
            .filter(|m| m.round == round)
            .all(|m| m.completed)
    }
}
