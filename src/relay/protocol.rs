//! Relay wire protocol: tagged JSON envelopes over a persistent connection.
//!
//! Every message is `{"event": "...", "data": ...}` with a required
//! discriminant; there is no bare-snapshot form.

use crate::models::{MatchId, Tournament};
use serde::{Deserialize, Serialize};

/// Incremental-change descriptor attached to an update, used only to build
/// the toast notification for the other room members.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub match_id: MatchId,
    pub round: u32,
    pub score_a: i32,
    pub score_b: i32,
}

/// Transient score notification, for UI display only, never a source of
/// truth. `ts` is the relay's epoch-millisecond send time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreToast {
    pub match_id: MatchId,
    pub round: u32,
    pub score_a: i32,
    pub score_b: i32,
    pub ts: i64,
}

/// Messages a client sends to the relay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Announce a freshly created tournament; the sender joins its room.
    #[serde(rename = "create-tournament")]
    CreateTournament(Tournament),
    /// Join the room for the tournament with this access code.
    #[serde(rename = "join-tournament")]
    JoinTournament(String),
    /// Publish a full snapshot after a local mutation, optionally with the
    /// incremental change for toast fan-out.
    #[serde(rename = "tournament:update")]
    TournamentUpdate {
        tournament: Tournament,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        update: Option<ScoreUpdate>,
    },
}

/// Messages the relay sends to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Full snapshot; the receiving client replaces its local copy wholesale.
    #[serde(rename = "tournament:sync")]
    TournamentSync(Tournament),
    /// Score toast for everyone in the room except the author of the update.
    #[serde(rename = "toast:score")]
    ToastScore(ScoreToast),
}
