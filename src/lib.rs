//! Badminton doubles tournament web app: library with models, scoring and
//! scheduling logic, the storage seam, and the real-time sync relay.

pub mod logic;
pub mod models;
pub mod relay;
pub mod store;

pub use logic::{
    apply_score, auto_finalize_stale, create_tournament, finalize_tournament, ranked_players,
    reconcile_totals, rename_players, schedule_matches, validate_player_names, validate_score,
};
pub use models::{
    GameMatch, MatchId, Player, PlayerId, Team, Tournament, TournamentError, TournamentId,
    WinnerTeam, MATCH_COUNT, PLAYER_COUNT, ROUND_COUNT,
};
pub use relay::{ClientEvent, ConnId, Relay, ScoreToast, ScoreUpdate, ServerEvent};
pub use store::{MemoryStore, TournamentStore};
