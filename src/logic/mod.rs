//! Tournament business logic: schedule, scoring, ranking, lifecycle.

mod lifecycle;
mod ranking;
mod schedule;
mod scoring;

pub use lifecycle::{
    auto_finalize_stale, create_tournament, finalize_tournament, reconcile_totals,
    rename_players, validate_player_names, AUTO_FINALIZE_AFTER_HOURS, MAX_NAME_LEN,
};
pub use ranking::ranked_players;
pub use schedule::{schedule_matches, ROUND_MATCHUPS};
pub use scoring::{apply_score, validate_score, WINNING_SCORE};
