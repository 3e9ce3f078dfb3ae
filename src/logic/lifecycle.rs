//! Tournament lifecycle: creation, finalization, auto-finalize of abandoned
//! sessions. These are the two irreversible transitions plus their guards.

use crate::logic::schedule::schedule_matches;
use crate::models::{Player, Team, Tournament, TournamentError, PLAYER_COUNT, ROUND_COUNT};
use crate::store::TournamentStore;
use chrono::{DateTime, Duration, Utc};

/// Player names are capped at 8 characters for the score grid.
pub const MAX_NAME_LEN: usize = 8;

/// An active tournament older than this is finalized on next access so an
/// abandoned session cannot hold the single-active slot forever.
pub const AUTO_FINALIZE_AFTER_HOURS: i64 = 24;

/// Check the 8 player names: exact count, 1-8 characters each after
/// trimming, unique case-insensitively.
pub fn validate_player_names(names: &[String]) -> Result<(), TournamentError> {
    if names.len() != PLAYER_COUNT {
        return Err(TournamentError::WrongNumberOfPlayers {
            needed: PLAYER_COUNT,
            got: names.len(),
        });
    }
    for (i, name) in names.iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
            return Err(TournamentError::InvalidPlayerName(name.clone()));
        }
        let duplicate = names[..i]
            .iter()
            .any(|prev| prev.trim().eq_ignore_ascii_case(trimmed));
        if duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
    }
    Ok(())
}

/// Create and persist a new tournament with the fixed schedule.
///
/// Rejected with `ActiveTournamentConflict` while any other tournament is
/// still unfinalized (single-active-tournament rule).
pub fn create_tournament(
    store: &dyn TournamentStore,
    access_code: &str,
    player_names: &[String],
    date: Option<String>,
) -> Result<Tournament, TournamentError> {
    let access_code = access_code.trim();
    if access_code.is_empty() {
        return Err(TournamentError::InvalidAccessCode);
    }
    validate_player_names(player_names)?;
    if store.active_tournament().is_some() {
        return Err(TournamentError::ActiveTournamentConflict);
    }

    let players: Vec<Player> = player_names
        .iter()
        .enumerate()
        .map(|(i, name)| Player::new(i as u32 + 1, name.trim()))
        .collect();
    let tournament = Tournament::new(access_code, players, schedule_matches(), date);
    store.insert_tournament(&tournament)?;
    log::info!("Created tournament {} ({})", tournament.id, tournament.date);
    Ok(tournament)
}

/// Replace all 8 player names on an existing tournament.
pub fn rename_players(
    store: &dyn TournamentStore,
    id: &str,
    player_names: &[String],
) -> Result<Tournament, TournamentError> {
    validate_player_names(player_names)?;
    let mut tournament = store
        .tournament_by_id(id)
        .ok_or(TournamentError::TournamentNotFound)?;
    for (player, name) in tournament.players.iter_mut().zip(player_names) {
        player.name = name.trim().to_string();
    }
    store.update_tournament(&tournament)?;
    Ok(tournament)
}

/// Rebuild every player's round slots and total from the completed matches.
///
/// The match list is the authoritative history; incremental total
/// maintenance during live play can drift if writes interleave, so finalize
/// reconstructs from scratch before the record is frozen.
pub fn reconcile_totals(tournament: &mut Tournament) {
    // Copy match data first; writing player slots needs &mut tournament.
    let results: Vec<(u32, Team, Team, i32, i32)> = tournament
        .matches
        .iter()
        .filter(|m| m.completed)
        .filter_map(|m| Some((m.round, m.team_a, m.team_b, m.score_a?, m.score_b?)))
        .collect();

    for p in &mut tournament.players {
        p.scores = [0; ROUND_COUNT];
    }
    for (round, team_a, team_b, score_a, score_b) in results {
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
    }
    for p in &mut tournament.players {
        p.total_score = p.score_sum();
    }
}

/// One-way transition to the finalized state.
///
/// Totals are reconciled from match history and persisted together with the
/// flag, so the historical record is self-consistent even if live totals
/// drifted. Finalizing twice is an error.
pub fn finalize_tournament(
    store: &dyn TournamentStore,
    id: &str,
) -> Result<Tournament, TournamentError> {
    let mut tournament = store
        .tournament_by_id(id)
        .ok_or(TournamentError::TournamentNotFound)?;
    if tournament.is_finalized {
        return Err(TournamentError::AlreadyFinalized);
    }
    reconcile_totals(&mut tournament);
    tournament.is_finalized = true;
    store.update_tournament(&tournament)?;
    log::info!("Finalized tournament {}", tournament.id);
    Ok(tournament)
}

/// Finalize the active tournament if it has been sitting unfinalized past
/// the threshold. Called on access paths, not from a background task.
/// Returns the finalized snapshot when one was closed out.
pub fn auto_finalize_stale(
    store: &dyn TournamentStore,
    now: DateTime<Utc>,
) -> Result<Option<Tournament>, TournamentError> {
    let Some(active) = store.active_tournament() else {
        return Ok(None);
    };
    if now - active.created_at < Duration::hours(AUTO_FINALIZE_AFTER_HOURS) {
        return Ok(None);
    }
    log::info!(
        "Auto-finalizing tournament {} (inactive past {}h)",
        active.id,
        AUTO_FINALIZE_AFTER_HOURS
    );
    finalize_tournament(store, &active.id).map(Some)
}
