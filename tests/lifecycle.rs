//! Integration tests for the tournament lifecycle: creation rules, the
//! single-active invariant, finalization, and auto-finalize.

use badminton_tournament_web::{
    apply_score, auto_finalize_stale, create_tournament, finalize_tournament, rename_players,
    MemoryStore, Tournament, TournamentError, TournamentStore,
};
use chrono::{Duration, Utc};

fn names() -> Vec<String> {
    ["Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Henry"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn create(store: &MemoryStore) -> Tournament {
    create_tournament(store, "1234", &names(), None).unwrap()
}

#[test]
fn create_builds_a_full_tournament() {
    let store = MemoryStore::new();
    let t = create(&store);
    assert_eq!(t.players.len(), 8);
    for (i, p) in t.players.iter().enumerate() {
        assert_eq!(p.id, i as u32 + 1);
        assert_eq!(p.total_score, 0);
    }
    assert_eq!(t.matches.len(), 14);
    assert_eq!(t.current_round, 1);
    assert!(!t.is_finalized);
    assert_eq!(store.tournament_by_id(&t.id).unwrap(), t);
}

#[test]
fn create_rejects_bad_input() {
    let store = MemoryStore::new();

    let seven = names()[..7].to_vec();
    assert!(matches!(
        create_tournament(&store, "1234", &seven, None),
        Err(TournamentError::WrongNumberOfPlayers { needed: 8, got: 7 })
    ));

    let mut too_long = names();
    too_long[0] = "Christopher".to_string();
    assert!(matches!(
        create_tournament(&store, "1234", &too_long, None),
        Err(TournamentError::InvalidPlayerName(_))
    ));

    let mut blank = names();
    blank[3] = "   ".to_string();
    assert!(matches!(
        create_tournament(&store, "1234", &blank, None),
        Err(TournamentError::InvalidPlayerName(_))
    ));

    let mut dup = names();
    dup[1] = "alice".to_string(); // duplicates are case-insensitive
    assert!(matches!(
        create_tournament(&store, "1234", &dup, None),
        Err(TournamentError::DuplicatePlayerName)
    ));

    assert!(matches!(
        create_tournament(&store, "  ", &names(), None),
        Err(TournamentError::InvalidAccessCode)
    ));
}

#[test]
fn only_one_tournament_may_be_active() {
    let store = MemoryStore::new();
    let first = create(&store);

    assert!(matches!(
        create_tournament(&store, "5678", &names(), None),
        Err(TournamentError::ActiveTournamentConflict)
    ));

    finalize_tournament(&store, &first.id).unwrap();
    let second = create_tournament(&store, "5678", &names(), None).unwrap();
    assert_eq!(store.active_tournament().unwrap().id, second.id);
}

#[test]
fn finalize_reconciles_totals_from_match_history() {
    let store = MemoryStore::new();
    let t = create(&store);

    let mut played = t.clone();
    apply_score(&mut played, 1, 21, 15, false).unwrap();
    // Simulate drifted incremental totals before the snapshot is persisted.
    played.player_mut(8).unwrap().total_score = 999;
    played.player_mut(2).unwrap().scores[0] = 3;
    store.update_tournament(&played).unwrap();

    let finalized = finalize_tournament(&store, &t.id).unwrap();
    assert!(finalized.is_finalized);
    assert_eq!(finalized.player(8).unwrap().total_score, 21);
    assert_eq!(finalized.player(1).unwrap().total_score, 21);
    assert_eq!(finalized.player(2).unwrap().scores[0], 15);
    assert_eq!(finalized.player(2).unwrap().total_score, 15);
    assert_eq!(store.tournament_by_id(&t.id).unwrap(), finalized);
}

#[test]
fn finalize_is_one_way() {
    let store = MemoryStore::new();
    let t = create(&store);
    finalize_tournament(&store, &t.id).unwrap();
    assert!(matches!(
        finalize_tournament(&store, &t.id),
        Err(TournamentError::AlreadyFinalized)
    ));
    assert!(matches!(
        finalize_tournament(&store, "missing"),
        Err(TournamentError::TournamentNotFound)
    ));
}

#[test]
fn stale_tournaments_are_finalized_on_access() {
    let store = MemoryStore::new();
    let t = create(&store);

    // Fresh tournament: left alone.
    assert_eq!(auto_finalize_stale(&store, Utc::now()).unwrap(), None);
    assert!(store.active_tournament().is_some());

    // Backdate past the 24h threshold.
    let mut stale = store.tournament_by_id(&t.id).unwrap();
    stale.created_at = Utc::now() - Duration::hours(25);
    store.update_tournament(&stale).unwrap();

    let closed = auto_finalize_stale(&store, Utc::now()).unwrap().unwrap();
    assert_eq!(closed.id, t.id);
    assert!(closed.is_finalized);
    assert!(store.active_tournament().is_none());
    assert_eq!(store.finalized_tournaments().len(), 1);
}

#[test]
fn rename_replaces_all_names() {
    let store = MemoryStore::new();
    let t = create(&store);

    let new_names: Vec<String> = (1..=8).map(|i| format!("N{}", i)).collect();
    let renamed = rename_players(&store, &t.id, &new_names).unwrap();
    for (p, name) in renamed.players.iter().zip(&new_names) {
        assert_eq!(&p.name, name);
    }

    assert!(matches!(
        rename_players(&store, "missing", &new_names),
        Err(TournamentError::TournamentNotFound)
    ));
}

#[test]
fn delete_removes_the_tournament() {
    let store = MemoryStore::new();
    let t = create(&store);
    store.delete_tournament(&t.id).unwrap();
    assert!(store.tournament_by_id(&t.id).is_none());
    assert!(matches!(
        store.delete_tournament(&t.id),
        Err(TournamentError::TournamentNotFound)
    ));
}

#[test]
fn lookup_by_access_code_sees_only_active_tournaments() {
    let store = MemoryStore::new();
    let t = create(&store);
    assert_eq!(store.active_by_code("1234").unwrap().id, t.id);
    assert!(store.active_by_code("9999").is_none());

    finalize_tournament(&store, &t.id).unwrap();
    assert!(store.active_by_code("1234").is_none());
}
