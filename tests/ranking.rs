//! Integration tests for the ranking engine: ordering and tie handling.

use badminton_tournament_web::{ranked_players, schedule_matches, Player, Tournament};

fn tournament_with_totals(totals: [i32; 8]) -> Tournament {
    let players: Vec<Player> = totals
        .iter()
        .enumerate()
        .map(|(i, &total)| {
            let mut p = Player::new(i as u32 + 1, format!("P{}", i + 1));
            p.total_score = total;
            p
        })
        .collect();
    Tournament::new("1234", players, schedule_matches(), None)
}

#[test]
fn players_are_sorted_descending_by_total() {
    let t = tournament_with_totals([10, 80, 30, 120, 50, 90, 70, 140]);
    let ranked = ranked_players(&t);
    let totals: Vec<i32> = ranked.iter().map(|p| p.total_score).collect();
    assert_eq!(totals, [140, 120, 90, 80, 70, 50, 30, 10]);
    let ranks: Vec<u32> = ranked.iter().filter_map(|p| p.rank).collect();
    assert_eq!(ranks, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn tied_players_share_the_rank_and_numbering_skips() {
    // Competition ranking: 140, 140, 120 ranks as 1, 1, 3.
    let t = tournament_with_totals([140, 140, 120, 100, 90, 80, 70, 60]);
    let ranked = ranked_players(&t);
    assert_eq!(ranked[0].rank, Some(1));
    assert_eq!(ranked[1].rank, Some(1));
    assert_eq!(ranked[2].rank, Some(3));
    assert_eq!(ranked[3].rank, Some(4));
}

#[test]
fn tied_players_keep_their_relative_order() {
    let t = tournament_with_totals([140, 140, 120, 0, 0, 0, 0, 0]);
    let ranked = ranked_players(&t);
    // Stable sort: player 1 stays ahead of player 2 within the tie.
    assert_eq!(ranked[0].id, 1);
    assert_eq!(ranked[1].id, 2);
    // The five scoreless players all share rank 4.
    for p in &ranked[3..] {
        assert_eq!(p.rank, Some(4));
    }
}

#[test]
fn ranking_does_not_mutate_the_snapshot() {
    let t = tournament_with_totals([140, 140, 120, 100, 90, 80, 70, 60]);
    let before = t.clone();
    let _ = ranked_players(&t);
    assert_eq!(t, before);
    assert!(t.players.iter().all(|p| p.rank.is_none()));
}
