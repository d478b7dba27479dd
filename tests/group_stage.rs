//! Integration tests for the group stage: assignments, match generation, scoring and standings.

use padel_tournament_web::{
    create_group, create_player, create_team, group_standings, matches_overview,
    reset_group_stage, start_group_stage, start_match, submit_match_score, toggle_assignment,
    Assignment, GroupId, MatchStatus, MAX_GAMES, MemoryStore, StandingRecord, StandingsLedger, TeamId, TournamentError,
    TournamentStore,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn add_team(store: &MemoryStore, label: &str) -> TeamId {
    let a = create_player(store, &format!("{label} left")).unwrap();
    let b = create_player(store, &format!("{label} right")).unwrap();
    create_team(store, a.id, b.id).unwrap().id
}

/// One group per entry, each with that many freshly created teams assigned.
fn tournament(sizes: &[usize]) -> (MemoryStore, Vec<(GroupId, Vec<TeamId>)>) {
    let store = MemoryStore::new();
    let mut groups = Vec::new();
    for (g, &size) in sizes.iter().enumerate() {
        let group = create_group(&store, &format!("Group {g}")).unwrap();
        let teams: Vec<TeamId> = (0..size)
            .map(|t| {
                let team = add_team(&store, &format!("G{g}T{t}"));
                assert!(toggle_assignment(&store, group.id, team).unwrap());
                team
            })
            .collect();
        groups.push((group.id, teams));
    }
    (store, groups)
}

fn record(store: &MemoryStore, group_id: GroupId, team_id: TeamId) -> StandingRecord {
    store
        .list_standing_records(Some(group_id))
        .unwrap()
        .into_iter()
        .find(|r| r.team_id == team_id)
        .unwrap()
}

#[test]
fn start_generates_round_robin_per_group() {
    let (store, groups) = tournament(&[3, 4, 1]);
    let summary = start_group_stage(&store).unwrap();
    assert_eq!(summary.standings_created, 8);
    assert_eq!(summary.matches_created, 3 + 6);

    for (group_id, teams) in &groups {
        let matches = store.list_matches(Some(*group_id)).unwrap();
        let n = teams.len();
        assert_eq!(matches.len(), n * (n - 1) / 2);
        let mut seen = HashSet::new();
        for m in &matches {
            assert_ne!(m.team_1, m.team_2);
            assert!(teams.contains(&m.team_1) && teams.contains(&m.team_2));
            assert_eq!(m.status, MatchStatus::Pending);
            let key = if m.team_1 < m.team_2 {
                (m.team_1, m.team_2)
            } else {
                (m.team_2, m.team_1)
            };
            assert!(seen.insert(key), "pairing repeated");
        }
    }
}

#[test]
fn three_teams_pair_in_input_order() {
    let (store, groups) = tournament(&[3]);
    start_group_stage(&store).unwrap();
    let (group_id, t) = &groups[0];
    let pairs: Vec<(TeamId, TeamId)> = store
        .list_matches(Some(*group_id))
        .unwrap()
        .iter()
        .map(|m| (m.team_1, m.team_2))
        .collect();
    assert_eq!(pairs, vec![(t[0], t[1]), (t[0], t[2]), (t[1], t[2])]);
}

#[test]
fn start_without_assignments_fails() {
    let store = MemoryStore::new();
    create_group(&store, "Group A").unwrap();
    assert!(matches!(
        start_group_stage(&store),
        Err(TournamentError::NoAssignments)
    ));
    assert!(store.list_matches(None).unwrap().is_empty());
}

#[test]
fn second_start_is_rejected_without_new_records() {
    let (store, _) = tournament(&[3]);
    start_group_stage(&store).unwrap();
    assert!(matches!(
        start_group_stage(&store),
        Err(TournamentError::AlreadyInitialized)
    ));
    assert_eq!(store.list_standing_records(None).unwrap().len(), 3);
    assert_eq!(store.list_matches(None).unwrap().len(), 3);
}

#[test]
fn winning_six_three_updates_both_records() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let group_id = groups[0].0;
    let m = store.list_matches(Some(group_id)).unwrap().remove(0);

    let played = submit_match_score(&store, m.id, 6, 3).unwrap();
    assert_eq!(played.status, MatchStatus::Completed);
    assert_eq!(played.winner, Some(m.team_1));
    assert_eq!((played.team_1_score, played.team_2_score), (Some(6), Some(3)));

    let winner = record(&store, group_id, m.team_1);
    assert_eq!(
        (winner.matches_played, winner.matches_won, winner.matches_lost),
        (1, 1, 0)
    );
    assert_eq!((winner.games_won, winner.games_lost), (6, 3));
    let loser = record(&store, group_id, m.team_2);
    assert_eq!(
        (loser.matches_played, loser.matches_won, loser.matches_lost),
        (1, 0, 1)
    );
    assert_eq!((loser.games_won, loser.games_lost), (3, 6));
}

#[test]
fn winner_follows_scores_when_second_team_wins() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let m = store.list_matches(Some(groups[0].0)).unwrap().remove(0);
    let played = submit_match_score(&store, m.id, 4, 6).unwrap();
    assert_eq!(played.winner, Some(m.team_2));
}

#[test]
fn invalid_scores_leave_match_and_standings_untouched() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let group_id = groups[0].0;
    let m = store.list_matches(Some(group_id)).unwrap().remove(0);

    for (a, b) in [(6, 6), (5, 4), (-1, 6), (0, 0)] {
        assert!(
            matches!(
                submit_match_score(&store, m.id, a, b),
                Err(TournamentError::Validation(_))
            ),
            "{a}-{b} should be rejected"
        );
    }
    assert_eq!(
        store.get_match(m.id).unwrap().unwrap().status,
        MatchStatus::Pending
    );
    assert_eq!(record(&store, group_id, m.team_1).matches_played, 0);
}

#[test]
fn scores_above_the_cap_leave_match_and_standings_untouched() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let group_id = groups[0].0;
    let m = store.list_matches(Some(group_id)).unwrap().remove(0);
    let before = store.list_standing_records(Some(group_id)).unwrap();

    let over = i64::from(MAX_GAMES) + 1;
    for (a, b) in [(over, 6), (6, 4_000_000_000), (4_000_000_000, 4_000_000_001)] {
        assert!(
            matches!(
                submit_match_score(&store, m.id, a, b),
                Err(TournamentError::Validation(_))
            ),
            "{a}-{b} should be rejected"
        );
    }
    assert_eq!(
        store.get_match(m.id).unwrap().unwrap().status,
        MatchStatus::Pending
    );
    assert_eq!(store.list_standing_records(Some(group_id)).unwrap(), before);
}

#[test]
fn largest_scores_accumulate_and_store_stays_usable() {
    let (store, groups) = tournament(&[3]);
    start_group_stage(&store).unwrap();
    let (group_id, t) = &groups[0];
    let top = i64::from(MAX_GAMES);

    for m in store
        .list_matches(Some(*group_id))
        .unwrap()
        .iter()
        .filter(|m| m.team_1 == t[0])
    {
        submit_match_score(&store, m.id, top, 0).unwrap();
    }

    let r = record(&store, *group_id, t[0]);
    assert_eq!((r.matches_played, r.matches_won), (2, 2));
    assert_eq!(r.games_won, 2 * MAX_GAMES);
    assert_eq!(store.list_players().unwrap().len(), 6);
}

#[test]
fn second_submission_is_a_duplicate() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let group_id = groups[0].0;
    let m = store.list_matches(Some(group_id)).unwrap().remove(0);

    submit_match_score(&store, m.id, 6, 2).unwrap();
    assert!(matches!(
        submit_match_score(&store, m.id, 2, 6),
        Err(TournamentError::DuplicateResult(id)) if id == m.id
    ));
    let r = record(&store, group_id, m.team_1);
    assert_eq!((r.matches_played, r.matches_won, r.games_won), (1, 1, 6));
}

#[test]
fn concurrent_submissions_apply_once() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let group_id = groups[0].0;
    let m = store.list_matches(Some(group_id)).unwrap().remove(0);
    let (match_id, store) = (m.id, Arc::new(store));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || submit_match_score(store.as_ref(), match_id, 6, 4))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, TournamentError::DuplicateResult(_))));
    for team in [m.team_1, m.team_2] {
        assert_eq!(record(&store, group_id, team).matches_played, 1);
    }
}

#[test]
fn played_equals_won_plus_lost_after_every_result() {
    let (store, groups) = tournament(&[4]);
    start_group_stage(&store).unwrap();
    let group_id = groups[0].0;
    let scores = [(6, 0), (3, 6), (7, 5), (6, 4), (2, 6), (6, 1)];

    for (m, (a, b)) in store.list_matches(Some(group_id)).unwrap().iter().zip(scores) {
        submit_match_score(&store, m.id, a, b).unwrap();
        for r in store.list_standing_records(Some(group_id)).unwrap() {
            assert_eq!(r.matches_played, r.matches_won + r.matches_lost);
        }
    }
    let total_played: u32 = store
        .list_standing_records(Some(group_id))
        .unwrap()
        .iter()
        .map(|r| r.matches_played)
        .sum();
    assert_eq!(total_played, 12);
}

#[test]
fn missing_standing_record_fails_before_match_changes() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let m = store.list_matches(Some(groups[0].0)).unwrap().remove(0);
    store.clear_standing_records().unwrap();

    assert!(matches!(
        submit_match_score(&store, m.id, 6, 1),
        Err(TournamentError::RecordNotFound { .. })
    ));
    assert_eq!(
        store.get_match(m.id).unwrap().unwrap().status,
        MatchStatus::Pending
    );
}

#[test]
fn standings_rank_by_wins_then_game_difference() {
    let (store, groups) = tournament(&[3]);
    start_group_stage(&store).unwrap();
    let (group_id, t) = &groups[0];
    // (t0,t1) (t0,t2) (t1,t2)
    let matches = store.list_matches(Some(*group_id)).unwrap();
    submit_match_score(&store, matches[0].id, 6, 4).unwrap();
    submit_match_score(&store, matches[1].id, 2, 6).unwrap();
    submit_match_score(&store, matches[2].id, 6, 0).unwrap();

    // One win each: t1 +4, t0 -2, t2 -2 (t0 listed before t2)
    let table = group_standings(&store, *group_id).unwrap();
    let order: Vec<TeamId> = table.rows.iter().map(|r| r.team.id).collect();
    assert_eq!(order, vec![t[1], t[0], t[2]]);
    assert_eq!(
        table.rows.iter().map(|r| r.position).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(table.rows[0].game_difference, 4);
}

#[test]
fn start_match_moves_pending_to_in_progress_once() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    let m = store.list_matches(Some(groups[0].0)).unwrap().remove(0);

    assert_eq!(start_match(&store, m.id).unwrap().status, MatchStatus::InProgress);
    assert!(matches!(
        start_match(&store, m.id),
        Err(TournamentError::Validation(_))
    ));
    submit_match_score(&store, m.id, 6, 3).unwrap();
    assert!(matches!(
        start_match(&store, m.id),
        Err(TournamentError::DuplicateResult(_))
    ));
}

#[test]
fn overview_filters_by_status() {
    let (store, _) = tournament(&[3, 2]);
    start_group_stage(&store).unwrap();
    let first = store.list_matches(None).unwrap().remove(0);
    submit_match_score(&store, first.id, 6, 3).unwrap();

    let all = matches_overview(&store, None).unwrap();
    assert_eq!(all.totals.total, 4);
    assert_eq!(all.totals.completed, 1);
    assert_eq!(all.totals.pending, 3);
    assert_eq!(all.groups.len(), 2);

    let done = matches_overview(&store, Some(MatchStatus::Completed)).unwrap();
    assert_eq!(done.groups.len(), 1);
    assert_eq!(done.groups[0].matches[0].game.id, first.id);
}

#[test]
fn team_cannot_join_a_second_group() {
    let (store, groups) = tournament(&[1]);
    let other = create_group(&store, "Other").unwrap();
    let team = groups[0].1[0];
    assert!(matches!(
        toggle_assignment(&store, other.id, team),
        Err(TournamentError::Validation(_))
    ));
    // toggling within its own group removes it
    assert!(!toggle_assignment(&store, groups[0].0, team).unwrap());
    assert!(toggle_assignment(&store, other.id, team).unwrap());
}

#[test]
fn assignments_lock_once_stage_started() {
    let (store, groups) = tournament(&[2]);
    start_group_stage(&store).unwrap();
    assert!(matches!(
        toggle_assignment(&store, groups[0].0, groups[0].1[0]),
        Err(TournamentError::Validation(_))
    ));

    let late = add_team(&store, "Late");
    assert!(matches!(
        store.insert_assignment(Assignment::new(groups[0].0, late)),
        Err(TournamentError::Validation(_))
    ));
    assert!(matches!(
        store.delete_assignment(groups[0].0, groups[0].1[1]),
        Err(TournamentError::Validation(_))
    ));
    assert_eq!(store.list_assignments().unwrap().len(), 2);
}

#[test]
fn reset_allows_a_fresh_start() {
    let (store, groups) = tournament(&[3]);
    start_group_stage(&store).unwrap();
    let m = store.list_matches(None).unwrap().remove(0);
    submit_match_score(&store, m.id, 6, 1).unwrap();

    let reset = reset_group_stage(&store).unwrap();
    assert_eq!(reset.standings_cleared, 3);
    assert_eq!(reset.matches_cleared, 3);
    assert!(!StandingsLedger::new(&store).is_initialized().unwrap());

    start_group_stage(&store).unwrap();
    for r in store.list_standing_records(Some(groups[0].0)).unwrap() {
        assert_eq!(r.matches_played, 0);
    }
}
