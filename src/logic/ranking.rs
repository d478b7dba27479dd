//! Ranking a group's standings for display.

use crate::models::StandingRecord;
use serde::Serialize;

/// One row of a ranked standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankedStanding {
    /// 1-based.
    pub position: usize,
    pub record: StandingRecord,
    pub game_difference: i64,
}

/// Order records by matches won, then game difference, both descending.
///
/// The sort is stable: records still tied keep their input order. The input is not
/// modified.
pub fn project_standings(records: &[StandingRecord]) -> Vec<RankedStanding> {
    let mut ordered: Vec<&StandingRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        b.matches_won
            .cmp(&a.matches_won)
            .then_with(|| b.game_difference().cmp(&a.game_difference()))
    });
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, record)| RankedStanding {
            position: i + 1,
            record: record.clone(),
            game_difference: record.game_difference(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(won: u32, lost: u32, games_won: u32, games_lost: u32) -> StandingRecord {
        StandingRecord {
            matches_played: won + lost,
            matches_won: won,
            matches_lost: lost,
            games_won,
            games_lost,
            ..StandingRecord::new(Uuid::nil(), Uuid::new_v4())
        }
    }

    #[test]
    fn game_difference_breaks_win_ties() {
        let t2 = record(2, 0, 12, 10);
        let t1 = record(2, 0, 12, 7);
        let ranked = project_standings(&[t2.clone(), t1.clone()]);
        assert_eq!(ranked[0].record, t1);
        assert_eq!(ranked[0].game_difference, 5);
        assert_eq!(ranked[1].record, t2);
        assert_eq!(ranked[1].game_difference, 2);
    }

    #[test]
    fn wins_beat_game_difference() {
        let many_wins = record(2, 1, 14, 16);
        let big_diff = record(1, 2, 20, 5);
        let ranked = project_standings(&[big_diff, many_wins.clone()]);
        assert_eq!(ranked[0].record, many_wins);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let rows: Vec<_> = (0..5).map(|_| record(1, 1, 9, 9)).collect();
        let ranked = project_standings(&rows);
        let order: Vec<_> = ranked.iter().map(|r| r.record.team_id).collect();
        let expected: Vec<_> = rows.iter().map(|r| r.team_id).collect();
        assert_eq!(order, expected);
        let positions: Vec<_> = ranked.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn projection_is_repeatable_and_leaves_input_alone() {
        let rows = vec![record(0, 2, 4, 12), record(2, 0, 12, 4), record(1, 1, 9, 8)];
        let before = rows.clone();
        let first = project_standings(&rows);
        let second = project_standings(&rows);
        assert_eq!(first, second);
        assert_eq!(rows, before);
    }

    #[test]
    fn empty_group_ranks_nothing() {
        assert!(project_standings(&[]).is_empty());
    }
}
