//! Round-robin pairing generation: every team meets every other team of its group once.

use crate::models::{Assignment, GroupId, TeamId, TournamentError};
use serde::Serialize;
use std::collections::HashMap;

/// Two teams that play each other.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Pairing {
    pub team_1: TeamId,
    pub team_2: TeamId,
}

/// All pairings of one group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GroupPairings {
    pub group_id: GroupId,
    pub pairings: Vec<Pairing>,
}

/// Group the assignment list by group, in order of first appearance; teams keep their
/// assignment order inside a group.
pub fn group_assignments(assignments: &[Assignment]) -> Vec<(GroupId, Vec<TeamId>)> {
    let mut index: HashMap<GroupId, usize> = HashMap::new();
    let mut grouped: Vec<(GroupId, Vec<TeamId>)> = Vec::new();
    for a in assignments {
        let slot = *index.entry(a.group_id).or_insert_with(|| {
            grouped.push((a.group_id, Vec::new()));
            grouped.len() - 1
        });
        grouped[slot].1.push(a.team_id);
    }
    grouped
}

/// Generate single-leg round-robin pairings for each group.
///
/// A group of n teams yields n(n-1)/2 pairings in i<j order of its team list; groups
/// with fewer than two teams yield none. A team repeated inside a group counts once.
/// Fails with `NoAssignments` when there are no teams at all, and with a validation
/// error when one team appears in two groups.
pub fn generate_pairings(
    teams_by_group: &[(GroupId, Vec<TeamId>)],
) -> Result<Vec<GroupPairings>, TournamentError> {
    if teams_by_group.iter().all(|(_, teams)| teams.is_empty()) {
        return Err(TournamentError::NoAssignments);
    }

    let mut home_group: HashMap<TeamId, GroupId> = HashMap::new();
    let mut result = Vec::with_capacity(teams_by_group.len());

    for (group_id, teams) in teams_by_group {
        let mut unique: Vec<TeamId> = Vec::with_capacity(teams.len());
        for &team in teams {
            match home_group.get(&team) {
                Some(g) if g != group_id => {
                    return Err(TournamentError::validation(format!(
                        "Team {team} is assigned to more than one group"
                    )));
                }
                Some(_) => continue,
                None => {
                    home_group.insert(team, *group_id);
                    unique.push(team);
                }
            }
        }

        let n = unique.len();
        let mut pairings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairings.push(Pairing {
                    team_1: unique[i],
                    team_2: unique[j],
                });
            }
        }
        result.push(GroupPairings {
            group_id: *group_id,
            pairings,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn three_teams_pair_in_index_order() {
        let g = Uuid::new_v4();
        let t = ids(3);
        let out = generate_pairings(&[(g, t.clone())]).unwrap();
        let pairs: Vec<_> = out[0].pairings.iter().map(|p| (p.team_1, p.team_2)).collect();
        assert_eq!(pairs, vec![(t[0], t[1]), (t[0], t[2]), (t[1], t[2])]);
    }

    #[test]
    fn pair_count_is_n_choose_2_without_repeats() {
        for n in 0..8 {
            let g = Uuid::new_v4();
            let out = generate_pairings(&[(g, ids(n)), (Uuid::new_v4(), ids(1))]).unwrap();
            let pairs = &out[0].pairings;
            assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);
            let unique: HashSet<_> = pairs
                .iter()
                .map(|p| {
                    assert_ne!(p.team_1, p.team_2);
                    if p.team_1 < p.team_2 {
                        (p.team_1, p.team_2)
                    } else {
                        (p.team_2, p.team_1)
                    }
                })
                .collect();
            assert_eq!(unique.len(), pairs.len());
        }
    }

    #[test]
    fn pairings_never_cross_groups() {
        let (ga, gb) = (Uuid::new_v4(), Uuid::new_v4());
        let (ta, tb) = (ids(4), ids(3));
        let out = generate_pairings(&[(ga, ta.clone()), (gb, tb.clone())]).unwrap();
        assert_eq!(out.len(), 2);
        for p in &out[0].pairings {
            assert!(ta.contains(&p.team_1) && ta.contains(&p.team_2));
        }
        for p in &out[1].pairings {
            assert!(tb.contains(&p.team_1) && tb.contains(&p.team_2));
        }
    }

    #[test]
    fn small_groups_yield_nothing() {
        let out = generate_pairings(&[(Uuid::new_v4(), ids(1)), (Uuid::new_v4(), vec![])]).unwrap();
        assert!(out.iter().all(|g| g.pairings.is_empty()));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(generate_pairings(&[]), Err(TournamentError::NoAssignments));
    }

    #[test]
    fn repeated_team_is_not_paired_with_itself() {
        let t = ids(2);
        let out = generate_pairings(&[(Uuid::new_v4(), vec![t[0], t[1], t[0]])]).unwrap();
        assert_eq!(out[0].pairings.len(), 1);
    }

    #[test]
    fn team_in_two_groups_is_rejected() {
        let t = ids(2);
        let result = generate_pairings(&[(Uuid::new_v4(), t.clone()), (Uuid::new_v4(), vec![t[0]])]);
        assert!(matches!(result, Err(TournamentError::Validation(_))));
    }

    #[test]
    fn assignments_group_in_first_seen_order() {
        let (ga, gb) = (Uuid::new_v4(), Uuid::new_v4());
        let t = ids(3);
        let list = vec![
            Assignment::new(gb, t[0]),
            Assignment::new(ga, t[1]),
            Assignment::new(gb, t[2]),
        ];
        assert_eq!(
            group_assignments(&list),
            vec![(gb, vec![t[0], t[2]]), (ga, vec![t[1]])]
        );
    }
}
