//! Team-to-group assignment grid.

use crate::logic::roster::{get_group, get_team, team_summaries};
use crate::models::{Assignment, Group, GroupId, TeamId, TeamSummary, TournamentError};
use crate::store::TournamentStore;
use serde::Serialize;
use std::collections::HashMap;

/// A team as offered in one group's column of the grid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AssignableTeam {
    pub team: TeamSummary,
    pub assigned: bool,
}

/// One group with the teams it has, plus every team still free to join it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GroupAssignments {
    pub group: Group,
    pub teams: Vec<AssignableTeam>,
}

/// Assign the team to the group, or remove it if it is already there.
///
/// Returns true when the team is now assigned. A team already placed in another group
/// is rejected. The store refuses any change once the group stage has started.
pub fn toggle_assignment<S: TournamentStore + ?Sized>(
    store: &S,
    group_id: GroupId,
    team_id: TeamId,
) -> Result<bool, TournamentError> {
    get_group(store, group_id)?;
    get_team(store, team_id)?;
    if store.delete_assignment(group_id, team_id)? {
        log::info!("Removed team {} from group {}", team_id, group_id);
        return Ok(false);
    }
    store.insert_assignment(Assignment::new(group_id, team_id))?;
    log::info!("Assigned team {} to group {}", team_id, group_id);
    Ok(true)
}

/// For each group (by name): its assigned teams and all unassigned teams. Teams placed in
/// other groups are left out.
pub fn assignment_grid<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<Vec<GroupAssignments>, TournamentError> {
    let teams = team_summaries(store)?;
    let placed: HashMap<TeamId, GroupId> = store
        .list_assignments()?
        .into_iter()
        .map(|a| (a.team_id, a.group_id))
        .collect();

    Ok(store
        .list_groups()?
        .into_iter()
        .map(|group| {
            let teams = teams
                .iter()
                .filter_map(|t| match placed.get(&t.id) {
                    Some(g) if *g == group.id => Some(AssignableTeam {
                        team: t.clone(),
                        assigned: true,
                    }),
                    Some(_) => None,
                    None => Some(AssignableTeam {
                        team: t.clone(),
                        assigned: false,
                    }),
                })
                .collect();
            GroupAssignments { group, teams }
        })
        .collect())
}

pub fn unassigned_teams<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<Vec<TeamSummary>, TournamentError> {
    let placed: Vec<TeamId> = store
        .list_assignments()?
        .iter()
        .map(|a| a.team_id)
        .collect();
    Ok(team_summaries(store)?
        .into_iter()
        .filter(|t| !placed.contains(&t.id))
        .collect())
}
