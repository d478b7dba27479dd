//! Players, teams and groups: create, edit, delete, look up.

use crate::models::{
    validate_group_name, validate_player_name, Group, GroupId, Player, PlayerId, Team, TeamId,
    TeamSummary, TournamentError,
};
use crate::store::TournamentStore;
use std::collections::HashMap;

pub fn get_player<S: TournamentStore + ?Sized>(
    store: &S,
    id: PlayerId,
) -> Result<Player, TournamentError> {
    store
        .get_player(id)?
        .ok_or(TournamentError::not_found("Player", id))
}

pub fn create_player<S: TournamentStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Player, TournamentError> {
    let player = store.insert_player(Player::new(name)?)?;
    log::info!("Added player {} ({})", player.name, player.id);
    Ok(player)
}

pub fn rename_player<S: TournamentStore + ?Sized>(
    store: &S,
    id: PlayerId,
    name: &str,
) -> Result<Player, TournamentError> {
    store.rename_player(id, validate_player_name(name)?)
}

pub fn delete_player<S: TournamentStore + ?Sized>(
    store: &S,
    id: PlayerId,
) -> Result<(), TournamentError> {
    store.delete_player(id)
}

pub fn get_team<S: TournamentStore + ?Sized>(store: &S, id: TeamId) -> Result<Team, TournamentError> {
    store
        .get_team(id)?
        .ok_or(TournamentError::not_found("Team", id))
}

/// Create a team of two different, existing players.
pub fn create_team<S: TournamentStore + ?Sized>(
    store: &S,
    player_1: PlayerId,
    player_2: PlayerId,
) -> Result<Team, TournamentError> {
    let team = store.insert_team(Team::new(player_1, player_2)?)?;
    log::info!("Added team {}", team.id);
    Ok(team)
}

pub fn update_team<S: TournamentStore + ?Sized>(
    store: &S,
    id: TeamId,
    player_1: PlayerId,
    player_2: PlayerId,
) -> Result<Team, TournamentError> {
    store.update_team(id, player_1, player_2)
}

pub fn delete_team<S: TournamentStore + ?Sized>(store: &S, id: TeamId) -> Result<(), TournamentError> {
    store.delete_team(id)
}

/// Every team with its player names joined in.
pub fn team_summaries<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<Vec<TeamSummary>, TournamentError> {
    let players = store.list_players()?;
    Ok(store
        .list_teams()?
        .iter()
        .map(|t| TeamSummary::resolve(t, &players))
        .collect())
}

pub fn team_summary<S: TournamentStore + ?Sized>(
    store: &S,
    id: TeamId,
) -> Result<TeamSummary, TournamentError> {
    let team = get_team(store, id)?;
    Ok(TeamSummary::resolve(&team, &store.list_players()?))
}

/// Team summaries keyed by id, for joining into match and standings views.
pub(crate) fn summary_index<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<HashMap<TeamId, TeamSummary>, TournamentError> {
    Ok(team_summaries(store)?
        .into_iter()
        .map(|s| (s.id, s))
        .collect())
}

pub(crate) fn lookup_summary(index: &HashMap<TeamId, TeamSummary>, id: TeamId) -> TeamSummary {
    index
        .get(&id)
        .cloned()
        .unwrap_or_else(|| TeamSummary::unresolved(id))
}

pub fn get_group<S: TournamentStore + ?Sized>(store: &S, id: GroupId) -> Result<Group, TournamentError> {
    store
        .get_group(id)?
        .ok_or(TournamentError::not_found("Group", id))
}

pub fn create_group<S: TournamentStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Group, TournamentError> {
    let group = store.insert_group(Group::new(name)?)?;
    log::info!("Added group {}", group.name);
    Ok(group)
}

pub fn rename_group<S: TournamentStore + ?Sized>(
    store: &S,
    id: GroupId,
    name: &str,
) -> Result<Group, TournamentError> {
    store.rename_group(id, validate_group_name(name)?)
}

pub fn delete_group<S: TournamentStore + ?Sized>(
    store: &S,
    id: GroupId,
) -> Result<(), TournamentError> {
    store.delete_group(id)
}
