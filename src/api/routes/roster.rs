//! Players, teams, groups and the assignment grid.

use crate::api::{respond, respond_empty, AppState};
use crate::logic::{
    assignment_grid, create_group, create_player, create_team, delete_group, delete_player,
    delete_team, get_group, get_player, rename_group, rename_player, team_summaries,
    team_summary, toggle_assignment, unassigned_teams, update_team,
};
use crate::models::{GroupId, PlayerId, TeamId};
use crate::store::TournamentStore;
use actix_web::{
    delete, get, post, put,
    web::{self, Json, Path},
    HttpResponse,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct TeamBody {
    player_1: PlayerId,
    player_2: PlayerId,
}

/// Path segments: group id and team id (e.g. /api/groups/{id}/teams/{team_id}/toggle)
#[derive(Deserialize)]
struct GroupTeamPath {
    id: GroupId,
    team_id: TeamId,
}

#[derive(Serialize)]
struct ToggleResponse {
    assigned: bool,
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    respond(state.list_players())
}

#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<NameBody>) -> HttpResponse {
    respond(create_player(state.get_ref(), &body.name))
}

#[get("/api/players/{id}")]
async fn api_get_player(state: AppState, path: Path<PlayerId>) -> HttpResponse {
    respond(get_player(state.get_ref(), path.into_inner()))
}

#[put("/api/players/{id}")]
async fn api_rename_player(state: AppState, path: Path<PlayerId>, body: Json<NameBody>) -> HttpResponse {
    respond(rename_player(state.get_ref(), path.into_inner(), &body.name))
}

/// Rejected while the player belongs to a team.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<PlayerId>) -> HttpResponse {
    respond_empty(delete_player(state.get_ref(), path.into_inner()))
}

#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    respond(team_summaries(state.get_ref()))
}

#[post("/api/teams")]
async fn api_create_team(state: AppState, body: Json<TeamBody>) -> HttpResponse {
    respond(create_team(state.get_ref(), body.player_1, body.player_2))
}

#[get("/api/teams/{id}")]
async fn api_get_team(state: AppState, path: Path<TeamId>) -> HttpResponse {
    respond(team_summary(state.get_ref(), path.into_inner()))
}

#[put("/api/teams/{id}")]
async fn api_update_team(state: AppState, path: Path<TeamId>, body: Json<TeamBody>) -> HttpResponse {
    respond(update_team(
        state.get_ref(),
        path.into_inner(),
        body.player_1,
        body.player_2,
    ))
}

#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppState, path: Path<TeamId>) -> HttpResponse {
    respond_empty(delete_team(state.get_ref(), path.into_inner()))
}

#[get("/api/groups")]
async fn api_list_groups(state: AppState) -> HttpResponse {
    respond(state.list_groups())
}

#[post("/api/groups")]
async fn api_create_group(state: AppState, body: Json<NameBody>) -> HttpResponse {
    respond(create_group(state.get_ref(), &body.name))
}

#[get("/api/groups/{id}")]
async fn api_get_group(state: AppState, path: Path<GroupId>) -> HttpResponse {
    respond(get_group(state.get_ref(), path.into_inner()))
}

#[put("/api/groups/{id}")]
async fn api_rename_group(state: AppState, path: Path<GroupId>, body: Json<NameBody>) -> HttpResponse {
    respond(rename_group(state.get_ref(), path.into_inner(), &body.name))
}

#[delete("/api/groups/{id}")]
async fn api_delete_group(state: AppState, path: Path<GroupId>) -> HttpResponse {
    respond_empty(delete_group(state.get_ref(), path.into_inner()))
}

/// Grid of groups with their assigned teams and the teams still free to join.
#[get("/api/assignments")]
async fn api_assignment_grid(state: AppState) -> HttpResponse {
    respond(assignment_grid(state.get_ref()))
}

#[get("/api/assignments/unassigned")]
async fn api_unassigned_teams(state: AppState) -> HttpResponse {
    respond(unassigned_teams(state.get_ref()))
}

/// Assign the team to the group, or remove it if already there.
#[post("/api/groups/{id}/teams/{team_id}/toggle")]
async fn api_toggle_assignment(state: AppState, path: Path<GroupTeamPath>) -> HttpResponse {
    respond(
        toggle_assignment(state.get_ref(), path.id, path.team_id)
            .map(|assigned| ToggleResponse { assigned }),
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_list_players)
        .service(api_create_player)
        .service(api_get_player)
        .service(api_rename_player)
        .service(api_delete_player)
        .service(api_list_teams)
        .service(api_create_team)
        .service(api_get_team)
        .service(api_update_team)
        .service(api_delete_team)
        .service(api_list_groups)
        .service(api_create_group)
        .service(api_get_group)
        .service(api_rename_group)
        .service(api_delete_group)
        .service(api_assignment_grid)
        .service(api_unassigned_teams)
        .service(api_toggle_assignment);
}
