//! Group stage lifecycle, match scores and standings.

use crate::api::{respond, AppState};
use crate::logic::{
    group_stage_status, group_standings, matches_overview, reset_group_stage, standings_tables,
    start_group_stage, start_match, submit_match_score,
};
use crate::models::{GroupId, MatchId, MatchStatus, TeamId};
use actix_web::{
    get, post, put,
    web::{self, Json, Path, Query},
    HttpResponse,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct MatchesQuery {
    status: Option<MatchStatus>,
}

#[derive(Deserialize)]
pub(crate) struct ScoreBody {
    pub team_1_score: i64,
    pub team_2_score: i64,
    /// Accepted for older clients; the winner is always derived from the scores.
    #[serde(default)]
    pub team_winner_id: Option<TeamId>,
}

/// Log when a client-supplied winner disagrees with the one computed from the scores.
pub(crate) fn check_client_winner(kind: &str, id: uuid::Uuid, claimed: Option<TeamId>, actual: Option<TeamId>) {
    if let Some(claimed) = claimed {
        if Some(claimed) != actual {
            log::warn!(
                "Ignoring client winner {} for {} {}; scores decide {:?}",
                claimed,
                kind,
                id,
                actual
            );
        }
    }
}

#[get("/api/group-stage")]
async fn api_group_stage_status(state: AppState) -> HttpResponse {
    respond(group_stage_status(state.get_ref()))
}

/// Create standings for all assigned teams and generate the round-robin matches. Once only.
#[post("/api/group-stage/start")]
async fn api_start_group_stage(state: AppState) -> HttpResponse {
    respond(start_group_stage(state.get_ref()))
}

/// Admin: drop standings and group matches.
#[post("/api/group-stage/reset")]
async fn api_reset_group_stage(state: AppState) -> HttpResponse {
    respond(reset_group_stage(state.get_ref()))
}

#[get("/api/matches")]
async fn api_matches(state: AppState, query: Query<MatchesQuery>) -> HttpResponse {
    respond(matches_overview(state.get_ref(), query.status))
}

#[post("/api/matches/{id}/start")]
async fn api_start_match(state: AppState, path: Path<MatchId>) -> HttpResponse {
    respond(start_match(state.get_ref(), path.into_inner()))
}

/// Record a score; a second submission for the same match gets 409.
#[put("/api/matches/{id}/score")]
async fn api_submit_match_score(
    state: AppState,
    path: Path<MatchId>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = submit_match_score(state.get_ref(), id, body.team_1_score, body.team_2_score);
    if let Ok(m) = &result {
        check_client_winner("match", id, body.team_winner_id, m.winner);
    }
    respond(result)
}

#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    respond(standings_tables(state.get_ref()))
}

#[get("/api/standings/{group_id}")]
async fn api_group_standings(state: AppState, path: Path<GroupId>) -> HttpResponse {
    respond(group_standings(state.get_ref(), path.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_group_stage_status)
        .service(api_start_group_stage)
        .service(api_reset_group_stage)
        .service(api_matches)
        .service(api_start_match)
        .service(api_submit_match_score)
        .service(api_standings)
        .service(api_group_standings);
}
