//! Bracket stage: quarter-finals, semi-finals, final.

use crate::api::routes::group_stage::{check_client_winner, ScoreBody};
use crate::api::{respond, respond_empty, AppState};
use crate::logic::{
    bracket, create_final, delete_final, edit_final, get_final, list_finals, submit_final_score,
};
use crate::models::{FinalId, FinalRound, TeamId};
use crate::store::FinalEdit;
use actix_web::{
    delete, get, post, put,
    web::{self, Json, Path, Query},
    HttpResponse,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct FinalsQuery {
    round: Option<FinalRound>,
}

#[derive(Deserialize)]
struct CreateFinalBody {
    round: FinalRound,
    team_1: TeamId,
    team_2: TeamId,
}

#[derive(Deserialize)]
struct EditFinalBody {
    round: Option<FinalRound>,
    team_1: Option<TeamId>,
    team_2: Option<TeamId>,
}

#[get("/api/finals")]
async fn api_list_finals(state: AppState, query: Query<FinalsQuery>) -> HttpResponse {
    respond(list_finals(state.get_ref(), query.round))
}

#[get("/api/finals/bracket")]
async fn api_bracket(state: AppState) -> HttpResponse {
    respond(bracket(state.get_ref()))
}

#[get("/api/finals/{id}")]
async fn api_get_final(state: AppState, path: Path<FinalId>) -> HttpResponse {
    respond(get_final(state.get_ref(), path.into_inner()))
}

#[post("/api/finals")]
async fn api_create_final(state: AppState, body: Json<CreateFinalBody>) -> HttpResponse {
    respond(create_final(state.get_ref(), body.round, body.team_1, body.team_2))
}

/// Change round or teams; only before the final is played.
#[put("/api/finals/{id}")]
async fn api_edit_final(state: AppState, path: Path<FinalId>, body: Json<EditFinalBody>) -> HttpResponse {
    let edit = FinalEdit {
        round: body.round,
        team_1: body.team_1,
        team_2: body.team_2,
    };
    respond(edit_final(state.get_ref(), path.into_inner(), edit))
}

#[put("/api/finals/{id}/score")]
async fn api_submit_final_score(
    state: AppState,
    path: Path<FinalId>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = submit_final_score(state.get_ref(), id, body.team_1_score, body.team_2_score);
    if let Ok(f) = &result {
        check_client_winner("final", id, body.team_winner_id, f.winner);
    }
    respond(result)
}

#[delete("/api/finals/{id}")]
async fn api_delete_final(state: AppState, path: Path<FinalId>) -> HttpResponse {
    respond_empty(delete_final(state.get_ref(), path.into_inner()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_list_finals)
        .service(api_bracket)
        .service(api_get_final)
        .service(api_create_final)
        .service(api_edit_final)
        .service(api_submit_final_score)
        .service(api_delete_final);
}
