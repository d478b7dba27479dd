//! JSON REST API over a [`MemoryStore`], mounted by the `web` binary.

mod routes;

use crate::models::TournamentError;
use crate::store::MemoryStore;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

/// Shared store handed to every handler.
pub type AppState = web::Data<MemoryStore>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Browsers ask for an icon on every page load; answer with an empty 204.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health).service(favicon);
    routes::roster::configure(cfg);
    routes::group_stage::configure(cfg);
    routes::finals::configure(cfg);
}

/// Map a tournament error to its HTTP status with a `{"error": ...}` body.
pub fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::Validation(_) | TournamentError::NoAssignments => {
            HttpResponse::BadRequest().json(body)
        }
        TournamentError::NotFound { .. } => HttpResponse::NotFound().json(body),
        TournamentError::AlreadyInitialized | TournamentError::DuplicateResult(_) => {
            HttpResponse::Conflict().json(body)
        }
        TournamentError::RecordNotFound { .. } | TournamentError::Store(_) => {
            log::error!("Request failed: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub(crate) fn respond<T: Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

pub(crate) fn respond_empty(result: Result<(), TournamentError>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}
