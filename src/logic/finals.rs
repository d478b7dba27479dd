//! Final stage: quarter-finals, semi-finals and the final, created by hand and scored
//! with the same set rules as group matches.

use crate::logic::roster::{lookup_summary, summary_index};
use crate::models::{
    FinalId, FinalMatch, FinalRound, ScoreLine, TeamId, TeamSummary, TournamentError,
};
use crate::store::{FinalEdit, TournamentStore};
use serde::Serialize;

/// A bracket match with teams (and winner, once played) resolved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FinalView {
    #[serde(flatten)]
    pub final_match: FinalMatch,
    pub completed: bool,
    pub team_1_summary: TeamSummary,
    pub team_2_summary: TeamSummary,
    pub winner_summary: Option<TeamSummary>,
}

/// All matches of one bracket round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketRound {
    pub round: FinalRound,
    pub matches: Vec<FinalView>,
}

pub fn get_final<S: TournamentStore + ?Sized>(
    store: &S,
    id: FinalId,
) -> Result<FinalMatch, TournamentError> {
    store
        .get_final(id)?
        .ok_or(TournamentError::not_found("Final", id))
}

/// Add a bracket match between two different existing teams.
pub fn create_final<S: TournamentStore + ?Sized>(
    store: &S,
    round: FinalRound,
    team_1: TeamId,
    team_2: TeamId,
) -> Result<FinalMatch, TournamentError> {
    let created = store.insert_final(FinalMatch::new(round, team_1, team_2))?;
    log::info!("Added {:?} match {}", round, created.id);
    Ok(created)
}

/// Change round or teams of a final that has not been played.
pub fn edit_final<S: TournamentStore + ?Sized>(
    store: &S,
    id: FinalId,
    edit: FinalEdit,
) -> Result<FinalMatch, TournamentError> {
    store.edit_final(id, edit)
}

/// Record a final's score. The winner is the higher score; a played final cannot be
/// scored again.
pub fn submit_final_score<S: TournamentStore + ?Sized>(
    store: &S,
    id: FinalId,
    team_1_score: i64,
    team_2_score: i64,
) -> Result<FinalMatch, TournamentError> {
    let score = ScoreLine::new(team_1_score, team_2_score)?;
    let played = store.complete_final(id, score)?;
    log::info!(
        "{:?} match {} completed {}-{}",
        played.round,
        id,
        score.team_1,
        score.team_2
    );
    Ok(played)
}

pub fn delete_final<S: TournamentStore + ?Sized>(
    store: &S,
    id: FinalId,
) -> Result<(), TournamentError> {
    store.delete_final(id)
}

/// Finals ordered by round then creation, optionally only one round.
pub fn list_finals<S: TournamentStore + ?Sized>(
    store: &S,
    round: Option<FinalRound>,
) -> Result<Vec<FinalView>, TournamentError> {
    let summaries = summary_index(store)?;
    Ok(store
        .list_finals()?
        .into_iter()
        .filter(|f| round.map_or(true, |r| f.round == r))
        .map(|f| FinalView {
            completed: f.is_completed(),
            team_1_summary: lookup_summary(&summaries, f.team_1),
            team_2_summary: lookup_summary(&summaries, f.team_2),
            winner_summary: f.winner.map(|w| lookup_summary(&summaries, w)),
            final_match: f,
        })
        .collect())
}

/// Every bracket round in order, including empty ones.
pub fn bracket<S: TournamentStore + ?Sized>(store: &S) -> Result<Vec<BracketRound>, TournamentError> {
    let finals = list_finals(store, None)?;
    Ok(FinalRound::ALL
        .iter()
        .map(|&round| BracketRound {
            round,
            matches: finals
                .iter()
                .filter(|f| f.final_match.round == round)
                .cloned()
                .collect(),
        })
        .collect())
}
