//! Group stage: start the tournament, record match scores, and read matches and standings.

use crate::logic::pairing::{generate_pairings, group_assignments};
use crate::logic::ranking::project_standings;
use crate::logic::roster::{get_group, lookup_summary, summary_index};
use crate::logic::standings::StandingsLedger;
use crate::models::{
    Assignment, Group, GroupId, Match, MatchId, MatchStatus, ScoreLine, StandingRecord, TeamId,
    TeamSummary, TournamentError,
};
use crate::store::{MatchUpdate, TournamentStore};
use serde::Serialize;
use std::collections::HashMap;

/// What starting the group stage created.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct GroupStageSummary {
    pub standings_created: usize,
    pub matches_created: usize,
}

/// What a reset removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct GroupStageReset {
    pub standings_cleared: usize,
    pub matches_cleared: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct GroupStageStatus {
    pub initialized: bool,
    pub totals: MatchTotals,
}

/// A match with both teams resolved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub game: Match,
    pub team_1_summary: TeamSummary,
    pub team_2_summary: TeamSummary,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GroupMatches {
    pub group: Group,
    pub matches: Vec<MatchView>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MatchTotals {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl MatchTotals {
    fn count(matches: &[Match]) -> Self {
        matches.iter().fold(Self::default(), |mut t, m| {
            t.total += 1;
            match m.status {
                MatchStatus::Pending => t.pending += 1,
                MatchStatus::InProgress => t.in_progress += 1,
                MatchStatus::Completed => t.completed += 1,
            }
            t
        })
    }
}

/// Matches per group plus totals over every match (totals ignore the status filter).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchesOverview {
    pub groups: Vec<GroupMatches>,
    pub totals: MatchTotals,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingRow {
    pub position: usize,
    pub team: TeamSummary,
    pub record: StandingRecord,
    pub game_difference: i64,
}

/// Ranked standings of one group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingsTable {
    pub group: Group,
    pub rows: Vec<StandingRow>,
}

/// Start the tournament: create standings for every assigned team, then generate every
/// group's round-robin matches.
pub fn start_group_stage<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<GroupStageSummary, TournamentError> {
    let assignments = store.list_assignments()?;
    let standings_created = StandingsLedger::new(store).initialize(&assignments)?;
    let matches_created = generate_group_matches(store, &assignments)?;
    log::info!(
        "Group stage started: {} standing(s), {} match(es)",
        standings_created,
        matches_created
    );
    Ok(GroupStageSummary {
        standings_created,
        matches_created,
    })
}

/// Persist a pending match for every round-robin pairing of `assignments`.
pub fn generate_group_matches<S: TournamentStore + ?Sized>(
    store: &S,
    assignments: &[Assignment],
) -> Result<usize, TournamentError> {
    let by_group = group_assignments(assignments);
    let matches: Vec<Match> = generate_pairings(&by_group)?
        .into_iter()
        .flat_map(|g| {
            g.pairings
                .into_iter()
                .map(move |p| Match::new(g.group_id, p.team_1, p.team_2))
        })
        .collect();
    if matches.is_empty() {
        log::warn!("No group has two teams; no matches generated");
    }
    store.create_matches(matches)
}

/// Mark a pending match as in progress.
pub fn start_match<S: TournamentStore + ?Sized>(
    store: &S,
    match_id: MatchId,
) -> Result<Match, TournamentError> {
    store.update_match(match_id, MatchUpdate::Start)
}

/// Record a match score and update both teams' standings.
///
/// The result is applied at most once: the store completes the match and credits both
/// records in one step, so exactly one submission wins and any other gets
/// `DuplicateResult`. A missing record or a counter overflow leaves the match pending.
pub fn submit_match_score<S: TournamentStore + ?Sized>(
    store: &S,
    match_id: MatchId,
    team_1_score: i64,
    team_2_score: i64,
) -> Result<Match, TournamentError> {
    let score = ScoreLine::new(team_1_score, team_2_score)?;
    let current = store
        .get_match(match_id)?
        .ok_or(TournamentError::not_found("Match", match_id))?;
    if current.is_completed() {
        return Err(TournamentError::DuplicateResult(match_id));
    }

    let completed = StandingsLedger::new(store).apply_result(&current.outcome(score))?;
    log::info!(
        "Match {} completed {}-{}",
        match_id,
        score.team_1,
        score.team_2
    );
    Ok(completed)
}

/// Matches grouped by group (groups sorted by name), optionally filtered by status.
/// Groups with no match left after filtering are omitted.
pub fn matches_overview<S: TournamentStore + ?Sized>(
    store: &S,
    status: Option<MatchStatus>,
) -> Result<MatchesOverview, TournamentError> {
    let all = store.list_matches(None)?;
    let totals = MatchTotals::count(&all);
    let summaries = summary_index(store)?;

    let groups = store
        .list_groups()?
        .into_iter()
        .filter_map(|group| {
            let matches: Vec<MatchView> = all
                .iter()
                .filter(|m| m.group_id == group.id)
                .filter(|m| status.map_or(true, |s| m.status == s))
                .map(|m| MatchView {
                    game: m.clone(),
                    team_1_summary: lookup_summary(&summaries, m.team_1),
                    team_2_summary: lookup_summary(&summaries, m.team_2),
                })
                .collect();
            (!matches.is_empty()).then_some(GroupMatches { group, matches })
        })
        .collect();

    Ok(MatchesOverview { groups, totals })
}

pub fn group_stage_status<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<GroupStageStatus, TournamentError> {
    Ok(GroupStageStatus {
        initialized: StandingsLedger::new(store).is_initialized()?,
        totals: MatchTotals::count(&store.list_matches(None)?),
    })
}

/// Ranked standings for one group.
pub fn group_standings<S: TournamentStore + ?Sized>(
    store: &S,
    group_id: GroupId,
) -> Result<StandingsTable, TournamentError> {
    let group = get_group(store, group_id)?;
    let summaries = summary_index(store)?;
    let records = StandingsLedger::new(store).records(Some(group_id))?;
    Ok(build_table(group, &records, &summaries))
}

/// Ranked standings for every group that has records, groups sorted by name.
pub fn standings_tables<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<Vec<StandingsTable>, TournamentError> {
    let summaries = summary_index(store)?;
    let records = StandingsLedger::new(store).records(None)?;
    Ok(store
        .list_groups()?
        .into_iter()
        .filter_map(|group| {
            let in_group: Vec<StandingRecord> = records
                .iter()
                .filter(|r| r.group_id == group.id)
                .cloned()
                .collect();
            (!in_group.is_empty()).then(|| build_table(group, &in_group, &summaries))
        })
        .collect())
}

fn build_table(
    group: Group,
    records: &[StandingRecord],
    summaries: &HashMap<TeamId, TeamSummary>,
) -> StandingsTable {
    let rows = project_standings(records)
        .into_iter()
        .map(|r| StandingRow {
            position: r.position,
            team: lookup_summary(summaries, r.record.team_id),
            game_difference: r.game_difference,
            record: r.record,
        })
        .collect();
    StandingsTable { group, rows }
}

/// Admin reset: drop all standings and group matches so the stage can start over.
pub fn reset_group_stage<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<GroupStageReset, TournamentError> {
    let standings_cleared = StandingsLedger::new(store).clear()?;
    let matches_cleared = store.clear_matches()?;
    log::warn!(
        "Group stage reset: {} standing(s), {} match(es) removed",
        standings_cleared,
        matches_cleared
    );
    Ok(GroupStageReset {
        standings_cleared,
        matches_cleared,
    })
}
