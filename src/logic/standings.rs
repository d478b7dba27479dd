//! Standings ledger: one record per (group, team), created once and updated per result.

use crate::models::{
    Assignment, GroupId, Match, MatchOutcome, ScoreLine, Side, StandingDelta, StandingRecord,
    TournamentError,
};
use crate::store::{MatchUpdate, StandingKey, TournamentStore};

/// Standings operations over a store.
pub struct StandingsLedger<'a, S: TournamentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: TournamentStore + ?Sized> StandingsLedger<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// True once any standing record exists.
    pub fn is_initialized(&self) -> Result<bool, TournamentError> {
        Ok(!self.store.list_standing_records(None)?.is_empty())
    }

    /// Create a zeroed record for every (group, team) in `assignments`. Runs once: fails
    /// with `NoAssignments` on an empty slice and `AlreadyInitialized` while records
    /// exist. Returns the number of records created.
    pub fn initialize(&self, assignments: &[Assignment]) -> Result<usize, TournamentError> {
        if assignments.is_empty() {
            return Err(TournamentError::NoAssignments);
        }
        if self.is_initialized()? {
            return Err(TournamentError::AlreadyInitialized);
        }
        let records = assignments
            .iter()
            .map(|a| StandingRecord::new(a.group_id, a.team_id))
            .collect();
        let created = self.store.create_standing_records(records)?;
        log::info!("Initialized standings for {} team(s)", created);
        Ok(created)
    }

    pub fn records(&self, group_id: Option<GroupId>) -> Result<Vec<StandingRecord>, TournamentError> {
        self.store.list_standing_records(group_id)
    }

    /// Complete the match and credit both teams in one store update. Nothing changes
    /// unless both records exist and neither counter would overflow.
    pub fn apply_result(&self, outcome: &MatchOutcome) -> Result<Match, TournamentError> {
        if outcome.team_a == outcome.team_b {
            return Err(TournamentError::validation("A team cannot play itself"));
        }
        let score = ScoreLine::new(
            i64::from(outcome.team_a_score),
            i64::from(outcome.team_b_score),
        )?;
        let a_won = score.winner() == Side::One;
        let key = |team_id| StandingKey {
            group_id: outcome.group_id,
            team_id,
        };
        let standings = [
            (
                key(outcome.team_a),
                StandingDelta {
                    won: a_won,
                    games_won: score.team_1,
                    games_lost: score.team_2,
                },
            ),
            (
                key(outcome.team_b),
                StandingDelta {
                    won: !a_won,
                    games_won: score.team_2,
                    games_lost: score.team_1,
                },
            ),
        ];
        self.store
            .update_match(outcome.match_id, MatchUpdate::Complete { score, standings })
            .map_err(integrity_failure)
    }

    /// Remove every record so the group stage can be started again.
    pub fn clear(&self) -> Result<usize, TournamentError> {
        let cleared = self.store.clear_standing_records()?;
        log::warn!("Cleared {} standing record(s)", cleared);
        Ok(cleared)
    }
}

/// Log fatal errors where they are detected; pass everything through unchanged.
fn integrity_failure(e: TournamentError) -> TournamentError {
    if e.is_fatal() {
        log::error!("Standings integrity failure: {}", e);
    }
    e
}
