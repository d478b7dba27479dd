//! Errors returned by tournament operations.

use crate::models::game::MatchId;
use crate::models::group::GroupId;
use crate::models::team::TeamId;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
///
/// Every variant except [`TournamentError::RecordNotFound`] is a routine,
/// caller-facing rejection: nothing was mutated and the caller can correct the
/// input and retry.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Malformed or out-of-range input (negative or tied score, self-paired team, ...).
    #[error("{0}")]
    Validation(String),

    /// A referenced player, team, group, match or final does not exist.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Standings already exist; the group stage can only be started once.
    #[error("Tournament standings already initialized. Clear existing standings first.")]
    AlreadyInitialized,

    /// No team is assigned to any group.
    #[error("No teams assigned to groups. Please assign teams before starting the tournament.")]
    NoAssignments,

    /// The match already has a result.
    #[error("Match is already completed")]
    DuplicateResult(MatchId),

    /// A team has a match in a group but no standing record there.
    #[error("Standing record missing for team {team_id} in group {group_id}")]
    RecordNotFound { group_id: GroupId, team_id: TeamId },

    /// The backing store failed (poisoned lock, snapshot I/O).
    #[error("Store error: {0}")]
    Store(String),
}

impl TournamentError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TournamentError::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        TournamentError::NotFound { entity, id }
    }

    /// Broken-invariant conditions that should alert rather than just be shown to a user.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TournamentError::RecordNotFound { .. } | TournamentError::Store(_)
        )
    }
}
