//! Persistence boundary for the tournament.
//!
//! Logic in [`crate::logic`] only talks to a [`TournamentStore`], never to a concrete
//! database client. [`MemoryStore`] is the implementation used by the web binary and
//! the tests.
//!
//! Every method is a single atomic step as seen by other callers. In particular
//! [`TournamentStore::update_match`] is the compare-and-set gate for match results: the
//! transition to completed and the standings deltas it carries land together or not at
//! all.

mod memory;

pub use memory::{MemoryStore, StoreSnapshot};

use crate::models::{
    Assignment, FinalId, FinalMatch, FinalRound, Group, GroupId, Match, MatchId, Player,
    PlayerId, ScoreLine, StandingDelta, StandingRecord, Team, TeamId, TournamentError,
};

pub type StoreResult<T> = Result<T, TournamentError>;

/// Status transition requested on a group match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchUpdate {
    /// pending -> in_progress.
    Start,
    /// pending | in_progress -> completed, storing the scores and the computed winner and
    /// applying the standings deltas for team 1 and team 2, in that order.
    Complete {
        score: ScoreLine,
        standings: [(StandingKey, StandingDelta); 2],
    },
}

/// Editable fields of a bracket match. `None` keeps the current value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FinalEdit {
    pub round: Option<FinalRound>,
    pub team_1: Option<TeamId>,
    pub team_2: Option<TeamId>,
}

/// Addresses a standing record by its natural key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StandingKey {
    pub group_id: GroupId,
    pub team_id: TeamId,
}

pub trait TournamentStore: Send + Sync {
    fn list_players(&self) -> StoreResult<Vec<Player>>;
    fn get_player(&self, id: PlayerId) -> StoreResult<Option<Player>>;
    fn insert_player(&self, player: Player) -> StoreResult<Player>;
    fn rename_player(&self, id: PlayerId, name: String) -> StoreResult<Player>;
    /// Fails while the player is part of a team.
    fn delete_player(&self, id: PlayerId) -> StoreResult<()>;

    fn list_teams(&self) -> StoreResult<Vec<Team>>;
    fn get_team(&self, id: TeamId) -> StoreResult<Option<Team>>;
    /// Both players must exist.
    fn insert_team(&self, team: Team) -> StoreResult<Team>;
    fn update_team(&self, id: TeamId, player_1: PlayerId, player_2: PlayerId)
        -> StoreResult<Team>;
    /// Removes the team's assignment. Fails while the team has a standing record.
    fn delete_team(&self, id: TeamId) -> StoreResult<()>;

    /// Sorted by name.
    fn list_groups(&self) -> StoreResult<Vec<Group>>;
    fn get_group(&self, id: GroupId) -> StoreResult<Option<Group>>;
    /// Group names are unique, ignoring case.
    fn insert_group(&self, group: Group) -> StoreResult<Group>;
    fn rename_group(&self, id: GroupId, name: String) -> StoreResult<Group>;
    /// Removes the group's assignments. Fails while the group has standing records.
    fn delete_group(&self, id: GroupId) -> StoreResult<()>;

    fn list_assignments(&self) -> StoreResult<Vec<Assignment>>;
    /// Fails if the team is already assigned to any group, or once standing records exist.
    fn insert_assignment(&self, assignment: Assignment) -> StoreResult<Assignment>;
    /// Returns whether an assignment was removed. Fails once standing records exist.
    fn delete_assignment(&self, group_id: GroupId, team_id: TeamId) -> StoreResult<bool>;

    fn list_standing_records(&self, group_id: Option<GroupId>)
        -> StoreResult<Vec<StandingRecord>>;
    /// Fails with [`TournamentError::AlreadyInitialized`] if any record exists, and with a
    /// validation error unless the records match the current assignments one to one.
    fn create_standing_records(&self, records: Vec<StandingRecord>) -> StoreResult<usize>;
    fn clear_standing_records(&self) -> StoreResult<usize>;

    /// Ordered by creation.
    fn list_matches(&self, group_id: Option<GroupId>) -> StoreResult<Vec<Match>>;
    fn get_match(&self, id: MatchId) -> StoreResult<Option<Match>>;
    fn create_matches(&self, matches: Vec<Match>) -> StoreResult<usize>;
    /// Checked status transition. Any update on a completed match fails with
    /// [`TournamentError::DuplicateResult`]. Completing fails with
    /// [`TournamentError::RecordNotFound`] when a standing record is missing, and with
    /// [`TournamentError::Store`] when a counter would overflow; the match and the
    /// standings are then left as they were.
    fn update_match(&self, id: MatchId, update: MatchUpdate) -> StoreResult<Match>;
    fn clear_matches(&self) -> StoreResult<usize>;

    /// Ordered by round, then creation.
    fn list_finals(&self) -> StoreResult<Vec<FinalMatch>>;
    fn get_final(&self, id: FinalId) -> StoreResult<Option<FinalMatch>>;
    fn insert_final(&self, final_match: FinalMatch) -> StoreResult<FinalMatch>;
    /// Fails once the final is completed.
    fn edit_final(&self, id: FinalId, edit: FinalEdit) -> StoreResult<FinalMatch>;
    /// Compare-and-set like [`TournamentStore::update_match`].
    fn complete_final(&self, id: FinalId, score: ScoreLine) -> StoreResult<FinalMatch>;
    fn delete_final(&self, id: FinalId) -> StoreResult<()>;
}
