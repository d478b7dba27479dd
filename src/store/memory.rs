//! In-memory store behind a single `RwLock`, with optional JSON snapshots on disk.

use super::{FinalEdit, MatchUpdate, StandingKey, StoreResult, TournamentStore};
use crate::models::{
    ensure_distinct_players, Assignment, FinalId, FinalMatch, Group, GroupId, Match, MatchId,
    MatchStatus, Player, PlayerId, ScoreLine, StandingDelta, StandingRecord, Team, TeamId,
    TournamentError,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Full store contents; also the on-disk snapshot format.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub groups: Vec<Group>,
    pub assignments: Vec<Assignment>,
    pub matches: Vec<Match>,
    pub standings: Vec<StandingRecord>,
    pub finals: Vec<FinalMatch>,
}

/// All tournament state in one lock. Each trait method takes the lock exactly once,
/// which is what makes the match gate and the standings deltas atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreSnapshot>,
    /// Set by every write; cleared by [`MemoryStore::flush`].
    dirty: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
            dirty: AtomicBool::new(false),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> StoreResult<StoreSnapshot> {
        Ok(self.read()?.clone())
    }

    /// Load a snapshot file. A missing file gives an empty store.
    pub fn load(path: &Path) -> StoreResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let snapshot: StoreSnapshot = serde_json::from_str(&text).map_err(|e| {
                    TournamentError::Store(format!("invalid snapshot {}: {e}", path.display()))
                })?;
                log::info!(
                    "Loaded snapshot {} ({} teams, {} groups, {} matches)",
                    path.display(),
                    snapshot.teams.len(),
                    snapshot.groups.len(),
                    snapshot.matches.len()
                );
                Ok(Self::from_snapshot(snapshot))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(io_error(path, e)),
        }
    }

    /// Write the snapshot to `path` (via a temporary file, then rename).
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let json = {
            let state = self.read()?;
            serde_json::to_string_pretty(&*state)
                .map_err(|e| TournamentError::Store(format!("snapshot encoding failed: {e}")))?
        };
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;
        Ok(())
    }

    /// Save only if something was written since the last flush. Returns whether a
    /// snapshot was written.
    pub fn flush(&self, path: &Path) -> StoreResult<bool> {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }
        if let Err(e) = self.save(path) {
            self.dirty.store(true, Ordering::Release);
            return Err(e);
        }
        Ok(true)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreSnapshot>> {
        self.state
            .read()
            .map_err(|_| TournamentError::Store("lock error".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreSnapshot>> {
        let guard = self
            .state
            .write()
            .map_err(|_| TournamentError::Store("lock error".to_string()))?;
        self.dirty.store(true, Ordering::Release);
        Ok(guard)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> TournamentError {
    TournamentError::Store(format!("{}: {e}", path.display()))
}

fn require_player(state: &StoreSnapshot, id: PlayerId) -> StoreResult<()> {
    if state.players.iter().any(|p| p.id == id) {
        Ok(())
    } else {
        Err(TournamentError::not_found("Player", id))
    }
}

fn require_team(state: &StoreSnapshot, id: TeamId) -> StoreResult<()> {
    if state.teams.iter().any(|t| t.id == id) {
        Ok(())
    } else {
        Err(TournamentError::not_found("Team", id))
    }
}

const ASSIGNMENTS_LOCKED: &str = "The group stage has already started; assignments are locked";

fn ensure_assignments_open(state: &StoreSnapshot) -> StoreResult<()> {
    if state.standings.is_empty() {
        Ok(())
    } else {
        Err(TournamentError::validation(ASSIGNMENTS_LOCKED))
    }
}

/// New values for the two records a completed match touches, in team 1, team 2 order.
/// Checked against the match and for counter overflow before anything is written.
fn applied_standings(
    state: &StoreSnapshot,
    game: &Match,
    standings: &[(StandingKey, StandingDelta); 2],
) -> StoreResult<[(usize, StandingRecord); 2]> {
    Ok([
        applied_standing(state, game, game.team_1, &standings[0])?,
        applied_standing(state, game, game.team_2, &standings[1])?,
    ])
}

fn applied_standing(
    state: &StoreSnapshot,
    game: &Match,
    team_id: TeamId,
    (key, delta): &(StandingKey, StandingDelta),
) -> StoreResult<(usize, StandingRecord)> {
    if key.group_id != game.group_id || key.team_id != team_id {
        return Err(TournamentError::validation(
            "Standings update does not belong to this match",
        ));
    }
    let idx = state
        .standings
        .iter()
        .position(|s| s.group_id == key.group_id && s.team_id == key.team_id)
        .ok_or(TournamentError::RecordNotFound {
            group_id: key.group_id,
            team_id: key.team_id,
        })?;
    let record = state.standings[idx].applied(delta).ok_or_else(|| {
        TournamentError::Store(format!(
            "standings counter overflow for team {} in group {}",
            key.team_id, key.group_id
        ))
    })?;
    Ok((idx, record))
}

fn group_name_taken(state: &StoreSnapshot, name: &str, except: Option<GroupId>) -> bool {
    state
        .groups
        .iter()
        .any(|g| Some(g.id) != except && g.name.eq_ignore_ascii_case(name))
}

impl TournamentStore for MemoryStore {
    fn list_players(&self) -> StoreResult<Vec<Player>> {
        let mut players = self.read()?.players.clone();
        players.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(players)
    }

    fn get_player(&self, id: PlayerId) -> StoreResult<Option<Player>> {
        Ok(self.read()?.players.iter().find(|p| p.id == id).cloned())
    }

    fn insert_player(&self, player: Player) -> StoreResult<Player> {
        self.write()?.players.push(player.clone());
        Ok(player)
    }

    fn rename_player(&self, id: PlayerId, name: String) -> StoreResult<Player> {
        let mut state = self.write()?;
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TournamentError::not_found("Player", id))?;
        player.name = name;
        Ok(player.clone())
    }

    fn delete_player(&self, id: PlayerId) -> StoreResult<()> {
        let mut state = self.write()?;
        let idx = state
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::not_found("Player", id))?;
        if state.teams.iter().any(|t| t.has_player(id)) {
            return Err(TournamentError::validation(
                "Player is part of a team; delete or edit the team first",
            ));
        }
        state.players.remove(idx);
        Ok(())
    }

    fn list_teams(&self) -> StoreResult<Vec<Team>> {
        Ok(self.read()?.teams.clone())
    }

    fn get_team(&self, id: TeamId) -> StoreResult<Option<Team>> {
        Ok(self.read()?.teams.iter().find(|t| t.id == id).cloned())
    }

    fn insert_team(&self, team: Team) -> StoreResult<Team> {
        let mut state = self.write()?;
        ensure_distinct_players(team.player_1, team.player_2)?;
        require_player(&state, team.player_1)?;
        require_player(&state, team.player_2)?;
        state.teams.push(team.clone());
        Ok(team)
    }

    fn update_team(
        &self,
        id: TeamId,
        player_1: PlayerId,
        player_2: PlayerId,
    ) -> StoreResult<Team> {
        ensure_distinct_players(player_1, player_2)?;
        let mut state = self.write()?;
        require_player(&state, player_1)?;
        require_player(&state, player_2)?;
        let team = state
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::not_found("Team", id))?;
        team.player_1 = player_1;
        team.player_2 = player_2;
        Ok(team.clone())
    }

    fn delete_team(&self, id: TeamId) -> StoreResult<()> {
        let mut state = self.write()?;
        let idx = state
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(TournamentError::not_found("Team", id))?;
        if state.standings.iter().any(|s| s.team_id == id) {
            return Err(TournamentError::validation(
                "Team has standings; reset the group stage before deleting it",
            ));
        }
        state.assignments.retain(|a| a.team_id != id);
        state.teams.remove(idx);
        Ok(())
    }

    fn list_groups(&self) -> StoreResult<Vec<Group>> {
        let mut groups = self.read()?.groups.clone();
        groups.sort_by_key(|g| g.name.to_lowercase());
        Ok(groups)
    }

    fn get_group(&self, id: GroupId) -> StoreResult<Option<Group>> {
        Ok(self.read()?.groups.iter().find(|g| g.id == id).cloned())
    }

    fn insert_group(&self, group: Group) -> StoreResult<Group> {
        let mut state = self.write()?;
        if group_name_taken(&state, &group.name, None) {
            return Err(TournamentError::validation(
                "A group with this name already exists",
            ));
        }
        state.groups.push(group.clone());
        Ok(group)
    }

    fn rename_group(&self, id: GroupId, name: String) -> StoreResult<Group> {
        let mut state = self.write()?;
        if group_name_taken(&state, &name, Some(id)) {
            return Err(TournamentError::validation(
                "A group with this name already exists",
            ));
        }
        let group = state
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(TournamentError::not_found("Group", id))?;
        group.name = name;
        Ok(group.clone())
    }

    fn delete_group(&self, id: GroupId) -> StoreResult<()> {
        let mut state = self.write()?;
        let idx = state
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(TournamentError::not_found("Group", id))?;
        if state.standings.iter().any(|s| s.group_id == id) {
            return Err(TournamentError::validation(
                "Group has standings; reset the group stage before deleting it",
            ));
        }
        state.assignments.retain(|a| a.group_id != id);
        state.groups.remove(idx);
        Ok(())
    }

    fn list_assignments(&self) -> StoreResult<Vec<Assignment>> {
        Ok(self.read()?.assignments.clone())
    }

    fn insert_assignment(&self, assignment: Assignment) -> StoreResult<Assignment> {
        let mut state = self.write()?;
        if !state.groups.iter().any(|g| g.id == assignment.group_id) {
            return Err(TournamentError::not_found("Group", assignment.group_id));
        }
        require_team(&state, assignment.team_id)?;
        ensure_assignments_open(&state)?;
        if state
            .assignments
            .iter()
            .any(|a| a.team_id == assignment.team_id)
        {
            return Err(TournamentError::validation(
                "Team is already assigned to a group",
            ));
        }
        state.assignments.push(assignment.clone());
        Ok(assignment)
    }

    fn delete_assignment(&self, group_id: GroupId, team_id: TeamId) -> StoreResult<bool> {
        let mut state = self.write()?;
        ensure_assignments_open(&state)?;
        let before = state.assignments.len();
        state
            .assignments
            .retain(|a| !(a.group_id == group_id && a.team_id == team_id));
        Ok(state.assignments.len() != before)
    }

    fn list_standing_records(&self, group_id: Option<GroupId>) -> StoreResult<Vec<StandingRecord>> {
        Ok(self
            .read()?
            .standings
            .iter()
            .filter(|s| group_id.map_or(true, |g| s.group_id == g))
            .cloned()
            .collect())
    }

    fn create_standing_records(&self, records: Vec<StandingRecord>) -> StoreResult<usize> {
        let mut state = self.write()?;
        if !state.standings.is_empty() {
            return Err(TournamentError::AlreadyInitialized);
        }
        let assigned: HashSet<(GroupId, TeamId)> = state
            .assignments
            .iter()
            .map(|a| (a.group_id, a.team_id))
            .collect();
        let covered: HashSet<(GroupId, TeamId)> =
            records.iter().map(|r| (r.group_id, r.team_id)).collect();
        if covered != assigned || covered.len() != records.len() {
            return Err(TournamentError::validation(
                "Assignments changed while the group stage was starting; try again",
            ));
        }
        let created = records.len();
        state.standings.extend(records);
        Ok(created)
    }

    fn clear_standing_records(&self) -> StoreResult<usize> {
        let mut state = self.write()?;
        let cleared = state.standings.len();
        state.standings.clear();
        Ok(cleared)
    }

    fn list_matches(&self, group_id: Option<GroupId>) -> StoreResult<Vec<Match>> {
        Ok(self
            .read()?
            .matches
            .iter()
            .filter(|m| group_id.map_or(true, |g| m.group_id == g))
            .cloned()
            .collect())
    }

    fn get_match(&self, id: MatchId) -> StoreResult<Option<Match>> {
        Ok(self.read()?.matches.iter().find(|m| m.id == id).cloned())
    }

    fn create_matches(&self, matches: Vec<Match>) -> StoreResult<usize> {
        let created = matches.len();
        self.write()?.matches.extend(matches);
        Ok(created)
    }

    fn update_match(&self, id: MatchId, update: MatchUpdate) -> StoreResult<Match> {
        let mut state = self.write()?;
        let idx = state
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(TournamentError::not_found("Match", id))?;
        if state.matches[idx].status == MatchStatus::Completed {
            return Err(TournamentError::DuplicateResult(id));
        }
        match update {
            MatchUpdate::Start => {
                let m = &mut state.matches[idx];
                if m.status != MatchStatus::Pending {
                    return Err(TournamentError::validation("Match is already in progress"));
                }
                m.status = MatchStatus::InProgress;
                m.updated_at = Utc::now();
            }
            MatchUpdate::Complete { score, standings } => {
                let updated = applied_standings(&state, &state.matches[idx], &standings)?;
                let m = &mut state.matches[idx];
                m.team_1_score = Some(score.team_1);
                m.team_2_score = Some(score.team_2);
                m.winner = Some(m.team_on(score.winner()));
                m.status = MatchStatus::Completed;
                m.updated_at = Utc::now();
                for (i, record) in updated {
                    state.standings[i] = record;
                }
            }
        }
        Ok(state.matches[idx].clone())
    }

    fn clear_matches(&self) -> StoreResult<usize> {
        let mut state = self.write()?;
        let cleared = state.matches.len();
        state.matches.clear();
        Ok(cleared)
    }

    fn list_finals(&self) -> StoreResult<Vec<FinalMatch>> {
        let mut finals = self.read()?.finals.clone();
        finals.sort_by_key(|f| (f.round, f.created_at));
        Ok(finals)
    }

    fn get_final(&self, id: FinalId) -> StoreResult<Option<FinalMatch>> {
        Ok(self.read()?.finals.iter().find(|f| f.id == id).cloned())
    }

    fn insert_final(&self, final_match: FinalMatch) -> StoreResult<FinalMatch> {
        let mut state = self.write()?;
        ensure_distinct_teams(final_match.team_1, final_match.team_2)?;
        require_team(&state, final_match.team_1)?;
        require_team(&state, final_match.team_2)?;
        state.finals.push(final_match.clone());
        Ok(final_match)
    }

    fn edit_final(&self, id: FinalId, edit: FinalEdit) -> StoreResult<FinalMatch> {
        let mut state = self.write()?;
        let current = state
            .finals
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(TournamentError::not_found("Final", id))?;
        if current.is_completed() {
            return Err(TournamentError::validation(
                "Completed finals cannot be edited",
            ));
        }
        let team_1 = edit.team_1.unwrap_or(current.team_1);
        let team_2 = edit.team_2.unwrap_or(current.team_2);
        ensure_distinct_teams(team_1, team_2)?;
        require_team(&state, team_1)?;
        require_team(&state, team_2)?;
        let f = state
            .finals
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(TournamentError::not_found("Final", id))?;
        f.round = edit.round.unwrap_or(f.round);
        f.team_1 = team_1;
        f.team_2 = team_2;
        f.updated_at = Utc::now();
        Ok(f.clone())
    }

    fn complete_final(&self, id: FinalId, score: ScoreLine) -> StoreResult<FinalMatch> {
        let mut state = self.write()?;
        let f = state
            .finals
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(TournamentError::not_found("Final", id))?;
        if f.is_completed() {
            return Err(TournamentError::DuplicateResult(id));
        }
        f.team_1_score = Some(score.team_1);
        f.team_2_score = Some(score.team_2);
        f.winner = Some(f.team_on(score.winner()));
        f.updated_at = Utc::now();
        Ok(f.clone())
    }

    fn delete_final(&self, id: FinalId) -> StoreResult<()> {
        let mut state = self.write()?;
        let idx = state
            .finals
            .iter()
            .position(|f| f.id == id)
            .ok_or(TournamentError::not_found("Final", id))?;
        state.finals.remove(idx);
        Ok(())
    }
}

fn ensure_distinct_teams(team_1: TeamId, team_2: TeamId) -> StoreResult<()> {
    if team_1 == team_2 {
        return Err(TournamentError::validation(
            "Team 2 must be different from Team 1",
        ));
    }
    Ok(())
}
