//! Group matches, bracket matches, and the score line shared by both.

use crate::models::group::GroupId;
use crate::models::standing::MatchOutcome;
use crate::models::team::TeamId;
use crate::models::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group match.
pub type MatchId = Uuid;

/// Unique identifier for a bracket match.
pub type FinalId = Uuid;

/// Games a side needs to take the set.
pub const MIN_GAMES_TO_WIN: u32 = 6;

/// Most games one side can be credited with in a single match.
pub const MAX_GAMES: u32 = 99;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

/// Lifecycle of a group match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Bracket round a final-stage match belongs to. Declaration order is display order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalRound {
    Quarter,
    Semis,
    Final,
}

impl FinalRound {
    pub const ALL: [FinalRound; 3] = [FinalRound::Quarter, FinalRound::Semis, FinalRound::Final];
}

/// A validated set score. Construct with [`ScoreLine::new`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub team_1: u32,
    pub team_2: u32,
}

impl ScoreLine {
    /// Validate a submitted score: non-negative, at most [`MAX_GAMES`], no tie, and at
    /// least one side reached [`MIN_GAMES_TO_WIN`].
    pub fn new(team_1: i64, team_2: i64) -> Result<Self, TournamentError> {
        if team_1 < 0 || team_2 < 0 {
            return Err(TournamentError::validation("Scores cannot be negative"));
        }
        if team_1 == team_2 {
            return Err(TournamentError::validation(
                "Scores cannot be equal - there must be a winner",
            ));
        }
        let to_games = |s: i64| {
            u32::try_from(s).map_err(|_| TournamentError::validation("Score is out of range"))
        };
        let (team_1, team_2) = (to_games(team_1)?, to_games(team_2)?);
        if team_1 > MAX_GAMES || team_2 > MAX_GAMES {
            return Err(TournamentError::validation(format!(
                "A score cannot exceed {MAX_GAMES} games"
            )));
        }
        if team_1 < MIN_GAMES_TO_WIN && team_2 < MIN_GAMES_TO_WIN {
            return Err(TournamentError::validation(format!(
                "At least one team must reach {MIN_GAMES_TO_WIN} games to win"
            )));
        }
        Ok(Self { team_1, team_2 })
    }

    /// The higher-scoring side. Scores never tie once validated.
    pub fn winner(&self) -> Side {
        if self.team_1 > self.team_2 {
            Side::One
        } else {
            Side::Two
        }
    }
}

/// A round-robin match between two teams of the same group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub group_id: GroupId,
    pub team_1: TeamId,
    pub team_2: TeamId,
    /// Both None until played.
    pub team_1_score: Option<u32>,
    pub team_2_score: Option<u32>,
    pub status: MatchStatus,
    /// Computed from the scores on completion, never taken from the client.
    pub winner: Option<TeamId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn new(group_id: GroupId, team_1: TeamId, team_2: TeamId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            group_id,
            team_1,
            team_2,
            team_1_score: None,
            team_2_score: None,
            status: MatchStatus::Pending,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn team_on(&self, side: Side) -> TeamId {
        match side {
            Side::One => self.team_1,
            Side::Two => self.team_2,
        }
    }

    /// Standings input for this match played with `score`; team 1 is side A.
    pub fn outcome(&self, score: ScoreLine) -> MatchOutcome {
        MatchOutcome {
            match_id: self.id,
            group_id: self.group_id,
            team_a: self.team_1,
            team_a_score: score.team_1,
            team_b: self.team_2,
            team_b_score: score.team_2,
        }
    }
}

/// A bracket-stage match (quarter, semis or final).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinalMatch {
    pub id: FinalId,
    pub round: FinalRound,
    pub team_1: TeamId,
    pub team_2: TeamId,
    pub team_1_score: Option<u32>,
    pub team_2_score: Option<u32>,
    pub winner: Option<TeamId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinalMatch {
    pub fn new(round: FinalRound, team_1: TeamId, team_2: TeamId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            round,
            team_1,
            team_2,
            team_1_score: None,
            team_2_score: None,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A final is completed once its scores are recorded.
    pub fn is_completed(&self) -> bool {
        self.team_1_score.is_some() && self.team_2_score.is_some()
    }

    pub fn team_on(&self, side: Side) -> TeamId {
        match side {
            Side::One => self.team_1,
            Side::Two => self.team_2,
        }
    }
}
