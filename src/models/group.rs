//! Groups and team-to-group assignments.

use crate::models::team::TeamId;
use crate::models::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A named round-robin group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: &str) -> Result<Self, TournamentError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_group_name(name)?,
            created_at: Utc::now(),
        })
    }
}

pub fn validate_group_name(name: &str) -> Result<String, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::validation("Group name is required"));
    }
    Ok(name.to_string())
}

/// A team placed in a group. A team has at most one assignment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub group_id: GroupId,
    pub team_id: TeamId,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(group_id: GroupId, team_id: TeamId) -> Self {
        Self {
            group_id,
            team_id,
            created_at: Utc::now(),
        }
    }
}
