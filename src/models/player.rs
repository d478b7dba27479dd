//! Player data structure.

use crate::models::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams and lookups).
pub type PlayerId = Uuid;

/// Shortest accepted player name (after trimming).
pub const MIN_PLAYER_NAME_LEN: usize = 2;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player. The name is trimmed and must be at least two characters.
    pub fn new(name: &str) -> Result<Self, TournamentError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_player_name(name)?,
            created_at: Utc::now(),
        })
    }
}

/// Trim and check a player name.
pub fn validate_player_name(name: &str) -> Result<String, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::validation("Name is required"));
    }
    if name.chars().count() < MIN_PLAYER_NAME_LEN {
        return Err(TournamentError::validation(
            "Name must be at least 2 characters",
        ));
    }
    Ok(name.to_string())
}
