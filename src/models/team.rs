//! Team (two players) and its display summary.

use crate::models::player::{Player, PlayerId};
use crate::models::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// A padel team: an unordered pair of two different players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(player_1: PlayerId, player_2: PlayerId) -> Result<Self, TournamentError> {
        ensure_distinct_players(player_1, player_2)?;
        Ok(Self {
            id: Uuid::new_v4(),
            player_1,
            player_2,
            created_at: Utc::now(),
        })
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        self.player_1 == player || self.player_2 == player
    }
}

pub(crate) fn ensure_distinct_players(
    player_1: PlayerId,
    player_2: PlayerId,
) -> Result<(), TournamentError> {
    if player_1 == player_2 {
        return Err(TournamentError::validation(
            "Player 2 must be different from Player 1",
        ));
    }
    Ok(())
}

/// Player reference resolved at read time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

/// Team with its players joined in, for display. Players are optional because the
/// join is resolved at read time and a player row may be gone.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub player_1: Option<PlayerRef>,
    pub player_2: Option<PlayerRef>,
    pub display_name: String,
}

impl TeamSummary {
    /// Build the summary from the team and whatever players the store returned.
    pub fn resolve(team: &Team, players: &[Player]) -> Self {
        let lookup = |id: PlayerId| {
            players.iter().find(|p| p.id == id).map(|p| PlayerRef {
                id: p.id,
                name: p.name.clone(),
            })
        };
        let player_1 = lookup(team.player_1);
        let player_2 = lookup(team.player_2);
        let display_name = match (&player_1, &player_2) {
            (Some(a), Some(b)) => format!("{} & {}", a.name, b.name),
            _ => format!("Team {}", team.id),
        };
        Self {
            id: team.id,
            player_1,
            player_2,
            display_name,
        }
    }

    /// Summary for a team id that no longer resolves to a team.
    pub fn unresolved(id: TeamId) -> Self {
        Self {
            id,
            player_1: None,
            player_2: None,
            display_name: format!("Team {id}"),
        }
    }
}
