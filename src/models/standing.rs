//! Per-team standings within a group.

use crate::models::game::MatchId;
use crate::models::group::GroupId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a standing record.
pub type StandingId = Uuid;

/// Running tally for one team in one group.
///
/// `matches_played == matches_won + matches_lost` always holds; the games
/// counters only grow.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRecord {
    pub id: StandingId,
    pub group_id: GroupId,
    pub team_id: TeamId,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl StandingRecord {
    /// Fresh record with every counter at zero.
    pub fn new(group_id: GroupId, team_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            team_id,
            matches_played: 0,
            matches_won: 0,
            matches_lost: 0,
            games_won: 0,
            games_lost: 0,
        }
    }

    /// games_won - games_lost.
    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }

    /// This record with one more match counted, or None if any counter would overflow.
    /// The won/lost pair and the games pair change together.
    pub fn applied(&self, delta: &StandingDelta) -> Option<Self> {
        let (won, lost) = if delta.won { (1, 0) } else { (0, 1) };
        Some(Self {
            matches_played: self.matches_played.checked_add(1)?,
            matches_won: self.matches_won.checked_add(won)?,
            matches_lost: self.matches_lost.checked_add(lost)?,
            games_won: self.games_won.checked_add(delta.games_won)?,
            games_lost: self.games_lost.checked_add(delta.games_lost)?,
            ..self.clone()
        })
    }
}

/// One match's contribution to a single standing record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StandingDelta {
    pub won: bool,
    pub games_won: u32,
    pub games_lost: u32,
}

/// A played match as seen by the standings ledger.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    pub group_id: GroupId,
    pub team_a: TeamId,
    pub team_a_score: u32,
    pub team_b: TeamId,
    pub team_b_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_counts_one_match() {
        let record = StandingRecord::new(Uuid::new_v4(), Uuid::new_v4());
        let next = record
            .applied(&StandingDelta {
                won: false,
                games_won: 4,
                games_lost: 6,
            })
            .unwrap();
        assert_eq!(
            (next.matches_played, next.matches_won, next.matches_lost),
            (1, 0, 1)
        );
        assert_eq!((next.games_won, next.games_lost), (4, 6));
        assert_eq!(record.matches_played, 0);
    }

    #[test]
    fn applied_refuses_counter_overflow() {
        let mut record = StandingRecord::new(Uuid::new_v4(), Uuid::new_v4());
        record.games_won = u32::MAX - 3;
        let delta = StandingDelta {
            won: true,
            games_won: 6,
            games_lost: 0,
        };
        assert_eq!(record.applied(&delta), None);
    }
}
