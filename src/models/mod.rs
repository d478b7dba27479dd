//! Data structures for the padel tournament: roster, groups, matches, standings.

mod error;
mod game;
mod group;
mod player;
mod standing;
mod team;

pub use error::TournamentError;
pub use game::{
    FinalId, FinalMatch, FinalRound, Match, MatchId, MatchStatus, ScoreLine, Side,
    MAX_GAMES, MIN_GAMES_TO_WIN,
};
pub use group::{validate_group_name, Assignment, Group, GroupId};
pub use player::{validate_player_name, Player, PlayerId};
pub use standing::{MatchOutcome, StandingDelta, StandingId, StandingRecord};
pub use team::{PlayerRef, Team, TeamId, TeamSummary};
pub(crate) use team::ensure_distinct_players;
