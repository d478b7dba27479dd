//! Padel tournament web app: models, store, business logic and the JSON API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    assignment_grid, bracket, create_final, create_group, create_player, create_team,
    delete_final, delete_group, delete_player, delete_team, edit_final, generate_pairings,
    group_stage_status, group_standings, list_finals, matches_overview, project_standings,
    rename_group, rename_player, reset_group_stage, standings_tables, start_group_stage,
    start_match, submit_final_score, submit_match_score, toggle_assignment, unassigned_teams,
    update_team, StandingsLedger,
};
pub use models::{
    Assignment, FinalId, FinalMatch, FinalRound, Group, GroupId, Match, MatchId, MatchOutcome,
    MatchStatus, Player, PlayerId, ScoreLine, Side, StandingRecord, Team, TeamId, TeamSummary,
    TournamentError, MAX_GAMES, MIN_GAMES_TO_WIN,
};
pub use store::{FinalEdit, MatchUpdate, MemoryStore, TournamentStore};
