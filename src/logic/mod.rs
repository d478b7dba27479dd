//! Tournament business logic: roster, assignments, group stage, standings, finals.

pub mod assignments;
pub mod finals;
pub mod group_stage;
pub mod pairing;
pub mod ranking;
pub mod roster;
pub mod standings;

pub use assignments::{
    assignment_grid, toggle_assignment, unassigned_teams, AssignableTeam, GroupAssignments,
};
pub use finals::{
    bracket, create_final, delete_final, edit_final, get_final, list_finals, submit_final_score,
    BracketRound, FinalView,
};
pub use group_stage::{
    generate_group_matches, group_stage_status, group_standings, matches_overview,
    reset_group_stage, standings_tables, start_group_stage, start_match, submit_match_score,
    GroupMatches, GroupStageReset, GroupStageStatus, GroupStageSummary, MatchTotals, MatchView,
    MatchesOverview, StandingRow, StandingsTable,
};
pub use pairing::{generate_pairings, group_assignments, GroupPairings, Pairing};
pub use ranking::{project_standings, RankedStanding};
pub use roster::{
    create_group, create_player, create_team, delete_group, delete_player, delete_team,
    get_group, get_player, get_team, rename_group, rename_player, team_summaries, team_summary,
    update_team,
};
pub use standings::StandingsLedger;
