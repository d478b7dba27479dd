pub mod finals;
pub mod group_stage;
pub mod roster;
