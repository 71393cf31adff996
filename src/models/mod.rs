//! Data structures for the bracket engine: participants, pools, matches, result rows.

mod bracket;
mod player;
mod results;

pub use bracket::{
    group_stage_id, knockout_stage_id, third_place_stage_id, BracketError, Group, KnockoutMatch,
    Pool, PoolId, FINAL_STAGE,
};
pub use player::{parse_roster, Participant, PlayerId};
pub use results::{
    ClubbedResult, MatchResult, NewClubbedResult, NewMatchResult, NewSummaryResult, Position,
    ResultType, RowId, ScopeId, SummaryResult,
};
