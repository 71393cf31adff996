//! Two-pool bracket engine: library with models, result store seam, and
//! progression logic. All bracket state is re-derived from persisted match
//! result rows; only the pool draw itself is held by the caller.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    championship_match, generate_knockout, group_result, partition_pools, pool_winners,
    record_final_winner, record_group_winner, record_knockout_winner, record_third_place,
    third_place_candidates, third_place_result, PoolKnockout,
};
pub use models::{
    group_stage_id, knockout_stage_id, parse_roster, third_place_stage_id, BracketError,
    ClubbedResult, Group, KnockoutMatch, MatchResult, NewClubbedResult, NewMatchResult,
    NewSummaryResult, Participant, PlayerId, Pool, PoolId, Position, ResultType, RowId, ScopeId,
    SummaryResult, FINAL_STAGE,
};
pub use store::{MemoryStore, ResultStore, StoreError};
