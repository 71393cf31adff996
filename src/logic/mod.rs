//! Bracket engine: pool partitioning, knockout derivation, finals, cascade.

mod cascade;
mod finals;
mod knockout;
mod pools;

pub use cascade::record_final_winner;
pub use finals::{
    championship_match, record_third_place, third_place_candidates, third_place_result,
};
pub use knockout::{generate_knockout, record_knockout_winner, PoolKnockout};
pub use pools::{group_result, partition_pools, pool_winners, record_group_winner};
