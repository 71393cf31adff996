//! External row-store seam. The engine never talks to a database directly;
//! it reads and writes typed rows through `ResultStore`, and recomputes all
//! bracket state from the rows on every read.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    ClubbedResult, MatchResult, NewClubbedResult, NewMatchResult, NewSummaryResult, PlayerId,
    RowId, ScopeId, SummaryResult,
};

/// Errors from the persistence layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// A match result for this `(scope, match_stage)` already exists.
    DuplicateStage(String),
    /// No row with the given id.
    RowNotFound,
    /// The backing store rejected the operation (network store, etc.).
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateStage(stage) => {
                write!(f, "A result for stage {} already exists", stage)
            }
            StoreError::RowNotFound => write!(f, "Row not found"),
            StoreError::Backend(msg) => write!(f, "Store rejected the operation: {}", msg),
        }
    }
}

/// Row-level CRUD over the three logical result tables, scoped per bracket
/// run. Reads return the full relevant row set; the engine re-derives from it.
pub trait ResultStore {
    /// All match results for the scope, in insertion order.
    fn match_results(&self, scope: ScopeId) -> Result<Vec<MatchResult>, StoreError>;

    /// Insert a match result. `(scope, match_stage)` must be unique.
    fn insert_match_result(&mut self, row: NewMatchResult) -> Result<MatchResult, StoreError>;

    /// Overwrite the winner of an existing match result.
    fn set_match_winner(&mut self, row_id: RowId, winner_id: PlayerId) -> Result<(), StoreError>;

    fn summary_results(&self, scope: ScopeId) -> Result<Vec<SummaryResult>, StoreError>;

    fn insert_summary_result(&mut self, row: NewSummaryResult)
        -> Result<SummaryResult, StoreError>;

    fn delete_summary_result(&mut self, row_id: RowId) -> Result<(), StoreError>;

    fn clubbed_results(&self, scope: ScopeId) -> Result<Vec<ClubbedResult>, StoreError>;

    fn insert_clubbed_result(&mut self, row: NewClubbedResult)
        -> Result<ClubbedResult, StoreError>;

    fn delete_clubbed_result(&mut self, row_id: RowId) -> Result<(), StoreError>;
}
