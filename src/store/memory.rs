//! In-memory `ResultStore` used by the web binary and the tests.

use crate::models::{
    ClubbedResult, MatchResult, NewClubbedResult, NewMatchResult, NewSummaryResult, PlayerId,
    RowId, ScopeId, SummaryResult,
};
use crate::store::{ResultStore, StoreError};
use chrono::Utc;
use uuid::Uuid;

/// Vec-backed store. Rows keep insertion order per table, which doubles as
/// chronological order since `created_at` is assigned here.
#[derive(Debug, Default)]
pub struct MemoryStore {
    match_results: Vec<MatchResult>,
    summary_results: Vec<SummaryResult>,
    clubbed_results: Vec<ClubbedResult>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn match_results(&self, scope: ScopeId) -> Result<Vec<MatchResult>, StoreError> {
        Ok(self
            .match_results
            .iter()
            .filter(|r| r.scope_id == scope)
            .cloned()
            .collect())
    }

    fn insert_match_result(&mut self, row: NewMatchResult) -> Result<MatchResult, StoreError> {
        let duplicate = self
            .match_results
            .iter()
            .any(|r| r.scope_id == row.scope_id && r.match_stage == row.match_stage);
        if duplicate {
            return Err(StoreError::DuplicateStage(row.match_stage));
        }
        let stored = MatchResult {
            id: Uuid::new_v4(),
            scope_id: row.scope_id,
            player1_id: row.player1_id,
            player2_id: row.player2_id,
            winner_id: row.winner_id,
            match_stage: row.match_stage,
            created_at: Utc::now(),
        };
        self.match_results.push(stored.clone());
        Ok(stored)
    }

    fn set_match_winner(&mut self, row_id: RowId, winner_id: PlayerId) -> Result<(), StoreError> {
        let row = self
            .match_results
            .iter_mut()
            .find(|r| r.id == row_id)
            .ok_or(StoreError::RowNotFound)?;
        row.winner_id = winner_id;
        Ok(())
    }

    fn summary_results(&self, scope: ScopeId) -> Result<Vec<SummaryResult>, StoreError> {
        Ok(self
            .summary_results
            .iter()
            .filter(|r| r.scope_id == scope)
            .cloned()
            .collect())
    }

    fn insert_summary_result(
        &mut self,
        row: NewSummaryResult,
    ) -> Result<SummaryResult, StoreError> {
        let stored = SummaryResult {
            id: Uuid::new_v4(),
            scope_id: row.scope_id,
            group_name: row.group_name,
            player_id: row.player_id,
            result_type: row.result_type,
            position: row.position,
            created_at: Utc::now(),
        };
        self.summary_results.push(stored.clone());
        Ok(stored)
    }

    fn delete_summary_result(&mut self, row_id: RowId) -> Result<(), StoreError> {
        let before = self.summary_results.len();
        self.summary_results.retain(|r| r.id != row_id);
        if self.summary_results.len() == before {
            return Err(StoreError::RowNotFound);
        }
        Ok(())
    }

    fn clubbed_results(&self, scope: ScopeId) -> Result<Vec<ClubbedResult>, StoreError> {
        Ok(self
            .clubbed_results
            .iter()
            .filter(|r| r.scope_id == scope)
            .cloned()
            .collect())
    }

    fn insert_clubbed_result(
        &mut self,
        row: NewClubbedResult,
    ) -> Result<ClubbedResult, StoreError> {
        let stored = ClubbedResult {
            id: Uuid::new_v4(),
            scope_id: row.scope_id,
            player_id: row.player_id,
            rank: row.rank,
            remarks: row.remarks,
            created_at: Utc::now(),
        };
        self.clubbed_results.push(stored.clone());
        Ok(stored)
    }

    fn delete_clubbed_result(&mut self, row_id: RowId) -> Result<(), StoreError> {
        let before = self.clubbed_results.len();
        self.clubbed_results.retain(|r| r.id != row_id);
        if self.clubbed_results.len() == before {
            return Err(StoreError::RowNotFound);
        }
        Ok(())
    }
}
