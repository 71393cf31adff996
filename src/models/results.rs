//! Persisted result rows: match results, summary placements, clubbed ranks.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier scoping all result rows to one bracket run (sub-event).
pub type ScopeId = Uuid;

/// Identifier of a persisted row.
pub type RowId = Uuid;

/// The single source of truth for progression state. The bracket is
/// recomputed from these rows on every read; no match tree is persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: RowId,
    pub scope_id: ScopeId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub winner_id: PlayerId,
    /// Group id, knockout match id, "final", or "third-place-{pool}".
    /// Unique per scope.
    pub match_stage: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a match result (id and timestamp assigned by the store).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewMatchResult {
    pub scope_id: ScopeId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub winner_id: PlayerId,
    pub match_stage: String,
}

/// Whether a placement came out of the pool/knockout phase or the final.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Pool,
    Final,
}

/// Placement within a stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Winner,
    RunnerUp,
    Bronze,
    SemiFinalist,
    Participant,
}

/// A structured placement row feeding the clubbed medal table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub id: RowId,
    pub scope_id: ScopeId,
    /// Group or stage name the placement came from ("Pool A-1.1", "Final", ...).
    pub group_name: String,
    pub player_id: PlayerId,
    pub result_type: ResultType,
    pub position: Position,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSummaryResult {
    pub scope_id: ScopeId,
    pub group_name: String,
    pub player_id: PlayerId,
    pub result_type: ResultType,
    pub position: Position,
}

/// A flattened medal-table row: rank label plus free-text remark. Append-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClubbedResult {
    pub id: RowId,
    pub scope_id: ScopeId,
    pub player_id: PlayerId,
    /// Rank label ("1st", "2nd", "3rd", "Participant").
    pub rank: String,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewClubbedResult {
    pub scope_id: ScopeId,
    pub player_id: PlayerId,
    pub rank: String,
    pub remarks: String,
}
