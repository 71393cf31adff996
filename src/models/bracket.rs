//! Pools, groups, knockout matches, stage ids, and BracketError.

use crate::models::player::{Participant, PlayerId};
use serde::{Deserialize, Serialize};

/// Errors that can occur during bracket operations.
#[derive(Clone, Debug, PartialEq)]
pub enum BracketError {
    /// No group with this name exists in the pool.
    UnknownGroup(String),
    /// The group is a bye (single member); it has no match to score.
    GroupNotScoreable(String),
    /// The selected winner is not one of the match contestants.
    NotAContestant(PlayerId),
    /// No knockout match with this id exists in the current bracket.
    MatchNotFound(String),
    /// The championship final is not available yet (a pool finalist is missing).
    FinalNotReady,
    /// The selected player is not a valid third-place candidate for the pool.
    NotAThirdPlaceCandidate(PlayerId),
    /// A persistence call failed.
    Store(crate::store::StoreError),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::UnknownGroup(name) => write!(f, "No group named {}", name),
            BracketError::GroupNotScoreable(name) => {
                write!(f, "Group {} is a bye and has no match to score", name)
            }
            BracketError::NotAContestant(_) => {
                write!(f, "Selected winner is not a contestant in this match")
            }
            BracketError::MatchNotFound(id) => write!(f, "No knockout match with id {}", id),
            BracketError::FinalNotReady => {
                write!(f, "Both pool finalists must be decided before the final")
            }
            BracketError::NotAThirdPlaceCandidate(_) => {
                write!(f, "Selected player is not eligible for third place in this pool")
            }
            BracketError::Store(e) => write!(f, "Persistence failure: {}", e),
        }
    }
}

impl From<crate::store::StoreError> for BracketError {
    fn from(e: crate::store::StoreError) -> Self {
        BracketError::Store(e)
    }
}

/// One of the two top-level pools participants are split into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolId {
    A,
    B,
}

impl PoolId {
    /// Pool number used in hierarchical group/match names (A = 1, B = 2).
    pub fn number(self) -> u32 {
        match self {
            PoolId::A => 1,
            PoolId::B => 2,
        }
    }

    /// Display label, also used as the pool part of stage ids.
    pub fn label(self) -> &'static str {
        match self {
            PoolId::A => "Pool A",
            PoolId::B => "Pool B",
        }
    }
}

/// A 1-2 participant first-round unit within a pool.
/// A single member is a bye and auto-qualifies; two members play a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Hierarchical name: `{pool number}.{sequence}`, e.g. "1.1", "2.3".
    pub name: String,
    pub players: Vec<Participant>,
}

impl Group {
    pub fn is_bye(&self) -> bool {
        self.players.len() == 1
    }
}

/// A named collection of groups; one of the two halves of the bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub name: String,
    pub groups: Vec<Group>,
}

impl Pool {
    pub fn new(id: PoolId, groups: Vec<Group>) -> Self {
        Self {
            id,
            name: id.label().to_string(),
            groups,
        }
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// A derived knockout pairing. Never persisted standalone: the winner is
/// looked up from the MatchResult row matching `id` on every re-derivation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    /// Stage id, also the persistence key (`match_stage`).
    pub id: String,
    /// 1-based knockout round within the pool; 0 for the championship final.
    pub round: u32,
    pub player1: Option<Participant>,
    pub player2: Option<Participant>,
    pub winner_id: Option<PlayerId>,
    /// Human-readable label ("Round 1 Match 2", "Championship Final").
    pub stage: String,
}

impl KnockoutMatch {
    /// Whether the given player is one of the contestants.
    pub fn has_contestant(&self, player_id: PlayerId) -> bool {
        self.player1.as_ref().map(|p| p.id) == Some(player_id)
            || self.player2.as_ref().map(|p| p.id) == Some(player_id)
    }
}

/// Stage id of the championship final.
pub const FINAL_STAGE: &str = "final";

/// Stage id for a group match: `{pool label}-{group name}`, e.g. "Pool A-1.1".
pub fn group_stage_id(pool: PoolId, group_name: &str) -> String {
    format!("{}-{}", pool.label(), group_name)
}

/// Stage id for a knockout match. `running_index` is the match's position in
/// the pool's full accumulated match list, not reset per round, so ids stay
/// stable across re-derivations for the same winners list.
pub fn knockout_stage_id(pool: PoolId, round: u32, running_index: usize) -> String {
    format!("knockout-{}.{}-match{}", pool.number(), round, running_index)
}

/// Stage id for a pool's manually selected third place.
pub fn third_place_stage_id(pool: PoolId) -> String {
    format!("third-place-{}", pool.label())
}
