//! Pool partitioning and group-stage results.

use crate::models::{
    group_stage_id, BracketError, Group, MatchResult, NewMatchResult, NewSummaryResult,
    Participant, PlayerId, Pool, PoolId, Position, ResultType, ScopeId,
};
use crate::store::ResultStore;
use rand::seq::SliceRandom;
use rand::Rng;

/// Split participants into the two pools and subdivide each into groups.
///
/// 1. Shuffle (explicit operator action only; reshuffling orphans any
///    persisted results for the old layout).
/// 2. Pool A takes the first `ceil(n / 2)` participants, Pool B the rest.
/// 3. Within each half, repeatedly take the first remaining participant and
///    pair it with the first remaining participant of a different
///    association; if none remains, the group is a solo bye.
///
/// The RNG is injected so callers can seed it for reproducible draws.
pub fn partition_pools<R: Rng>(participants: &[Participant], rng: &mut R) -> [Pool; 2] {
    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);

    let mid = (shuffled.len() + 1) / 2;
    let half_b = shuffled.split_off(mid);
    let half_a = shuffled;

    [
        Pool::new(PoolId::A, build_groups(half_a, PoolId::A)),
        Pool::new(PoolId::B, build_groups(half_b, PoolId::B)),
    ]
}

/// Form 1-2 member groups from one pool's half, association-diverse pairs
/// first-match-wins. Group names are `{pool number}.{sequence}`, sequence
/// incrementing per group produced regardless of group size.
fn build_groups(mut remaining: Vec<Participant>, pool: PoolId) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut sequence = 1;

    while !remaining.is_empty() {
        let first = remaining.remove(0);
        let partner_idx = remaining
            .iter()
            .position(|p| p.association != first.association);

        let mut players = vec![first];
        if let Some(idx) = partner_idx {
            players.push(remaining.remove(idx));
        }

        groups.push(Group {
            name: format!("{}.{}", pool.number(), sequence),
            players,
        });
        sequence += 1;
    }

    groups
}

/// Qualifiers out of a pool's group stage, in group order: the recorded
/// winner of each decided group, the sole member of each bye group.
/// Undecided two-member groups contribute nothing.
pub fn pool_winners(
    pool: &Pool,
    participants: &[Participant],
    results: &[MatchResult],
) -> Vec<Participant> {
    pool.groups
        .iter()
        .filter_map(|group| {
            let stage = group_stage_id(pool.id, &group.name);
            if let Some(result) = results.iter().find(|r| r.match_stage == stage) {
                participants.iter().find(|p| p.id == result.winner_id).cloned()
            } else if group.is_bye() {
                Some(group.players[0].clone())
            } else {
                None
            }
        })
        .collect()
}

/// Look up the recorded result for one group, if any.
pub fn group_result<'a>(
    pool: PoolId,
    group_name: &str,
    results: &'a [MatchResult],
) -> Option<&'a MatchResult> {
    let stage = group_stage_id(pool, group_name);
    results.iter().find(|r| r.match_stage == stage)
}

/// Record (or correct) a group match winner.
///
/// The winner must be one of the group's two members; bye groups are not
/// scoreable. A first insert also writes the group's `pool/winner` summary
/// row, guarded by an existence check on the group name.
pub fn record_group_winner(
    store: &mut dyn ResultStore,
    scope: ScopeId,
    pool: &Pool,
    group_name: &str,
    winner_id: PlayerId,
) -> Result<(), BracketError> {
    let group = pool
        .group(group_name)
        .ok_or_else(|| BracketError::UnknownGroup(group_name.to_string()))?;
    if group.players.len() < 2 {
        return Err(BracketError::GroupNotScoreable(group_name.to_string()));
    }
    if !group.players.iter().any(|p| p.id == winner_id) {
        return Err(BracketError::NotAContestant(winner_id));
    }

    let stage = group_stage_id(pool.id, group_name);
    let results = store.match_results(scope)?;
    if let Some(existing) = results.iter().find(|r| r.match_stage == stage) {
        store.set_match_winner(existing.id, winner_id)?;
        return Ok(());
    }

    store.insert_match_result(NewMatchResult {
        scope_id: scope,
        player1_id: group.players[0].id,
        player2_id: group.players[1].id,
        winner_id,
        match_stage: stage.clone(),
    })?;

    let summaries = store.summary_results(scope)?;
    if !summaries.iter().any(|s| s.group_name == stage) {
        store.insert_summary_result(NewSummaryResult {
            scope_id: scope,
            group_name: stage,
            player_id: winner_id,
            result_type: ResultType::Pool,
            position: Position::Winner,
        })?;
    }

    Ok(())
}
