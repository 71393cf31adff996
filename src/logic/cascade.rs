//! Result cascade: on a final result, derive and persist summary placements
//! and the clubbed medal table.

use crate::logic::finals::third_place_result;
use crate::models::{
    BracketError, KnockoutMatch, NewClubbedResult, NewMatchResult, NewSummaryResult, PlayerId,
    PoolId, Position, ResultType, ScopeId, FINAL_STAGE,
};
use crate::store::ResultStore;

/// Record the championship winner and, exactly once, cascade the derived
/// placements: champion and runner-up summaries, bronze summaries for each
/// recorded third place, and the four clubbed medal rows.
///
/// The cascade is guarded by "no final-typed summary exists yet". Each insert
/// inside it is independent and fire-and-forget: a failed write is logged and
/// skipped, never retried, and a later re-invocation is swallowed by the
/// guard even if the earlier cascade was left partial. Accepted gap.
pub fn record_final_winner(
    store: &mut dyn ResultStore,
    scope: ScopeId,
    final_match: &KnockoutMatch,
    winner_id: PlayerId,
    title: &str,
) -> Result<(), BracketError> {
    let (player1, player2) = match (&final_match.player1, &final_match.player2) {
        (Some(p1), Some(p2)) => (p1.clone(), p2.clone()),
        _ => return Err(BracketError::FinalNotReady),
    };
    if winner_id != player1.id && winner_id != player2.id {
        return Err(BracketError::NotAContestant(winner_id));
    }

    let results = store.match_results(scope)?;
    if let Some(existing) = results.iter().find(|r| r.match_stage == FINAL_STAGE) {
        store.set_match_winner(existing.id, winner_id)?;
    } else {
        store.insert_match_result(NewMatchResult {
            scope_id: scope,
            player1_id: player1.id,
            player2_id: player2.id,
            winner_id,
            match_stage: FINAL_STAGE.to_string(),
        })?;
    }

    let summaries = store.summary_results(scope)?;
    if summaries.iter().any(|s| s.result_type == ResultType::Final) {
        log::info!("Final summary already recorded for scope {}, skipping cascade", scope);
        return Ok(());
    }

    let runner_up_id = if winner_id == player1.id {
        player2.id
    } else {
        player1.id
    };

    insert_summary(store, scope, "Final", winner_id, ResultType::Final, Position::Winner);
    insert_summary(store, scope, "Final", runner_up_id, ResultType::Final, Position::RunnerUp);

    insert_clubbed(store, scope, winner_id, "1st", &format!("Champion - {}", title));
    insert_clubbed(store, scope, runner_up_id, "2nd", &format!("Runner-up - {}", title));

    let results = store.match_results(scope)?;
    for pool in [PoolId::A, PoolId::B] {
        if let Some(third) = third_place_result(pool, &results) {
            let third_id = third.winner_id;
            insert_summary(store, scope, pool.label(), third_id, ResultType::Pool, Position::Bronze);
            insert_clubbed(store, scope, third_id, "3rd", &format!("Bronze medal - {}", pool.label()));
        }
    }

    Ok(())
}

/// One independent cascade write; failures are logged and dropped.
fn insert_summary(
    store: &mut dyn ResultStore,
    scope: ScopeId,
    group_name: &str,
    player_id: PlayerId,
    result_type: ResultType,
    position: Position,
) {
    let row = NewSummaryResult {
        scope_id: scope,
        group_name: group_name.to_string(),
        player_id,
        result_type,
        position,
    };
    if let Err(e) = store.insert_summary_result(row) {
        log::warn!("Failed to save {:?} summary for scope {}: {}", position, scope, e);
    }
}

/// One independent cascade write; failures are logged and dropped.
fn insert_clubbed(
    store: &mut dyn ResultStore,
    scope: ScopeId,
    player_id: PlayerId,
    rank: &str,
    remarks: &str,
) {
    let row = NewClubbedResult {
        scope_id: scope,
        player_id,
        rank: rank.to_string(),
        remarks: remarks.to_string(),
    };
    if let Err(e) = store.insert_clubbed_result(row) {
        log::warn!("Failed to save {} clubbed result for scope {}: {}", rank, scope, e);
    }
}
