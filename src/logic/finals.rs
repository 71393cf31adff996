//! Championship final and manual third-place selection.

use crate::models::{
    third_place_stage_id, BracketError, KnockoutMatch, MatchResult, NewMatchResult, Participant,
    PlayerId, PoolId, ScopeId, FINAL_STAGE,
};
use crate::store::ResultStore;

/// Pair the two pool finalists for the championship match. Absent until both
/// pools have produced exactly one finalist.
pub fn championship_match(
    finalist_a: Option<&Participant>,
    finalist_b: Option<&Participant>,
    results: &[MatchResult],
) -> Option<KnockoutMatch> {
    let finalist_a = finalist_a?;
    let finalist_b = finalist_b?;
    let winner_id = results
        .iter()
        .find(|r| r.match_stage == FINAL_STAGE)
        .map(|r| r.winner_id);

    Some(KnockoutMatch {
        id: FINAL_STAGE.to_string(),
        round: 0,
        player1: Some(finalist_a.clone()),
        player2: Some(finalist_b.clone()),
        winner_id,
        stage: "Championship Final".to_string(),
    })
}

/// Players an operator may pick as a pool's third place: every pool-stage
/// winner except the pool finalist. Deliberately a manual choice; the losing
/// knockout semi-finalist is not provably third in an unseeded bracket.
pub fn third_place_candidates(
    pool_winners: &[Participant],
    finalist: Option<&Participant>,
) -> Vec<Participant> {
    pool_winners
        .iter()
        .filter(|p| finalist.map(|f| f.id) != Some(p.id))
        .cloned()
        .collect()
}

/// The recorded third-place selection for a pool, if any.
pub fn third_place_result<'a>(
    pool: PoolId,
    results: &'a [MatchResult],
) -> Option<&'a MatchResult> {
    let stage = third_place_stage_id(pool);
    results.iter().find(|r| r.match_stage == stage)
}

/// Record a pool's third place. Persisted as a match result with the player
/// as both contestants and winner, since there is no actual match behind it.
pub fn record_third_place(
    store: &mut dyn ResultStore,
    scope: ScopeId,
    pool: PoolId,
    candidates: &[Participant],
    player_id: PlayerId,
) -> Result<(), BracketError> {
    if !candidates.iter().any(|p| p.id == player_id) {
        return Err(BracketError::NotAThirdPlaceCandidate(player_id));
    }

    store.insert_match_result(NewMatchResult {
        scope_id: scope,
        player1_id: player_id,
        player2_id: player_id,
        winner_id: player_id,
        match_stage: third_place_stage_id(pool),
    })?;

    Ok(())
}
