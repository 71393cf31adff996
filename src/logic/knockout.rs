//! Knockout stage: round derivation from pool winners and recorded results.

use crate::models::{
    knockout_stage_id, BracketError, KnockoutMatch, MatchResult, NewMatchResult, NewSummaryResult,
    Participant, PlayerId, PoolId, Position, ResultType, ScopeId,
};
use crate::store::ResultStore;

/// The round in which knockout losers count as semi-finalists for the
/// summary table.
const SEMI_FINAL_ROUND: u32 = 2;

/// A pool's derived knockout bracket.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolKnockout {
    /// All pairings produced so far, in creation order across rounds.
    pub matches: Vec<KnockoutMatch>,
    /// The pool's single remaining entrant, present only once every
    /// generated match has a recorded winner.
    pub finalist: Option<Participant>,
}

/// Derive a pool's knockout rounds from its group-stage qualifiers and the
/// persisted results.
///
/// Round by round, on the current survivor list:
/// - one survivor or none terminates the stage;
/// - an odd-length list defers its first entrant untouched (bye);
/// - the rest pair sequentially in list order, no reseeding;
/// - a pair whose match has a recorded winner advances that winner, a
///   pending pair blocks only its own subtree.
///
/// Match ids are positional (`knockout-{pool}.{round}-match{index}` with the
/// index running across rounds), so re-deriving with the same winners list
/// and results yields identical ids, pairings, and winners.
pub fn generate_knockout(
    pool_winners: &[Participant],
    pool: PoolId,
    results: &[MatchResult],
) -> PoolKnockout {
    let mut matches: Vec<KnockoutMatch> = Vec::new();
    let mut survivors = pool_winners.to_vec();
    let mut round = 1;

    while survivors.len() > 1 {
        let mut next_round = Vec::new();
        if survivors.len() % 2 != 0 {
            next_round.push(survivors.remove(0));
        }

        for pair in survivors.chunks_exact(2) {
            let id = knockout_stage_id(pool, round, matches.len());
            let recorded = results.iter().find(|r| r.match_stage == id);
            let winner_id = recorded.map(|r| r.winner_id);

            if let Some(winner_id) = winner_id {
                if let Some(winner) = pair.iter().find(|p| p.id == winner_id) {
                    next_round.push(winner.clone());
                }
            }

            matches.push(KnockoutMatch {
                stage: format!("Round {} Match {}", round, matches.len() + 1),
                id,
                round,
                player1: Some(pair[0].clone()),
                player2: Some(pair[1].clone()),
                winner_id,
            });
        }

        survivors = next_round;
        round += 1;
    }

    // The last survivor is only the finalist once the whole subtree below it
    // is decided; a bye that floated up past pending matches is not.
    let all_decided = matches.iter().all(|m| m.winner_id.is_some());
    let finalist = if all_decided { survivors.pop() } else { None };

    PoolKnockout { matches, finalist }
}

/// Record (or correct) a knockout match winner.
///
/// The match must exist in the given derived bracket and the winner must be
/// one of its contestants. A first insert of a round-2 result also records
/// the loser as a semi-finalist, guarded per player.
pub fn record_knockout_winner(
    store: &mut dyn ResultStore,
    scope: ScopeId,
    knockout: &PoolKnockout,
    match_id: &str,
    winner_id: PlayerId,
) -> Result<(), BracketError> {
    let m = knockout
        .matches
        .iter()
        .find(|m| m.id == match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;
    if !m.has_contestant(winner_id) {
        return Err(BracketError::NotAContestant(winner_id));
    }
    let (player1, player2) = match (&m.player1, &m.player2) {
        (Some(p1), Some(p2)) => (p1.clone(), p2.clone()),
        _ => return Err(BracketError::MatchNotFound(match_id.to_string())),
    };

    let results = store.match_results(scope)?;
    if let Some(existing) = results.iter().find(|r| r.match_stage == match_id) {
        store.set_match_winner(existing.id, winner_id)?;
        return Ok(());
    }

    store.insert_match_result(NewMatchResult {
        scope_id: scope,
        player1_id: player1.id,
        player2_id: player2.id,
        winner_id,
        match_stage: match_id.to_string(),
    })?;

    if m.round == SEMI_FINAL_ROUND {
        let loser_id = if winner_id == player1.id {
            player2.id
        } else {
            player1.id
        };
        let summaries = store.summary_results(scope)?;
        let already_recorded = summaries
            .iter()
            .any(|s| s.player_id == loser_id && s.position == Position::SemiFinalist);
        if !already_recorded {
            store.insert_summary_result(NewSummaryResult {
                scope_id: scope,
                group_name: match_id.to_string(),
                player_id: loser_id,
                result_type: ResultType::Pool,
                position: Position::SemiFinalist,
            })?;
        }
    }

    Ok(())
}
