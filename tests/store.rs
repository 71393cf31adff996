//! Integration tests for the in-memory result store.

use pool_bracket_web::{
    MemoryStore, NewClubbedResult, NewMatchResult, NewSummaryResult, Position, ResultStore,
    ResultType, StoreError,
};
use uuid::Uuid;

fn match_row(scope: Uuid, stage: &str) -> NewMatchResult {
    NewMatchResult {
        scope_id: scope,
        player1_id: Uuid::new_v4(),
        player2_id: Uuid::new_v4(),
        winner_id: Uuid::new_v4(),
        match_stage: stage.to_string(),
    }
}

#[test]
fn stage_is_unique_per_scope() {
    let mut store = MemoryStore::new();
    let scope = Uuid::new_v4();
    store.insert_match_result(match_row(scope, "Pool A-1.1")).unwrap();
    assert!(matches!(
        store.insert_match_result(match_row(scope, "Pool A-1.1")),
        Err(StoreError::DuplicateStage(_))
    ));
    // The same stage under another scope is a different bracket run.
    store
        .insert_match_result(match_row(Uuid::new_v4(), "Pool A-1.1"))
        .unwrap();
    assert_eq!(store.match_results(scope).unwrap().len(), 1);
}

#[test]
fn winner_updates_touch_only_the_target_row() {
    let mut store = MemoryStore::new();
    let scope = Uuid::new_v4();
    let first = store.insert_match_result(match_row(scope, "Pool A-1.1")).unwrap();
    let second = store.insert_match_result(match_row(scope, "Pool A-1.2")).unwrap();

    let corrected = Uuid::new_v4();
    store.set_match_winner(first.id, corrected).unwrap();

    let rows = store.match_results(scope).unwrap();
    assert_eq!(rows.iter().find(|r| r.id == first.id).unwrap().winner_id, corrected);
    assert_eq!(
        rows.iter().find(|r| r.id == second.id).unwrap().winner_id,
        second.winner_id
    );
    assert!(matches!(
        store.set_match_winner(Uuid::new_v4(), corrected),
        Err(StoreError::RowNotFound)
    ));
}

#[test]
fn summary_rows_round_trip_and_delete() {
    let mut store = MemoryStore::new();
    let scope = Uuid::new_v4();
    let row = store
        .insert_summary_result(NewSummaryResult {
            scope_id: scope,
            group_name: "Final".to_string(),
            player_id: Uuid::new_v4(),
            result_type: ResultType::Final,
            position: Position::Winner,
        })
        .unwrap();

    assert_eq!(store.summary_results(scope).unwrap().len(), 1);
    store.delete_summary_result(row.id).unwrap();
    assert!(store.summary_results(scope).unwrap().is_empty());
    assert!(matches!(
        store.delete_summary_result(row.id),
        Err(StoreError::RowNotFound)
    ));
}

#[test]
fn clubbed_rows_round_trip_and_delete() {
    let mut store = MemoryStore::new();
    let scope = Uuid::new_v4();
    let row = store
        .insert_clubbed_result(NewClubbedResult {
            scope_id: scope,
            player_id: Uuid::new_v4(),
            rank: "1st".to_string(),
            remarks: "Champion - U73kg".to_string(),
        })
        .unwrap();

    assert_eq!(store.clubbed_results(scope).unwrap().len(), 1);
    assert!(store.clubbed_results(Uuid::new_v4()).unwrap().is_empty());
    store.delete_clubbed_result(row.id).unwrap();
    assert!(store.clubbed_results(scope).unwrap().is_empty());
}
