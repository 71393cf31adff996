//! Single binary JSON API over the bracket engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default; override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pool_bracket_web::{
    championship_match, generate_knockout, parse_roster, partition_pools, pool_winners,
    record_final_winner, record_group_winner, record_knockout_winner, record_third_place,
    third_place_candidates, third_place_result, BracketError, ClubbedResult, KnockoutMatch,
    MemoryStore, NewClubbedResult, NewSummaryResult, Participant, PlayerId, Pool, PoolId,
    Position, ResultStore, ResultType, RowId, ScopeId, SummaryResult,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// One bracket run: roster plus the frozen pool draw. The draw only changes
/// on an explicit regenerate, never because results were recorded.
struct BracketEntry {
    title: String,
    participants: Vec<Participant>,
    pools: [Pool; 2],
}

/// In-memory state: bracket entries by scope id plus the shared result store.
struct AppData {
    store: MemoryStore,
    brackets: HashMap<ScopeId, BracketEntry>,
}

type AppState = Data<RwLock<AppData>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NewParticipantBody {
    name: String,
    association: String,
    weight: Option<f64>,
}

#[derive(Deserialize)]
struct CreateBracketBody {
    title: String,
    participants: Vec<NewParticipantBody>,
}

#[derive(Deserialize)]
struct ImportBracketBody {
    title: String,
    /// CSV text with header `name,association,weight`.
    roster: String,
}

#[derive(Deserialize)]
struct GroupWinnerBody {
    pool: PoolId,
    group: String,
    winner_id: PlayerId,
}

#[derive(Deserialize)]
struct KnockoutWinnerBody {
    match_id: String,
    winner_id: PlayerId,
}

#[derive(Deserialize)]
struct ThirdPlaceBody {
    pool: PoolId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct FinalWinnerBody {
    winner_id: PlayerId,
}

#[derive(Deserialize)]
struct AddSummaryBody {
    group_name: String,
    player_id: PlayerId,
    result_type: ResultType,
    position: Position,
}

#[derive(Deserialize)]
struct AddClubbedBody {
    player_id: PlayerId,
    rank: String,
    #[serde(default)]
    remarks: String,
}

/// Path segment: bracket scope id (e.g. /api/brackets/{id})
#[derive(Deserialize)]
struct BracketPath {
    id: ScopeId,
}

/// Path segments: bracket scope id and result row id.
#[derive(Deserialize)]
struct BracketRowPath {
    id: ScopeId,
    row_id: RowId,
}

/// Everything derivable for one pool: draw, qualifiers, knockout, placements.
#[derive(Serialize)]
struct PoolView {
    pool: Pool,
    winners: Vec<Participant>,
    knockout: Vec<KnockoutMatch>,
    finalist: Option<Participant>,
    third_place_candidates: Vec<Participant>,
    third_place_id: Option<PlayerId>,
}

/// Full derived bracket state, recomputed from the result rows on every read.
#[derive(Serialize)]
struct BracketView {
    id: ScopeId,
    title: String,
    participants: Vec<Participant>,
    pools: Vec<PoolView>,
    final_match: Option<KnockoutMatch>,
    summary_results: Vec<SummaryResult>,
    clubbed_results: Vec<ClubbedResult>,
}

fn derive_view(
    id: ScopeId,
    entry: &BracketEntry,
    store: &MemoryStore,
) -> Result<BracketView, BracketError> {
    let results = store.match_results(id)?;

    let mut pool_views = Vec::new();
    let mut finalists = Vec::new();
    for pool in &entry.pools {
        let winners = pool_winners(pool, &entry.participants, &results);
        let knockout = generate_knockout(&winners, pool.id, &results);
        let candidates = third_place_candidates(&winners, knockout.finalist.as_ref());
        let third = third_place_result(pool.id, &results).map(|r| r.winner_id);
        finalists.push(knockout.finalist.clone());
        pool_views.push(PoolView {
            pool: pool.clone(),
            winners,
            knockout: knockout.matches,
            finalist: knockout.finalist,
            third_place_candidates: candidates,
            third_place_id: third,
        });
    }

    let final_match = championship_match(finalists[0].as_ref(), finalists[1].as_ref(), &results);

    Ok(BracketView {
        id,
        title: entry.title.clone(),
        participants: entry.participants.clone(),
        pools: pool_views,
        final_match,
        summary_results: store.summary_results(id)?,
        clubbed_results: store.clubbed_results(id)?,
    })
}

fn error_response(e: BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::Store(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn view_response(id: ScopeId, entry: &BracketEntry, store: &MemoryStore) -> HttpResponse {
    match derive_view(id, entry, store) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(e),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No bracket" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pool-bracket-web",
    })
}

fn create_entry(title: String, participants: Vec<Participant>) -> (ScopeId, BracketEntry) {
    let pools = partition_pools(&participants, &mut rand::thread_rng());
    (
        Uuid::new_v4(),
        BracketEntry {
            title,
            participants,
            pools,
        },
    )
}

/// Create a bracket from an inline participant list; pools are drawn once.
#[post("/api/brackets")]
async fn api_create_bracket(state: AppState, body: Json<CreateBracketBody>) -> HttpResponse {
    let body = body.into_inner();
    let participants: Vec<Participant> = body
        .participants
        .into_iter()
        .filter(|p| !p.name.trim().is_empty())
        .map(|p| {
            let mut participant = Participant::new(p.name.trim(), p.association.trim());
            participant.weight = p.weight;
            participant
        })
        .collect();

    let (id, entry) = create_entry(body.title, participants);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = view_response(id, &entry, &g.store);
    g.brackets.insert(id, entry);
    response
}

/// Create a bracket from a CSV roster (`name,association,weight`).
#[post("/api/brackets/import")]
async fn api_import_bracket(state: AppState, body: Json<ImportBracketBody>) -> HttpResponse {
    let body = body.into_inner();
    let participants = match parse_roster(&body.roster) {
        Ok(participants) => participants,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": format!("Invalid roster: {}", e) }))
        }
    };

    let (id, entry) = create_entry(body.title, participants);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = view_response(id, &entry, &g.store);
    g.brackets.insert(id, entry);
    response
}

/// Get the full derived bracket state (404 if not found).
#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.brackets.get(&path.id) {
        Some(entry) => view_response(path.id, entry, &g.store),
        None => not_found(),
    }
}

/// Redraw the pools. Results persisted for the old draw become orphaned rows
/// and no longer surface in the derived view.
#[post("/api/brackets/{id}/pools/regenerate")]
async fn api_regenerate_pools(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.pools = partition_pools(&entry.participants, &mut rand::thread_rng());
    log::info!("Regenerated pools for bracket {}", path.id);
    view_response(path.id, entry, &data.store)
}

/// Record a group match winner.
#[put("/api/brackets/{id}/groups/winner")]
async fn api_group_winner(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<GroupWinnerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let pool = match entry.pools.iter().find(|p| p.id == body.pool) {
        Some(p) => p,
        None => return not_found(),
    };
    match record_group_winner(&mut data.store, path.id, pool, &body.group, body.winner_id) {
        Ok(()) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e),
    }
}

/// Record a knockout match winner.
#[put("/api/brackets/{id}/knockout/winner")]
async fn api_knockout_winner(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<KnockoutWinnerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let results = match data.store.match_results(path.id) {
        Ok(results) => results,
        Err(e) => return error_response(e.into()),
    };
    // Re-derive both pools and locate the match server-side; the body only
    // names the match, never its contestants.
    let knockout = entry.pools.iter().find_map(|pool| {
        let winners = pool_winners(pool, &entry.participants, &results);
        let knockout = generate_knockout(&winners, pool.id, &results);
        knockout
            .matches
            .iter()
            .any(|m| m.id == body.match_id)
            .then_some(knockout)
    });
    let knockout = match knockout {
        Some(k) => k,
        None => return error_response(BracketError::MatchNotFound(body.match_id.clone())),
    };
    match record_knockout_winner(
        &mut data.store,
        path.id,
        &knockout,
        &body.match_id,
        body.winner_id,
    ) {
        Ok(()) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e),
    }
}

/// Record a pool's manually selected third place.
#[put("/api/brackets/{id}/third-place")]
async fn api_third_place(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<ThirdPlaceBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let pool = match entry.pools.iter().find(|p| p.id == body.pool) {
        Some(p) => p,
        None => return not_found(),
    };
    let results = match data.store.match_results(path.id) {
        Ok(results) => results,
        Err(e) => return error_response(e.into()),
    };
    let winners = pool_winners(pool, &entry.participants, &results);
    let knockout = generate_knockout(&winners, pool.id, &results);
    let candidates = third_place_candidates(&winners, knockout.finalist.as_ref());
    match record_third_place(&mut data.store, path.id, pool.id, &candidates, body.player_id) {
        Ok(()) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e),
    }
}

/// Record the championship winner and cascade the medal placements.
#[put("/api/brackets/{id}/final/winner")]
async fn api_final_winner(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<FinalWinnerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let results = match data.store.match_results(path.id) {
        Ok(results) => results,
        Err(e) => return error_response(e.into()),
    };
    let mut finalists = entry.pools.iter().map(|pool| {
        let winners = pool_winners(pool, &entry.participants, &results);
        generate_knockout(&winners, pool.id, &results).finalist
    });
    let finalist_a = finalists.next().flatten();
    let finalist_b = finalists.next().flatten();
    let final_match = match championship_match(finalist_a.as_ref(), finalist_b.as_ref(), &results)
    {
        Some(m) => m,
        None => return error_response(BracketError::FinalNotReady),
    };
    match record_final_winner(
        &mut data.store,
        path.id,
        &final_match,
        body.winner_id,
        &entry.title,
    ) {
        Ok(()) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e),
    }
}

/// Manually add a summary placement row.
#[post("/api/brackets/{id}/results/summary")]
async fn api_add_summary(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<AddSummaryBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let body = body.into_inner();
    if body.group_name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Group name is required" }));
    }
    let row = NewSummaryResult {
        scope_id: path.id,
        group_name: body.group_name,
        player_id: body.player_id,
        result_type: body.result_type,
        position: body.position,
    };
    match data.store.insert_summary_result(row) {
        Ok(_) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e.into()),
    }
}

/// Delete a summary placement row.
#[delete("/api/brackets/{id}/results/summary/{row_id}")]
async fn api_delete_summary(state: AppState, path: Path<BracketRowPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    match data.store.delete_summary_result(path.row_id) {
        Ok(()) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e.into()),
    }
}

/// Manually add a clubbed medal-table row.
#[post("/api/brackets/{id}/results/clubbed")]
async fn api_add_clubbed(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<AddClubbedBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    let body = body.into_inner();
    if body.rank.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Rank is required" }));
    }
    let row = NewClubbedResult {
        scope_id: path.id,
        player_id: body.player_id,
        rank: body.rank,
        remarks: body.remarks,
    };
    match data.store.insert_clubbed_result(row) {
        Ok(_) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e.into()),
    }
}

/// Delete a clubbed medal-table row.
#[delete("/api/brackets/{id}/results/clubbed/{row_id}")]
async fn api_delete_clubbed(state: AppState, path: Path<BracketRowPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let data = &mut *g;
    let entry = match data.brackets.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    match data.store.delete_clubbed_result(path.row_id) {
        Ok(()) => view_response(path.id, entry, &data.store),
        Err(e) => error_response(e.into()),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppData {
        store: MemoryStore::new(),
        brackets: HashMap::new(),
    }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_bracket)
            .service(api_import_bracket)
            .service(api_get_bracket)
            .service(api_regenerate_pools)
            .service(api_group_winner)
            .service(api_knockout_winner)
            .service(api_third_place)
            .service(api_final_winner)
            .service(api_add_summary)
            .service(api_delete_summary)
            .service(api_add_clubbed)
            .service(api_delete_clubbed)
    })
    .bind(bind)?
    .run()
    .await
}
