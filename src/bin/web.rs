//! Single binary web server: REST API over many independent tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, INACTIVITY_HOURS,
//! CLEANUP_MINUTES, BRACKET_SEED.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_league_web::{
    write_standings_csv, MemoryStore, RngSource, ServerConfig, TournamentController,
    TournamentError, TournamentFormat, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;
use uuid::Uuid;

type Controller = TournamentController<MemoryStore, RngSource>;

/// Per-tournament entry: controller + last activity time (for auto-cleanup).
struct TournamentEntry {
    controller: Controller,
    last_activity: Instant,
}

struct AppContext {
    tournaments: RwLock<HashMap<TournamentId, TournamentEntry>>,
    bracket_seed: Option<u64>,
}

type AppState = Data<AppContext>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct CreatedTournament<T: Serialize> {
    id: TournamentId,
    #[serde(flatten)]
    snapshot: T,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    format: TournamentFormat,
}

#[derive(Deserialize)]
struct AddParticipantBody {
    name: String,
}

#[derive(Deserialize)]
struct SetFormatBody {
    format: TournamentFormat,
}

#[derive(Deserialize)]
struct ReportResultBody {
    winner_id: Uuid,
    score: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: Uuid,
}

#[derive(Deserialize)]
struct TournamentFixturePath {
    id: TournamentId,
    fixture_id: Uuid,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Validation errors are the caller's to fix; the others are logged.
fn error_response(err: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        TournamentError::Validation(_) => HttpResponse::BadRequest().json(body),
        TournamentError::Consistency(_) => {
            log::error!("Consistency error: {err}");
            HttpResponse::Conflict().json(body)
        }
        TournamentError::Store(_) => {
            log::error!("Store error: {err:?}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Run `op` against one tournament under the write lock, refreshing its activity time.
fn with_tournament<T, F>(state: &AppState, id: TournamentId, op: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&mut Controller) -> Result<T, TournamentError>,
{
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.controller) {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-league-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<CreateTournamentBody>>) -> HttpResponse {
    let format = body.map(|b| b.format).unwrap_or_default();
    let mut controller = TournamentController::new(
        MemoryStore::new(),
        RngSource::from_seed_option(state.bracket_seed),
    );
    let snapshot = match controller.set_format(format).and_then(|_| controller.snapshot()) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let id = Uuid::new_v4();
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            controller,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {id} ({format:?})");
    HttpResponse::Ok().json(CreatedTournament { id, snapshot })
}

/// Status, standings and fixtures for one tournament.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |c| c.snapshot())
}

/// Register a participant (setup only).
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |c| {
        c.register_participant(&body.name)?;
        c.snapshot()
    })
}

/// Register every name in a CSV body (setup only).
#[post("/api/tournaments/{id}/participants/import")]
async fn api_import_participants(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |c| {
        c.import_roster(body.as_bytes())?;
        c.snapshot()
    })
}

/// Remove a participant (setup only).
#[delete("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_remove_participant(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    with_tournament(&state, path.id, |c| {
        c.remove_participant(path.participant_id)?;
        c.snapshot()
    })
}

/// Choose knockout or league (setup only).
#[put("/api/tournaments/{id}/format")]
async fn api_set_format(state: AppState, path: Path<TournamentPath>, body: Json<SetFormatBody>) -> HttpResponse {
    with_tournament(&state, path.id, |c| {
        c.set_format(body.format)?;
        c.snapshot()
    })
}

/// Generate fixtures and start (setup -> active).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |c| {
        c.start_tournament()?;
        c.snapshot()
    })
}

/// Report one fixture's result; may create the next round or finish the tournament.
#[post("/api/tournaments/{id}/fixtures/{fixture_id}/result")]
async fn api_report_result(
    state: AppState,
    path: Path<TournamentFixturePath>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |c| {
        c.report_result(path.fixture_id, body.winner_id, &body.score)?;
        c.snapshot()
    })
}

/// Reset: back to setup with the same roster and format.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |c| {
        c.reset_tournament()?;
        c.snapshot()
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |c| c.standings())
}

/// Standings as a CSV download.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let standings = {
        let g = match state.tournaments.read() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        match g.get(&path.id) {
            Some(entry) => entry.controller.standings(),
            None => return not_found(),
        }
    };
    let standings = match standings {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let mut buf = Vec::new();
    if let Err(e) = write_standings_csv(&standings, &mut buf) {
        log::error!("Failed to write standings CSV: {e}");
        return HttpResponse::InternalServerError().body("csv error");
    }
    HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(buf)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let (host, port) = config.bind_addr();
    log::info!("Starting server at http://{}:{}", host, port);
    if let Some(seed) = config.bracket_seed {
        log::info!("Bracket shuffles are seeded with {seed}");
    }

    let state = Data::new(AppContext {
        tournaments: RwLock::new(HashMap::new()),
        bracket_seed: config.bracket_seed,
    });

    // Background task: drop tournaments inactive for longer than the configured timeout.
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    let cleanup_interval = config.cleanup_interval;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.tournaments.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_participant)
            .service(api_import_participants)
            .service(api_remove_participant)
            .service(api_set_format)
            .service(api_start_tournament)
            .service(api_report_result)
            .service(api_reset_tournament)
            .service(api_standings_csv)
            .service(api_standings)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
