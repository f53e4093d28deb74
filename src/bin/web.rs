//! Single binary web server: scheduling sessions and their diagnostics via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, COMPETITION_MONTHS (e.g. "3,4").

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{Datelike, Local};
use round_robin_planner::{
    write_fixture_csv, CompetitionRules, SchedulingSession, SlotRef, Stadium, Team, TeamId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

type SessionId = Uuid;

/// Per-session entry: editing state + last activity time (for auto-cleanup).
struct SessionEntry {
    session: SchedulingSession,
    last_activity: Instant,
}

/// In-memory state: many scheduling sessions by ID. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);
const SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Everything the UI needs after an edit.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    id: SessionId,
    season: i32,
    teams: &'a [Team],
    schedule: &'a round_robin_planner::Schedule,
    report: &'a round_robin_planner::ScheduleReport,
    can_proceed: bool,
}

impl<'a> SessionView<'a> {
    fn new(id: SessionId, session: &'a SchedulingSession) -> Self {
        Self {
            id,
            season: session.season(),
            teams: session.roster(),
            schedule: session.schedule(),
            report: session.report(),
            can_proceed: session.can_proceed(),
        }
    }
}

#[derive(Deserialize)]
struct CreateSessionBody {
    teams: Vec<Team>,
    #[serde(default)]
    season: Option<i32>,
}

#[derive(Deserialize)]
struct ReplaceRosterBody {
    teams: Vec<Team>,
}

#[derive(Deserialize)]
struct SetTeamsBody {
    home: Option<TeamId>,
    away: Option<TeamId>,
}

#[derive(Deserialize)]
struct SetKickoffBody {
    /// ISO-8601 local time; empty or missing clears the kickoff.
    #[serde(default)]
    kickoff: Option<String>,
}

#[derive(Deserialize)]
struct SetStadiumBody {
    stadium: Stadium,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and slot position (0-based round and slot)
#[derive(Deserialize)]
struct SlotPath {
    id: SessionId,
    round: usize,
    slot: usize,
}

impl SlotPath {
    fn slot_ref(&self) -> SlotRef {
        SlotRef::new(self.round, self.slot)
    }
}

/// Competition rules from env, falling back to the defaults.
struct ServerConfig {
    rules: CompetitionRules,
}

fn error_json(msg: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": msg.to_string() })
}

/// Run `f` on the session with `id` (404 if not found). Touching it refreshes last_activity.
fn with_session<F>(state: &AppState, id: SessionId, f: F) -> HttpResponse
where
    F: FnOnce(&mut SchedulingSession) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.session)
        }
        None => HttpResponse::NotFound().json(error_json("No session")),
    }
}

/// Apply an edit and answer with the refreshed session view, or 400 with the error.
fn edit_session<F>(state: &AppState, id: SessionId, f: F) -> HttpResponse
where
    F: FnOnce(&mut SchedulingSession) -> Result<(), round_robin_planner::ScheduleError>,
{
    with_session(state, id, |session| match f(session) {
        Ok(()) => HttpResponse::Ok().json(SessionView::new(id, session)),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-planner",
    })
}

/// Create a scheduling session for a roster (returns it with id; client stores id).
#[post("/api/sessions")]
async fn api_create_session(
    state: AppState,
    config: Data<ServerConfig>,
    body: Json<CreateSessionBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let season = body.season.unwrap_or_else(|| Local::now().year());
    let session = match SchedulingSession::new(body.teams, config.rules, season) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    let id = Uuid::new_v4();
    let response = HttpResponse::Ok().json(SessionView::new(id, &session));
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let id = path.id;
    with_session(&state, id, |session| {
        HttpResponse::Ok().json(SessionView::new(id, session))
    })
}

/// Replace the roster; the schedule is discarded and rebuilt.
#[put("/api/sessions/{id}/teams")]
async fn api_replace_roster(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<ReplaceRosterBody>,
) -> HttpResponse {
    let teams = body.into_inner().teams;
    edit_session(&state, path.id, move |session| session.replace_roster(teams))
}

#[put("/api/sessions/{id}/slots/{round}/{slot}/teams")]
async fn api_set_teams(
    state: AppState,
    path: Path<SlotPath>,
    body: Json<SetTeamsBody>,
) -> HttpResponse {
    let at = path.slot_ref();
    edit_session(&state, path.id, |session| {
        session.set_teams(at, body.home, body.away)
    })
}

#[put("/api/sessions/{id}/slots/{round}/{slot}/kickoff")]
async fn api_set_kickoff(
    state: AppState,
    path: Path<SlotPath>,
    body: Json<SetKickoffBody>,
) -> HttpResponse {
    let at = path.slot_ref();
    edit_session(&state, path.id, |session| match body.kickoff.as_deref() {
        Some(text) if !text.trim().is_empty() => session.set_kickoff_text(at, text),
        _ => session.set_kickoff(at, None),
    })
}

#[put("/api/sessions/{id}/slots/{round}/{slot}/stadium")]
async fn api_set_stadium(
    state: AppState,
    path: Path<SlotPath>,
    body: Json<SetStadiumBody>,
) -> HttpResponse {
    let at = path.slot_ref();
    edit_session(&state, path.id, |session| {
        session.assign_stadium(at, &body.stadium)
    })
}

#[post("/api/sessions/{id}/slots/{round}/{slot}/reset")]
async fn api_reset_slot(state: AppState, path: Path<SlotPath>) -> HttpResponse {
    let at = path.slot_ref();
    edit_session(&state, path.id, |session| session.reset_slot(at))
}

/// Matchup candidates for a slot, plus the conflict suggestions raised at it.
#[get("/api/sessions/{id}/slots/{round}/{slot}/suggestions")]
async fn api_slot_suggestions(state: AppState, path: Path<SlotPath>) -> HttpResponse {
    let at = path.slot_ref();
    with_session(&state, path.id, |session| match session.suggestions_for(at) {
        Ok(suggestions) => HttpResponse::Ok().json(serde_json::json!({
            "matchups": suggestions,
            "conflicts": session.conflict_suggestions_for(at),
        })),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    })
}

/// Fixture records for the external save endpoint.
#[get("/api/sessions/{id}/fixtures")]
async fn api_fixtures(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| {
        HttpResponse::Ok().json(session.fixture_records())
    })
}

#[get("/api/sessions/{id}/fixtures.csv")]
async fn api_fixtures_csv(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| {
        let mut buf = Vec::new();
        match write_fixture_csv(&session.fixture_records(), &mut buf) {
            Ok(()) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .body(buf),
            Err(e) => {
                log::error!("CSV export failed: {}", e);
                HttpResponse::InternalServerError().json(error_json(e))
            }
        }
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Parse COMPETITION_MONTHS ("3,4") into rules; anything malformed falls back to the defaults.
fn rules_from_env() -> CompetitionRules {
    let Ok(raw) = std::env::var("COMPETITION_MONTHS") else {
        return CompetitionRules::default();
    };
    let months: Vec<u32> = raw
        .split(',')
        .filter_map(|m| m.trim().parse().ok())
        .collect();
    match months.as_slice() {
        [first, second] => CompetitionRules::new(*first, *second).unwrap_or_else(|e| {
            log::warn!("Ignoring COMPETITION_MONTHS={:?}: {}", raw, e);
            CompetitionRules::default()
        }),
        _ => {
            log::warn!("Ignoring COMPETITION_MONTHS={:?}: expected two months", raw);
            CompetitionRules::default()
        }
    }
}

/// Drop sessions idle for longer than `INACTIVITY_TIMEOUT`. Returns how many were dropped.
fn sweep_idle_sessions(sessions: &mut HashMap<SessionId, SessionEntry>) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
    before - sessions.len()
}

fn spawn_session_sweeper(state: AppState) {
    actix_web::rt::spawn(async move {
        let mut ticks = actix_web::rt::time::interval(SWEEP_INTERVAL);
        loop {
            ticks.tick().await;
            let Ok(mut sessions) = state.write() else {
                log::warn!("Session store lock poisoned; skipping sweep");
                continue;
            };
            let dropped = sweep_idle_sessions(&mut sessions);
            if dropped > 0 {
                log::info!(
                    "Dropped {} idle scheduling session(s), {} left",
                    dropped,
                    sessions.len()
                );
            }
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let rules = rules_from_env();
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Competition months: {:?}", rules.months);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));
    let config = Data::new(ServerConfig { rules });

    spawn_session_sweeper(state.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_replace_roster)
            .service(api_set_teams)
            .service(api_set_kickoff)
            .service(api_set_stadium)
            .service(api_reset_slot)
            .service(api_slot_suggestions)
            .service(api_fixtures)
            .service(api_fixtures_csv)
    })
    .bind(bind)?
    .run()
    .await
}
