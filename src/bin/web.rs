//! Single binary JSON API over the court picker sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use court_picker::{next_game, start_game, Session, SessionId, DEFAULT_NUM_COURTS};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// In-memory state: many sessions by ID. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default = "default_num_courts")]
    num_courts: usize,
    #[serde(default)]
    players: Vec<String>,
}

fn default_num_courts() -> usize {
    DEFAULT_NUM_COURTS
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct NumCourtsBody {
    num_courts: usize,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player id (e.g. /api/sessions/{id}/players/{player_id})
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: Uuid,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-picker",
    })
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    let session = match body {
        Some(b) => {
            let b = b.into_inner();
            if b.num_courts == 0 {
                return bad_request(court_picker::SessionError::InvalidCourtCount);
            }
            let mut session = Session::new(b.num_courts);
            if let Some((name, e)) = session.add_players(b.players).into_iter().next() {
                return bad_request(format!("{}: {:?}", e, name));
            }
            session
        }
        None => Session::new(default_num_courts()),
    };
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created session {}", id);
    let entry = g.entry(id).or_insert(SessionEntry {
        session,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.session)
}

/// Get a session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.session)
        }
        None => not_found(),
    }
}

/// Add a player (Setup or during play; joins from the next game).
#[post("/api/sessions/{id}/players")]
async fn api_add_player(state: AppState, path: Path<SessionPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match s.add_player(body.name.as_str()) {
        Ok(_) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    }
}

/// Remove a player by id; their partner history is forgotten.
#[delete("/api/sessions/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match s.remove_player(path.player_id) {
        Ok(_) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    }
}

/// Update the number of courts (Setup only).
#[put("/api/sessions/{id}/courts")]
async fn api_set_num_courts(state: AppState, path: Path<SessionPath>, body: Json<NumCourtsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match s.set_num_courts(body.num_courts) {
        Ok(()) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    }
}

/// Start the session and generate game 1.
#[post("/api/sessions/{id}/start")]
async fn api_start_game(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match start_game(s, &mut rand::thread_rng()) {
        Ok(()) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    }
}

/// Rotate players and generate the next game.
#[post("/api/sessions/{id}/next")]
async fn api_next_game(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match next_game(s, &mut rand::thread_rng()) {
        Ok(()) => HttpResponse::Ok().json(s),
        Err(e) => bad_request(e),
    }
}

/// Reset: empty roster, back to Setup.
#[post("/api/sessions/{id}/reset")]
async fn api_reset_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    entry.session.reset();
    HttpResponse::Ok().json(&entry.session)
}

/// Per-player statistics, least played first.
#[get("/api/sessions/{id}/stats")]
async fn api_player_stats(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.session.player_stats())
        }
        None => not_found(),
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

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_num_courts)
            .service(api_start_game)
            .service(api_next_game)
            .service(api_reset_session)
            .service(api_player_stats)
    })
    .bind(bind)?
    .run()
    .await
}
