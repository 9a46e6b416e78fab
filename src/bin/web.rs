//! Single binary web server: JSON REST API over the in-memory registry.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).
//! KHELBA_ADMIN seeds the initial admin principal.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::RwLock;
use tournament_khelba::{
    filter_tournaments, format_remaining, parse_results_sheet, tournament_reveal, FeeBracket,
    FilterSpec, KhelbaError, NewTournament, PaymentId, Registry, RevealState, TournamentId,
    TournamentUpdate, UserProfile,
};

/// In-memory state: the whole platform registry behind one lock.
type AppState = Data<RwLock<Registry>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: payment id (e.g. /api/payments/{id}/approve)
#[derive(Deserialize)]
struct PaymentPath {
    id: PaymentId,
}

/// Query string for the tournament list: all criteria optional.
/// fee_brackets is comma-separated tags, e.g. fee_brackets=free,50-100
#[derive(Deserialize)]
struct TournamentListQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    prize_min: Option<u64>,
    #[serde(default)]
    prize_max: Option<u64>,
    #[serde(default)]
    fee_brackets: Option<String>,
}

#[derive(Deserialize)]
struct RoomQuery {
    player: String,
}

#[derive(Deserialize)]
struct RoomCredentialsBody {
    #[serde(default)]
    room_id: Option<String>,
    #[serde(default)]
    room_password: Option<String>,
    #[serde(default)]
    room_visibility_minutes: Option<u64>,
}

#[derive(Deserialize)]
struct SubmitPaymentBody {
    player: String,
}

#[derive(Deserialize)]
struct AdminBody {
    principal: String,
}

/// Missing entities map to 404, everything else to 400.
fn error_response(e: &KhelbaError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        KhelbaError::TournamentNotFound(_)
        | KhelbaError::PaymentNotFound(_)
        | KhelbaError::ProfileNotFound
        | KhelbaError::AdminNotFound => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-khelba",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// List tournaments, optionally filtered via query string.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, query: Query<TournamentListQuery>) -> HttpResponse {
    let mut spec = FilterSpec::default();
    if let Some(search) = &query.search {
        spec.search_query = search.clone();
    }
    spec.prize_min = query.prize_min;
    spec.prize_max = query.prize_max;
    if let Some(tags) = &query.fee_brackets {
        for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match FeeBracket::parse(tag) {
                Some(b) => spec.fee_brackets.push(b),
                None => {
                    return HttpResponse::BadRequest()
                        .json(serde_json::json!({ "error": format!("Unknown fee bracket '{}'", tag) }))
                }
            }
        }
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournaments = g.list_tournaments();
    HttpResponse::Ok().json(filter_tournaments(&tournaments, &spec))
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_tournament(path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Create a tournament (returns its id; client fetches the record from the list).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<NewTournament>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.create_tournament(body.into_inner()) {
        Ok(id) => {
            log::info!("Created tournament {}", id);
            HttpResponse::Ok().json(g.get_tournament(id))
        }
        Err(e) => error_response(&e),
    }
}

/// Partially update a tournament.
#[put("/api/tournaments/{id}")]
async fn api_update_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentUpdate>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.update_tournament(path.id, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(g.get_tournament(path.id)),
        Err(e) => error_response(&e),
    }
}

/// Delete a tournament along with its payments and results.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.delete_tournament(path.id) {
        Ok(()) => {
            log::info!("Deleted tournament {} with its payments and results", path.id);
            HttpResponse::Ok().json(serde_json::json!({ "deleted": path.id }))
        }
        Err(e) => error_response(&e),
    }
}

/// Set (or clear) room credentials and the visibility window.
#[put("/api/tournaments/{id}/room")]
async fn api_set_room_credentials(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RoomCredentialsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let body = body.into_inner();
    match g.set_room_credentials(
        path.id,
        body.room_id,
        body.room_password,
        body.room_visibility_minutes,
    ) {
        Ok(()) => HttpResponse::Ok().json(g.get_tournament(path.id)),
        Err(e) => error_response(&e),
    }
}

/// Room credentials as seen by a registered player right now: hidden until
/// the reveal window opens, then the actual credentials.
#[get("/api/tournaments/{id}/room")]
async fn api_room_credentials(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<RoomQuery>,
) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = match g.get_tournament(path.id) {
        Some(t) => t,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    if !g.is_registered(path.id, query.player.trim()) {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only registered players can view room credentials"
        }));
    }
    match tournament_reveal(t, Utc::now()) {
        RevealState::NotConfigured => HttpResponse::Ok().json(serde_json::json!({
            "status": "not_configured"
        })),
        RevealState::Concealed {
            reveal_at,
            remaining,
        } => HttpResponse::Ok().json(serde_json::json!({
            "status": "concealed",
            "reveal_at": reveal_at,
            "remaining_ms": remaining.num_milliseconds(),
            "remaining": format_remaining(remaining),
        })),
        RevealState::Revealed => HttpResponse::Ok().json(serde_json::json!({
            "status": "revealed",
            "room_id": t.room_id,
            "room_password": t.room_password,
        })),
    }
}

/// Submit an entry payment for a tournament.
#[post("/api/tournaments/{id}/payments")]
async fn api_submit_payment(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SubmitPaymentBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.submit_payment(path.id, &body.player, Utc::now()) {
        Ok(id) => HttpResponse::Ok().json(g.get_payment(id)),
        Err(e) => error_response(&e),
    }
}

/// Payments for one tournament (404 if the tournament does not exist).
#[get("/api/tournaments/{id}/payments")]
async fn api_payments_by_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.get_tournament(path.id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    }
    HttpResponse::Ok().json(g.payments_by_tournament(path.id))
}

/// All payments awaiting review, across tournaments.
#[get("/api/payments/pending")]
async fn api_pending_payments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.pending_payments())
}

/// Approve a pending payment, registering the player.
#[post("/api/payments/{id}/approve")]
async fn api_approve_payment(state: AppState, path: Path<PaymentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.approve_payment(path.id) {
        Ok(()) => {
            log::info!("Approved payment {}", path.id);
            HttpResponse::Ok().json(g.get_payment(path.id))
        }
        Err(e) => error_response(&e),
    }
}

/// Reject a pending payment.
#[post("/api/payments/{id}/reject")]
async fn api_reject_payment(state: AppState, path: Path<PaymentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.reject_payment(path.id) {
        Ok(()) => {
            log::info!("Rejected payment {}", path.id);
            HttpResponse::Ok().json(g.get_payment(path.id))
        }
        Err(e) => error_response(&e),
    }
}

/// Upload final standings as a rank,player,kills,prize CSV sheet.
#[post("/api/tournaments/{id}/results")]
async fn api_upload_results(
    state: AppState,
    path: Path<TournamentPath>,
    sheet: String,
) -> HttpResponse {
    let entries = match parse_results_sheet(&sheet) {
        Ok(entries) => entries,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.upload_results(path.id, entries) {
        Ok(()) => {
            log::info!("Stored results for tournament {}", path.id);
            HttpResponse::Ok().json(g.results(path.id))
        }
        Err(e) => error_response(&e),
    }
}

/// Uploaded standings for a tournament (404 until a sheet is uploaded).
#[get("/api/tournaments/{id}/results")]
async fn api_get_results(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.get_tournament(path.id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }));
    }
    match g.results(path.id) {
        Some(entries) => HttpResponse::Ok().json(entries),
        None => HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "No results uploaded yet" })),
    }
}

/// Create or replace a player's profile.
#[put("/api/profiles/{principal}")]
async fn api_save_profile(
    state: AppState,
    path: Path<String>,
    body: Json<UserProfile>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.save_profile(&path, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(g.get_profile(path.trim())),
        Err(e) => error_response(&e),
    }
}

#[get("/api/profiles/{principal}")]
async fn api_get_profile(state: AppState, path: Path<String>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_profile(&path) {
        Some(profile) => HttpResponse::Ok().json(profile),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No profile" })),
    }
}

#[delete("/api/profiles/{principal}")]
async fn api_delete_profile(state: AppState, path: Path<String>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.delete_profile(&path) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": path.as_str() })),
        Err(e) => error_response(&e),
    }
}

#[get("/api/admins")]
async fn api_list_admins(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.admins())
}

#[post("/api/admins")]
async fn api_add_admin(state: AppState, body: Json<AdminBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.add_admin(&body.principal) {
        Ok(()) => HttpResponse::Ok().json(g.admins()),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/admins/{principal}")]
async fn api_remove_admin(state: AppState, path: Path<String>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_admin(&path) {
        Ok(()) => HttpResponse::Ok().json(g.admins()),
        Err(e) => error_response(&e),
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
    log::info!("Starting server at http://{}:{}", host, port);

    let mut registry = Registry::new();
    if let Ok(principal) = std::env::var("KHELBA_ADMIN") {
        match registry.add_admin(&principal) {
            Ok(()) => log::info!("Seeded admin '{}' from KHELBA_ADMIN", principal.trim()),
            Err(e) => log::warn!("Could not seed admin from KHELBA_ADMIN: {}", e),
        }
    }
    let state = Data::new(RwLock::new(registry));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_create_tournament)
            .service(api_update_tournament)
            .service(api_delete_tournament)
            .service(api_set_room_credentials)
            .service(api_room_credentials)
            .service(api_submit_payment)
            .service(api_payments_by_tournament)
            .service(api_pending_payments)
            .service(api_approve_payment)
            .service(api_reject_payment)
            .service(api_upload_results)
            .service(api_get_results)
            .service(api_save_profile)
            .service(api_get_profile)
            .service(api_delete_profile)
            .service(api_list_admins)
            .service(api_remove_admin)
            .service(api_add_admin)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
