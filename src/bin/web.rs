//! Single binary web server: REST API for tournaments plus the /ws sync relay.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use actix_ws::Message;
use badminton_tournament_web::{
    apply_score, auto_finalize_stale, create_tournament, finalize_tournament, ranked_players,
    rename_players, ClientEvent, ConnId, MatchId, MemoryStore, Relay, ServerEvent,
    TournamentError, TournamentId, TournamentStore,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Process-wide state: created once at boot, shared into every handler,
/// dropped at shutdown. Nothing survives a restart.
struct AppContext {
    store: Arc<dyn TournamentStore>,
    relay: RwLock<Relay>,
}

type AppData = Data<AppContext>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTournamentBody {
    access_code: String,
    player_names: Vec<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    match_id: MatchId,
    score_a: i32,
    score_b: i32,
    #[serde(default)]
    is_edit: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenamePlayersBody {
    player_names: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveResponse {
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tournament: Option<ActiveSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveSummary {
    id: TournamentId,
    access_code: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: access code (e.g. /api/tournaments/by-code/{code})
#[derive(Deserialize)]
struct AccessCodePath {
    code: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound | TournamentError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::ActiveTournamentConflict | TournamentError::AlreadyFinalized => {
            HttpResponse::Conflict().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (8 names + access code). Only one tournament may
/// be active at a time; a second attempt gets 409.
#[post("/api/tournaments")]
async fn api_create_tournament(ctx: AppData, body: Json<CreateTournamentBody>) -> HttpResponse {
    match create_tournament(
        ctx.store.as_ref(),
        &body.access_code,
        &body.player_names,
        body.date.clone(),
    ) {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => error_response(&e),
    }
}

/// Report whether a tournament is currently active. Stale sessions (24h+)
/// are finalized on the way through so they stop blocking creation.
#[get("/api/tournaments/active")]
async fn api_active_tournament(ctx: AppData) -> HttpResponse {
    if let Err(e) = auto_finalize_stale(ctx.store.as_ref(), Utc::now()) {
        return error_response(&e);
    }
    let active = ctx.store.active_tournament();
    HttpResponse::Ok().json(ActiveResponse {
        active: active.is_some(),
        tournament: active.map(|t| ActiveSummary {
            id: t.id,
            access_code: t.access_code,
        }),
    })
}

/// All finalized tournaments, newest first, players ordered by total score
/// for history display.
#[get("/api/tournaments/history")]
async fn api_tournament_history(ctx: AppData) -> HttpResponse {
    let mut tournaments = ctx.store.finalized_tournaments();
    for t in &mut tournaments {
        t.players
            .sort_by(|a, b| b.total_score.cmp(&a.total_score).then(a.id.cmp(&b.id)));
    }
    HttpResponse::Ok().json(&tournaments)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(ctx: AppData, path: Path<TournamentPath>) -> HttpResponse {
    match ctx.store.tournament_by_id(&path.id) {
        Some(t) => HttpResponse::Ok().json(&t),
        None => error_response(&TournamentError::TournamentNotFound),
    }
}

/// Get the newest unfinalized tournament with this access code.
#[get("/api/tournaments/by-code/{code}")]
async fn api_get_tournament_by_code(ctx: AppData, path: Path<AccessCodePath>) -> HttpResponse {
    match ctx.store.active_by_code(&path.code) {
        Some(t) => HttpResponse::Ok().json(&t),
        None => error_response(&TournamentError::TournamentNotFound),
    }
}

/// Tie-aware leaderboard for a tournament, best total first.
#[get("/api/tournaments/{id}/rank")]
async fn api_rank_players(ctx: AppData, path: Path<TournamentPath>) -> HttpResponse {
    match ctx.store.tournament_by_id(&path.id) {
        Some(t) => HttpResponse::Ok().json(ranked_players(&t)),
        None => error_response(&TournamentError::TournamentNotFound),
    }
}

/// Submit or edit a match score. The finalization guard lives here: the
/// scoring engine itself never re-checks the flag.
#[post("/api/tournaments/{id}/score")]
async fn api_submit_score(
    ctx: AppData,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut t = match ctx.store.tournament_by_id(&path.id) {
        Some(t) => t,
        None => return error_response(&TournamentError::TournamentNotFound),
    };
    if t.is_finalized {
        return error_response(&TournamentError::AlreadyFinalized);
    }
    if let Err(e) = apply_score(&mut t, body.match_id, body.score_a, body.score_b, body.is_edit) {
        return error_response(&e);
    }
    if let Err(e) = ctx.store.update_tournament(&t) {
        return error_response(&e);
    }
    HttpResponse::Ok().json(&t)
}

/// Replace all 8 player names.
#[put("/api/tournaments/{id}/players")]
async fn api_rename_players(
    ctx: AppData,
    path: Path<TournamentPath>,
    body: Json<RenamePlayersBody>,
) -> HttpResponse {
    match rename_players(ctx.store.as_ref(), &path.id, &body.player_names) {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => error_response(&e),
    }
}

/// Finalize: reconcile totals from match history, then flip the one-way flag.
#[post("/api/tournaments/{id}/finalize")]
async fn api_finalize_tournament(ctx: AppData, path: Path<TournamentPath>) -> HttpResponse {
    match finalize_tournament(ctx.store.as_ref(), &path.id) {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => error_response(&e),
    }
}

/// Hard delete, cascading to the tournament's players and matches.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(ctx: AppData, path: Path<TournamentPath>) -> HttpResponse {
    match ctx.store.delete_tournament(&path.id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": true })),
        Err(e) => error_response(&e),
    }
}

/// Upgrade into the sync relay. One task per connection pumps the outbound
/// queue and the inbound frames until either side closes.
#[get("/ws")]
async fn ws_relay(req: HttpRequest, body: web::Payload, ctx: AppData) -> actix_web::Result<HttpResponse> {
    let (response, session, msg_stream) = actix_ws::handle(&req, body)?;
    let (tx, rx) = mpsc::unbounded_channel::<ServerEvent>();
    let conn = match ctx.relay.write() {
        Ok(mut relay) => relay.connect(tx),
        Err(_) => return Ok(HttpResponse::InternalServerError().body("lock error")),
    };
    actix_web::rt::spawn(relay_session(ctx.clone(), conn, session, msg_stream, rx));
    Ok(response)
}

async fn relay_session(
    ctx: AppData,
    conn: ConnId,
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: UnboundedReceiver<ServerEvent>,
) {
    loop {
        tokio::select! {
            outbound = rx.recv() => {
                let Some(event) = outbound else { break };
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        log::warn!("relay: failed to encode event: {}", e);
                        continue;
                    }
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            inbound = msg_stream.recv() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => {
                                if let Ok(mut relay) = ctx.relay.write() {
                                    relay.handle(conn, event);
                                }
                            }
                            // Malformed input degrades to no visible change.
                            Err(e) => log::debug!("relay: ignoring malformed frame: {}", e),
                        }
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        log::debug!("relay: websocket protocol error: {}", e);
                        break;
                    }
                }
            }
        }
    }
    if let Ok(mut relay) = ctx.relay.write() {
        relay.disconnect(conn);
    }
    let _ = session.close(None).await;
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

    let ctx = Data::new(AppContext {
        store: Arc::new(MemoryStore::new()),
        relay: RwLock::new(Relay::new()),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_active_tournament)
            .service(api_tournament_history)
            .service(api_get_tournament_by_code)
            .service(api_get_tournament)
            .service(api_rank_players)
            .service(api_submit_score)
            .service(api_rename_players)
            .service(api_finalize_tournament)
            .service(api_delete_tournament)
            .service(ws_relay)
    })
    .bind(bind)?
    .run()
    .await
}
