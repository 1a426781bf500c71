use crate::error::GameError;
use crate::game::{CardPlay, GameOptions, GameStatus, PlayerUpdate};
use crate::session::{Identity, SessionHandle, SessionManager};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::MutexGuard;
use tokio::net::TcpListener;

pub fn make_router(manager: &'static SessionManager) -> Router {
    Router::new()
        .route("/games", post(create_game).get(get_games))
        .route(
            "/games/:id",
            get(get_game).patch(set_status).delete(delete_game),
        )
        .route("/games/:id/play", post(play))
        .route("/games/:id/cards/shuffle", post(shuffle_cards))
        .route("/games/:id/players", patch(update_players))
        .with_state(manager)
}

pub async fn listen(port: u16) -> TcpListener {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .expect("could not bind to port");
    log::info!("Listening on {}", listener.local_addr().unwrap());
    listener
}

/// An error surfaced over HTTP as `{ "type": ..., "error": ... }`.
struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        use GameError::*;
        let status = match err {
            GameNotFound | PlayerNotFound | UnknownTeam => StatusCode::NOT_FOUND,
            GameDoesntBelongToUser => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "type": self.kind, "error": self.message }));
        (self.status, body).into_response()
    }
}

fn unauthorized() -> ApiError {
    ApiError {
        status: StatusCode::UNAUTHORIZED,
        kind: "UNAUTHORIZED",
        message: "authentication is required".to_string(),
    }
}

fn bad_request(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        kind: "BAD_REQUEST",
        message: message.to_string(),
    }
}

fn internal_error() -> ApiError {
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        kind: "INTERNAL_SERVER_ERROR",
        message: "internal server error".to_string(),
    }
}

/// Establishes the caller identity from the `Authorization` header. A bearer
/// token matching `ADMIN_TOKEN` is the admin; any other non-empty token is an
/// opaque user identity. Token issuance itself is out of scope here.
fn identity(headers: &HeaderMap) -> Option<Identity> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    match std::env::var("ADMIN_TOKEN") {
        Ok(admin) if admin == token => Some(Identity::Admin),
        _ => Some(Identity::User(token.to_string())),
    }
}

fn lock_session(
    handle: &SessionHandle,
) -> Result<MutexGuard<'_, crate::session::Session>, ApiError> {
    handle.lock().map_err(|_| internal_error())
}

#[derive(Deserialize)]
struct CreateGameRequest {
    players: Vec<NewPlayer>,
    #[serde(default)]
    status: Option<GameStatus>,
    #[serde(default)]
    options: GameOptions,
}

#[derive(Deserialize)]
struct NewPlayer {
    name: String,
}

#[derive(Deserialize)]
struct PlayRequest {
    cards: Vec<CardPlay>,
}

#[derive(Deserialize)]
struct SetStatusRequest {
    status: GameStatus,
}

#[derive(Deserialize)]
struct UpdatePlayersRequest {
    players: Vec<PlayerUpdate>,
}

async fn create_game(
    State(manager): State<&'static SessionManager>,
    headers: HeaderMap,
    Json(req): Json<CreateGameRequest>,
) -> Result<Json<Value>, ApiError> {
    let identity = identity(&headers).ok_or_else(unauthorized)?;
    let names: Vec<String> = req.players.into_iter().map(|player| player.name).collect();
    let handle = manager.create_game(&identity, &names, req.options, req.status)?;
    let session = lock_session(&handle)?;
    Ok(Json(session.game_json()))
}

async fn get_games(
    State(manager): State<&'static SessionManager>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    match identity(&headers) {
        Some(Identity::Admin) => Ok(Json(Value::Array(manager.games_json()))),
        _ => Err(unauthorized()),
    }
}

async fn get_game(
    State(manager): State<&'static SessionManager>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = identity(&headers).ok_or_else(unauthorized)?;
    let handle = manager.find_game(&id)?;
    let session = lock_session(&handle)?;
    session.check_owner(&identity)?;
    Ok(Json(session.game_json()))
}

async fn delete_game(
    State(manager): State<&'static SessionManager>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    match identity(&headers) {
        Some(Identity::Admin) => {
            let handle = manager.delete_game(&id)?;
            let session = lock_session(&handle)?;
            Ok(Json(session.game_json()))
        }
        _ => Err(unauthorized()),
    }
}

async fn set_status(
    State(manager): State<&'static SessionManager>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    let identity = identity(&headers).ok_or_else(unauthorized)?;
    let handle = manager.find_game(&id)?;
    let mut session = lock_session(&handle)?;
    session.check_owner(&identity)?;
    session.mutate_game(|game| game.set_status(req.status))?;
    Ok(Json(session.game_json()))
}

async fn play(
    State(manager): State<&'static SessionManager>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<PlayRequest>,
) -> Result<Json<Value>, ApiError> {
    let identity = identity(&headers).ok_or_else(unauthorized)?;
    if req.cards.is_empty() {
        return Err(bad_request("at least one card must be played"));
    }
    let handle = manager.find_game(&id)?;
    let mut session = lock_session(&handle)?;
    session.check_owner(&identity)?;
    session.mutate_game(|game| game.play(&req.cards))?;
    Ok(Json(session.game_json()))
}

async fn shuffle_cards(
    State(manager): State<&'static SessionManager>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = identity(&headers).ok_or_else(unauthorized)?;
    let handle = manager.find_game(&id)?;
    let mut session = lock_session(&handle)?;
    session.check_owner(&identity)?;
    session.mutate_game(|game| game.shuffle_cards())?;
    Ok(Json(session.game_json()))
}

async fn update_players(
    State(manager): State<&'static SessionManager>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdatePlayersRequest>,
) -> Result<Json<Value>, ApiError> {
    let identity = identity(&headers).ok_or_else(unauthorized)?;
    let handle = manager.find_game(&id)?;
    let mut session = lock_session(&handle)?;
    session.check_owner(&identity)?;
    session.mutate_game(|game| game.update_players(&req.players))?;
    Ok(Json(session.game_json()))
}
