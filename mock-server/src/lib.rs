use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub mod seed;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub country_code: String,
    pub rating: i64,
    pub avatar_url: Option<String>,
    pub pin_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Panorama {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub country_code: Option<String>,
    pub heading: Option<f64>,
    pub pitch: Option<f64>,
    pub zoom: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DuelGuess {
    pub round_id: String,
    pub player_id: String,
    pub lat: f64,
    pub lng: f64,
    pub distance: f64,
    pub score: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DuelRound {
    pub id: String,
    pub round_number: u32,
    pub player1_hp_before: i64,
    pub player1_hp_after: i64,
    pub player2_hp_before: i64,
    pub player2_hp_after: i64,
    pub panorama: Panorama,
    pub guesses: Vec<DuelGuess>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Map {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EloHistory {
    pub duel_id: String,
    pub user_id: String,
    pub datetime: i64,
    pub elo_before: i64,
    pub elo_after: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SoloDuel {
    pub id: String,
    pub mode: String,
    pub start_time: i64,
    pub player1_elo_change: Option<i64>,
    pub player2_elo_change: Option<i64>,
    pub winner_id: String,
    pub loser_id: String,
    pub ranked: bool,
    pub map: Map,
    pub rounds: Vec<DuelRound>,
    pub player1: User,
    pub player2: User,
    pub elo_histories: Vec<EloHistory>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankingPoint {
    pub elo: i64,
    pub timestamp: i64,
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    pub users: Vec<User>,
    pub duels: Vec<SoloDuel>,
}

pub type Db = Arc<RwLock<Store>>;

fn default_limit() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub username: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// The API router over the seeded store, mounted under `/api`.
pub fn app() -> Router {
    app_with(seed::store())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/duels", get(list_user_duels))
        .route("/users/{id}/ranking", get(get_user_ranking))
        .route("/echo/content-type", get(echo_content_type))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>, Query(query): Query<UsersQuery>) -> Json<Vec<User>> {
    let store = db.read().await;
    let needle = query
        .username
        .filter(|u| !u.is_empty())
        .map(|u| u.to_lowercase());
    let users = store
        .users
        .iter()
        .filter(|u| {
            needle
                .as_deref()
                .is_none_or(|n| u.username.to_lowercase().contains(n))
        })
        .skip(query.offset)
        .take(query.limit)
        .cloned()
        .collect();
    Json(users)
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    store
        .users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_user_duels(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(paging): Query<PageQuery>,
) -> Json<Vec<SoloDuel>> {
    let store = db.read().await;
    let mut duels: Vec<SoloDuel> = store
        .duels
        .iter()
        .filter(|d| d.player1.id == id || d.player2.id == id)
        .cloned()
        .collect();
    duels.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let mut page: Vec<SoloDuel> = duels.into_iter().skip(paging.offset).take(paging.limit).collect();
    for duel in &mut page {
        duel.rounds.sort_by_key(|r| r.round_number);
    }
    Json(page)
}

async fn get_user_ranking(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RankingPoint>>, StatusCode> {
    let store = db.read().await;
    if !store.users.iter().any(|u| u.id == id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let mut history: Vec<&EloHistory> = store
        .duels
        .iter()
        .flat_map(|d| d.elo_histories.iter())
        .filter(|h| h.user_id == id)
        .collect();
    history.sort_by_key(|h| h.datetime);
    let points = history
        .into_iter()
        .map(|h| RankingPoint {
            elo: h.elo_after,
            timestamp: h.datetime,
        })
        .collect();
    Ok(Json(points))
}

/// Reports the request's `content-type` header, `null` when absent.
async fn echo_content_type(headers: HeaderMap) -> Json<serde_json::Value> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    Json(serde_json::json!({ "content_type": content_type }))
}
