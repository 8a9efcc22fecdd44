//! Typed views of the GeoTrackr API responses.
//!
//! # Design
//! The client hands back `serde_json::Value` by default; these DTOs are an
//! opt-in decoding target for `ApiClient::parse_body_as` and `Api::fetch_as`.
//! They mirror the mock-api schema but are defined independently so the
//! integration tests catch schema drift.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub country_code: String,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub pin_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Panorama {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub country_code: Option<String>,
    pub heading: Option<f64>,
    pub pitch: Option<f64>,
    pub zoom: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuelGuess {
    pub round_id: String,
    pub player_id: String,
    pub lat: f64,
    pub lng: f64,
    pub distance: f64,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Map {
    pub id: String,
    pub name: String,
}

/// One elo change caused by a duel. `datetime` is a unix timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EloHistory {
    pub duel_id: String,
    pub user_id: String,
    pub datetime: i64,
    pub elo_before: i64,
    pub elo_after: i64,
}

/// A ranked or unranked one-versus-one duel with its full round breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

/// A single point of a user's ranking graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankingPoint {
    pub elo: i64,
    pub timestamp: i64,
}
