//! Seed data for the in-memory store.
//!
//! Four players and three duels. Rounds are stored out of order so the duels
//! endpoint's round sorting is observable.

use crate::{DuelGuess, DuelRound, EloHistory, Map, Panorama, SoloDuel, Store, User};

fn user(id: &str, username: &str, country_code: &str, rating: i64) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        country_code: country_code.to_string(),
        rating,
        avatar_url: None,
        pin_url: None,
    }
}

fn round(duel_id: &str, number: u32, p1: &User, p2: &User, hp: [i64; 4]) -> DuelRound {
    let round_id = format!("{duel_id}-r{number}");
    DuelRound {
        id: round_id.clone(),
        round_number: number,
        player1_hp_before: hp[0],
        player1_hp_after: hp[1],
        player2_hp_before: hp[2],
        player2_hp_after: hp[3],
        panorama: Panorama {
            id: format!("pano-{duel_id}-{number}"),
            lat: 48.85 + f64::from(number),
            lng: 2.35 - f64::from(number),
            country_code: Some("fr".to_string()),
            heading: Some(90.0),
            pitch: None,
            zoom: None,
        },
        guesses: vec![
            DuelGuess {
                round_id: round_id.clone(),
                player_id: p1.id.clone(),
                lat: 48.0,
                lng: 2.0,
                distance: 120.5,
                score: 4200,
            },
            DuelGuess {
                round_id,
                player_id: p2.id.clone(),
                lat: 45.0,
                lng: 5.0,
                distance: 480.0,
                score: 3100,
            },
        ],
    }
}

fn elo(duel_id: &str, player: &User, datetime: i64, change: i64) -> EloHistory {
    EloHistory {
        duel_id: duel_id.to_string(),
        user_id: player.id.clone(),
        datetime,
        elo_before: player.rating,
        elo_after: player.rating + change,
    }
}

fn duel(
    id: &str,
    start_time: i64,
    winner: &User,
    loser: &User,
    change: i64,
    elo_histories: Vec<EloHistory>,
) -> SoloDuel {
    SoloDuel {
        id: id.to_string(),
        mode: "StandardDuels".to_string(),
        start_time,
        player1_elo_change: Some(change),
        player2_elo_change: Some(-change),
        winner_id: winner.id.clone(),
        loser_id: loser.id.clone(),
        ranked: true,
        map: Map {
            id: "world".to_string(),
            name: "A Diverse World".to_string(),
        },
        rounds: vec![
            round(id, 2, winner, loser, [5000, 5000, 3900, 2000]),
            round(id, 1, winner, loser, [6000, 5000, 6000, 3900]),
            round(id, 3, winner, loser, [5000, 5000, 2000, 0]),
        ],
        player1: winner.clone(),
        player2: loser.clone(),
        elo_histories,
    }
}

/// Seeded store. Users start at their pre-season rating and the duels are
/// replayed in order, so each user's final rating is the last `elo_after`.
pub fn store() -> Store {
    let mut users = vec![
        user("u1", "Valentin", "fr", 1080),
        user("u2", "Alice", "se", 1262),
        user("u3", "Alicia", "br", 998),
        user("u4", "Bob", "us", 0),
    ];

    // (duel id, start time, winner index, loser index, elo change)
    let schedule = [
        ("d1", 1_700_000_000, 0, 1, 12),
        ("d2", 1_700_100_000, 0, 2, 8),
        ("d3", 1_700_200_000, 1, 2, 10),
    ];

    let mut histories = Vec::with_capacity(schedule.len());
    for &(id, start_time, winner, loser, change) in &schedule {
        histories.push(vec![
            elo(id, &users[winner], start_time, change),
            elo(id, &users[loser], start_time, -change),
        ]);
        users[winner].rating += change;
        users[loser].rating -= change;
    }

    // Embedded players carry their current rating, like the live API.
    let duels = schedule
        .iter()
        .zip(histories)
        .map(|(&(id, start_time, winner, loser, change), elo_histories)| {
            duel(id, start_time, &users[winner], &users[loser], change, elo_histories)
        })
        .collect();

    Store { users, duels }
}
