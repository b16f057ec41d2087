//! Optional remote high-score service
//!
//! Pure persistence glue around the `HighScores` leaderboard - none of
//! this touches the simulation. Scores live in process memory; durability
//! is explicitly not a goal. Validation failures are rejected at this
//! boundary with a 400 and never reach storage.

use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::highscores::{HighScoreEntry, HighScores};

/// Shared in-memory leaderboard
pub struct ScoreBoard {
    pub scores: Mutex<HighScores>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            scores: Mutex::new(HighScores::new()),
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw submission payload; every field optional so validation can name
/// what's missing instead of bubbling a deserializer error
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScore {
    player_name: Option<String>,
    score: Option<u64>,
    created_at: Option<String>,
}

impl SubmitScore {
    fn validate(self) -> Result<HighScoreEntry, String> {
        let player_name = self
            .player_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| "playerName is required".to_string())?;
        if player_name.len() > 32 {
            return Err("playerName must be at most 32 characters".to_string());
        }
        let score = self.score.ok_or_else(|| "score is required".to_string())?;
        let created_at = self
            .created_at
            .filter(|stamp| !stamp.trim().is_empty())
            .ok_or_else(|| "createdAt is required".to_string())?;
        Ok(HighScoreEntry {
            player_name,
            score,
            created_at,
        })
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/api/high-scores")]
async fn list_scores(board: web::Data<ScoreBoard>) -> impl Responder {
    match board.scores.lock() {
        Ok(scores) => HttpResponse::Ok().json(scores.entries()),
        Err(_) => storage_failure(),
    }
}

#[post("/api/high-scores")]
async fn submit_score(
    board: web::Data<ScoreBoard>,
    payload: web::Json<SubmitScore>,
) -> impl Responder {
    let entry = match payload.into_inner().validate() {
        Ok(entry) => entry,
        Err(reason) => {
            log::debug!("rejected score submission: {reason}");
            return HttpResponse::BadRequest().json(json!({ "error": reason }));
        }
    };

    match board.scores.lock() {
        Ok(mut scores) => {
            let rank = scores.add(entry.clone());
            log::info!(
                "stored high score {} for {} (rank {rank})",
                entry.score,
                entry.player_name
            );
            HttpResponse::Created().json(entry)
        }
        Err(_) => storage_failure(),
    }
}

fn storage_failure() -> HttpResponse {
    log::error!("score store lock poisoned");
    HttpResponse::InternalServerError().json(json!({ "error": "score store unavailable" }))
}

/// Route registration shared by the binary and the test harness
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(list_scores)
        .service(submit_score);
}

/// Serve until shutdown
pub async fn run(addr: &str) -> std::io::Result<()> {
    let board = web::Data::new(ScoreBoard::new());
    log::info!("high-score service listening on {addr}");
    HttpServer::new(move || App::new().app_data(board.clone()).configure(configure))
        .bind(addr)?
        .run()
        .await
}
