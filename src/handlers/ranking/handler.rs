//! Ranking handler implementations

use axum::{Json, extract::State};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

use super::response::RankingResponse;

/// Current leaderboard
pub async fn get_ranking(State(state): State<AppState>) -> Json<RankingResponse> {
    Json(RankingResponse::from_standings(
        state.competition().question_count(),
        state.ranking().standings(),
    ))
}

/// Address of the first-place team, which holds the SLA bonus
pub async fn get_leader_address(State(state): State<AppState>) -> AppResult<String> {
    state
        .ranking()
        .leader()
        .map(|entry| entry.address)
        .ok_or_else(|| AppError::NotFound("No team is ranked yet".to_string()))
}
