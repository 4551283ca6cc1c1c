//! Ranking response DTOs

use serde::Serialize;

use crate::models::RankingEntry;

/// One leaderboard row
#[derive(Debug, Serialize)]
pub struct StandingResponse {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub scores: Vec<usize>,
    pub total: usize,
}

/// Full leaderboard
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub questions: usize,
    pub standings: Vec<StandingResponse>,
}

impl RankingResponse {
    /// Build from entries already in rank order
    pub fn from_standings(questions: usize, entries: Vec<RankingEntry>) -> Self {
        let standings = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| StandingResponse {
                rank: i + 1,
                name: entry.name,
                scores: entry.scores,
                total: entry.total,
            })
            .collect();

        Self {
            questions,
            standings,
        }
    }
}
