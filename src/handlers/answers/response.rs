//! Answer response DTOs

use serde::Serialize;

use crate::models::Attempt;

/// Scoring result returned to the submitting team
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Count of wrong cells
    pub wrong: usize,
    /// Count of correct cells
    pub score: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl From<Attempt> for AnswerResponse {
    fn from(attempt: Attempt) -> Self {
        Self {
            wrong: attempt.wrong,
            score: attempt.score,
            flag: attempt.flag,
        }
    }
}
