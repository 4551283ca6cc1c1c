//! Question model

use chrono::{DateTime, Duration, Utc};

use crate::{
    constants::FLAG_WRONG_RATIO,
    error::{AppError, AppResult},
};

use super::BitmapGrid;

/// Outcome of scoring one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Number of correct cells
    pub score: usize,
    /// Number of wrong cells
    pub wrong: usize,
    /// Reward token, present only when the submission is close enough
    pub flag: Option<String>,
}

/// A hidden answer image with its release time and reward token
#[derive(Debug, Clone)]
pub struct Question {
    answer: BitmapGrid,
    open_offset: Duration,
    reward_token: String,
}

impl Question {
    /// Create a question. The answer must have a positive area and the token
    /// must be non-empty.
    pub fn new(
        answer: BitmapGrid,
        open_offset: Duration,
        reward_token: impl Into<String>,
    ) -> AppResult<Self> {
        let reward_token = reward_token.into();
        if answer.is_empty() {
            return Err(AppError::Configuration(
                "answer image must not be empty".to_string(),
            ));
        }
        if reward_token.is_empty() {
            return Err(AppError::Configuration(
                "reward token must not be empty".to_string(),
            ));
        }
        if open_offset < Duration::zero() {
            return Err(AppError::Configuration(
                "open offset must not be negative".to_string(),
            ));
        }

        Ok(Self {
            answer,
            open_offset,
            reward_token,
        })
    }

    pub fn answer(&self) -> &BitmapGrid {
        &self.answer
    }

    pub fn open_offset(&self) -> Duration {
        self.open_offset
    }

    /// Open strictly after `start + open_offset`
    pub fn is_open(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        start + self.open_offset < now
    }

    /// Whether `wrong` mismatches are few enough to release the token
    pub fn can_get_flag(&self, wrong: usize) -> bool {
        (wrong as f64) / (self.answer.area() as f64) < FLAG_WRONG_RATIO
    }

    /// Compare a submission against the answer
    pub fn score(&self, submission: &BitmapGrid) -> AppResult<Attempt> {
        if submission.height() == 0
            || submission.height() != self.answer.height()
            || submission.width() != self.answer.width()
        {
            return Err(AppError::SizeMismatch {
                expected_height: self.answer.height(),
                expected_width: self.answer.width(),
                actual_height: submission.height(),
                actual_width: submission.width(),
            });
        }

        let wrong = self.answer.count_mismatches(submission);
        let flag = self
            .can_get_flag(wrong)
            .then(|| self.reward_token.clone());

        Ok(Attempt {
            score: self.answer.area() - wrong,
            wrong,
            flag,
        })
    }
}
