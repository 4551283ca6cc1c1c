//! Competition model

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::GameConfig,
    constants::ANSWER_ROW_SEPARATOR,
    error::{AppError, AppResult},
};

use super::{Attempt, BitmapGrid, Question};

/// Ordered set of questions sharing one start time
#[derive(Debug, Clone)]
pub struct Competition {
    questions: Vec<Question>,
    start: DateTime<Utc>,
}

impl Competition {
    pub fn new(start: DateTime<Utc>, questions: Vec<Question>) -> Self {
        Self { questions, start }
    }

    /// Build the competition from the game file. Malformed answers abort startup.
    pub fn from_config(config: &GameConfig) -> AppResult<Self> {
        let questions = config
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let answer = BitmapGrid::parse(&q.map, ANSWER_ROW_SEPARATOR).map_err(|e| {
                    AppError::Configuration(format!("question {}: {}", i + 1, e))
                })?;
                Question::new(answer, Duration::seconds(i64::from(q.open)), q.flag.clone())
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self::new(config.game.start, questions))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Whether the 0-based question exists and is open at `now`
    pub fn is_open(&self, index: usize, now: DateTime<Utc>) -> bool {
        self.questions
            .get(index)
            .is_some_and(|q| q.is_open(self.start, now))
    }

    /// Score a submission against a question at the current time
    pub fn attempt(&self, submission: &BitmapGrid, index: usize) -> AppResult<Attempt> {
        self.attempt_at(submission, index, Utc::now())
    }

    pub fn attempt_at(
        &self,
        submission: &BitmapGrid,
        index: usize,
        now: DateTime<Utc>,
    ) -> AppResult<Attempt> {
        match self.questions.get(index) {
            Some(question) if question.is_open(self.start, now) => question.score(submission),
            _ => Err(AppError::InvalidQuestion {
                number: index.saturating_add(1),
            }),
        }
    }
}
