//! Ranking models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One team's row on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Source address of the team's first accepted submission
    pub address: String,
    /// Team name, also the board key
    pub name: String,
    /// Best score per question
    pub scores: Vec<usize>,
    /// Sum of `scores`
    pub total: usize,
}

impl RankingEntry {
    pub fn new(address: impl Into<String>, name: impl Into<String>, questions: usize) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            scores: vec![0; questions],
            total: 0,
        }
    }

    /// Store `score` as the best for `index` if it beats the current one.
    ///
    /// Returns `None` when the entry has no slot for `index`.
    pub fn raise(&mut self, index: usize, score: usize) -> Option<bool> {
        let best = self.scores.get_mut(index)?;
        if score <= *best {
            return Some(false);
        }
        *best = score;
        self.total = self.scores.iter().sum();
        Some(true)
    }
}

/// Full board state, also the persisted snapshot format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSnapshot {
    pub start: DateTime<Utc>,
    pub question_count: usize,
    pub teams: HashMap<String, RankingEntry>,
}

impl RankingSnapshot {
    pub fn new(start: DateTime<Utc>, question_count: usize) -> Self {
        Self {
            start,
            question_count,
            teams: HashMap::new(),
        }
    }

    /// Entries by total, highest first. Equal totals have no defined order.
    pub fn ordered(&self) -> Vec<&RankingEntry> {
        let mut list: Vec<&RankingEntry> = self.teams.values().collect();
        list.sort_by(|a, b| b.total.cmp(&a.total));
        list
    }

    /// 0-based rank of a team, `None` while it has no entry
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.ordered().iter().position(|entry| entry.name == name)
    }
}

/// Rank movement caused by one append
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RankChange {
    pub rank_improved: bool,
    pub became_first: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_keeps_best() {
        let mut entry = RankingEntry::new("10.0.0.1", "alpha", 3);
        assert_eq!(entry.raise(1, 5), Some(true));
        assert_eq!(entry.raise(1, 5), Some(false));
        assert_eq!(entry.raise(1, 3), Some(false));
        assert_eq!(entry.raise(2, 7), Some(true));
        assert_eq!(entry.scores, vec![0, 5, 7]);
        assert_eq!(entry.total, 12);
        assert_eq!(entry.raise(3, 1), None);
    }

    #[test]
    fn test_rank_order() {
        let mut board = RankingSnapshot::new(Utc::now(), 1);
        for (name, score) in [("a", 3), ("b", 9), ("c", 5)] {
            let mut entry = RankingEntry::new(name, name, 1);
            entry.raise(0, score);
            board.teams.insert(name.to_string(), entry);
        }
        assert_eq!(board.rank_of("b"), Some(0));
        assert_eq!(board.rank_of("c"), Some(1));
        assert_eq!(board.rank_of("a"), Some(2));
        assert_eq!(board.rank_of("d"), None);
    }
}
