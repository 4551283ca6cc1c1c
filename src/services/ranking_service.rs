//! Ranking board service
//!
//! The board keeps each team's best score per question and the resulting
//! totals. Every append runs inside one critical section: the rank before,
//! the score update, the snapshot and the rank after are all taken under the
//! same lock, so concurrent submissions from different teams cannot observe
//! or produce a half-updated board.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::{
    constants::FIRST_PLACE,
    error::{AppError, AppResult},
    models::{RankChange, RankingEntry, RankingSnapshot},
};

use super::{SnapshotStore, TeamDirectory};

/// Shared leaderboard
pub struct RankingBoard {
    state: Mutex<RankingSnapshot>,
    teams: Arc<TeamDirectory>,
    store: Arc<dyn SnapshotStore>,
}

impl RankingBoard {
    /// Empty board for a competition with `question_count` questions
    pub fn new(
        start: DateTime<Utc>,
        question_count: usize,
        teams: Arc<TeamDirectory>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self::restore(RankingSnapshot::new(start, question_count), teams, store)
    }

    /// Board rebuilt from a saved snapshot, taken as-is
    pub fn restore(
        snapshot: RankingSnapshot,
        teams: Arc<TeamDirectory>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            state: Mutex::new(snapshot),
            teams,
            store,
        }
    }

    /// Record `score` for the team behind `address` on the 0-based question.
    ///
    /// Only a strictly better score replaces the stored best. A team's first
    /// append always creates its entry.
    pub fn append(&self, address: &str, index: usize, score: usize) -> AppResult<RankChange> {
        let name = self.teams.resolve(address);
        let invalid = || AppError::InvalidQuestion {
            number: index.saturating_add(1),
        };

        let mut state = self.state.lock();
        let question_count = state.question_count;
        let old_rank = state.rank_of(&name);

        let changed = match state.teams.get_mut(&name) {
            Some(entry) => entry.raise(index, score).ok_or_else(invalid)?,
            None => {
                if index >= question_count {
                    return Err(invalid());
                }
                let mut entry = RankingEntry::new(address, name.clone(), question_count);
                entry.scores[index] = score;
                entry.total = score;
                state.teams.insert(name.clone(), entry);
                true
            }
        };

        if !changed {
            return Ok(RankChange::default());
        }

        if let Err(e) = self.store.save(state.clone()) {
            tracing::error!(error = %e, team = %name, "Failed to save ranking snapshot");
        }

        let new_rank = state.rank_of(&name);
        let rank_improved = match (old_rank, new_rank) {
            (Some(old), Some(new)) => new < old,
            (None, Some(_)) => true,
            (_, None) => false,
        };
        let change = RankChange {
            rank_improved,
            became_first: rank_improved && new_rank == Some(FIRST_PLACE),
        };

        tracing::debug!(
            team = %name,
            question = index + 1,
            score,
            old_rank = ?old_rank,
            new_rank = ?new_rank,
            "Ranking updated"
        );

        Ok(change)
    }

    /// All entries, best total first
    pub fn standings(&self) -> Vec<RankingEntry> {
        self.state.lock().ordered().into_iter().cloned().collect()
    }

    /// 0-based rank of a team, `None` while it has no entry
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.state.lock().rank_of(name)
    }

    /// The team currently in first place
    pub fn leader(&self) -> Option<RankingEntry> {
        self.state.lock().ordered().first().map(|entry| (*entry).clone())
    }

    pub fn get(&self, name: &str) -> Option<RankingEntry> {
        self.state.lock().teams.get(name).cloned()
    }

    pub fn snapshot(&self) -> RankingSnapshot {
        self.state.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().teams.is_empty()
    }
}
