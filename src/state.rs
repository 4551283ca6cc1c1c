//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Competition, RankingSnapshot},
    services::{
        IntervalBreaker, LogNotifier, RankNotifier, RankingBoard, SnapshotStore, TeamDirectory,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Questions and their time gates
    competition: Competition,

    /// Leaderboard, guarded by its own lock
    ranking: RankingBoard,

    /// Submission throttle, guarded by its own lock
    breaker: IntervalBreaker,

    /// Address to team table
    teams: Arc<TeamDirectory>,

    /// Receiver of rank improvements
    notifier: Arc<dyn RankNotifier>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        competition: Competition,
        ranking: RankingBoard,
        breaker: IntervalBreaker,
        teams: Arc<TeamDirectory>,
        notifier: Arc<dyn RankNotifier>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                competition,
                ranking,
                breaker,
                teams,
                notifier,
                config,
            }),
        }
    }

    /// Wire up every resource described by the configuration.
    ///
    /// A `restored` snapshot replaces the empty board. It keeps its own start
    /// time and question count; when those disagree with the game file a
    /// warning is logged and submissions to questions the snapshot lacks are
    /// rejected as invalid.
    pub fn from_config(
        config: Config,
        store: Arc<dyn SnapshotStore>,
        restored: Option<RankingSnapshot>,
    ) -> AppResult<Self> {
        let competition = Competition::from_config(&config.game)?;
        let teams = Arc::new(TeamDirectory::new(config.game.teams.clone()));
        let interval = config
            .game
            .submit_interval()
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        let ranking = match restored {
            Some(snapshot) => {
                if snapshot.question_count != competition.question_count()
                    || snapshot.start != competition.start()
                {
                    tracing::warn!(
                        snapshot_questions = snapshot.question_count,
                        game_questions = competition.question_count(),
                        snapshot_start = %snapshot.start,
                        game_start = %competition.start(),
                        "Restored ranking does not match the game file"
                    );
                }
                RankingBoard::restore(snapshot, teams.clone(), store)
            }
            None => RankingBoard::new(
                competition.start(),
                competition.question_count(),
                teams.clone(),
                store,
            ),
        };

        Ok(Self::new(
            competition,
            ranking,
            IntervalBreaker::new(interval),
            teams,
            Arc::new(LogNotifier),
            config,
        ))
    }

    pub fn competition(&self) -> &Competition {
        &self.inner.competition
    }

    pub fn ranking(&self) -> &RankingBoard {
        &self.inner.ranking
    }

    pub fn breaker(&self) -> &IntervalBreaker {
        &self.inner.breaker
    }

    pub fn teams(&self) -> &TeamDirectory {
        &self.inner.teams
    }

    pub fn notifier(&self) -> &dyn RankNotifier {
        self.inner.notifier.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
