//! Answer handler implementations

use std::net::SocketAddr;

use axum::{
    Json,
    body::Bytes,
    extract::{ConnectInfo, Path, State, rejection::BytesRejection},
};

use crate::{
    constants::SUBMISSION_ROW_SEPARATOR,
    error::{AppError, AppResult},
    models::BitmapGrid,
    state::AppState,
};

use super::{request::AnswerPath, response::AnswerResponse};

/// Score a candidate image and update the ranking
pub async fn submit_answer(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(path): Path<AnswerPath>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<AnswerResponse>> {
    let body = body?;
    let text = std::str::from_utf8(&body)
        .map_err(|_| AppError::InvalidInput("submission is not valid UTF-8".to_string()))?;
    let grid = BitmapGrid::parse(text, SUBMISSION_ROW_SEPARATOR)?;
    let index = path.index()?;

    let attempt = state.competition().attempt(&grid, index)?;

    let address = addr.ip().to_string();
    let change = state.ranking().append(&address, index, attempt.score)?;
    if change.rank_improved {
        let team = state.teams().resolve(&address);
        state
            .notifier()
            .rank_up(&team, &address, change.became_first);
    }

    tracing::debug!(
        address = %address,
        question = index + 1,
        score = attempt.score,
        wrong = attempt.wrong,
        flag = attempt.flag.is_some(),
        "Answer scored"
    );

    Ok(Json(attempt.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use mockall::predicate::{always, eq};

    use crate::{
        config::{Config, GameConfig, RankingConfig, ServerConfig},
        error::PersistenceError,
        models::{Competition, RankingSnapshot},
        services::{
            IntervalBreaker, RankingBoard, SnapshotStore, TeamDirectory,
            notifier::MockRankNotifier,
        },
    };

    struct NullStore;

    impl SnapshotStore for NullStore {
        fn save(&self, _snapshot: RankingSnapshot) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    fn state(notifier: MockRankNotifier) -> AppState {
        let start = (Utc::now() - Duration::minutes(5)).to_rfc3339();
        let game: GameConfig = format!(
            r#"
            [game]
            start = "{start}"
            interval = 0.0

            [[questions]]
            map = "0 1"
            flag = "FLAG{{one}}"

            [[teams]]
            prefix = "10.0.1."
            name = "alpha"

            [[teams]]
            prefix = "10.0.2."
            name = "beta"
            "#
        )
        .parse()
        .unwrap();

        let competition = Competition::from_config(&game).unwrap();
        let teams = Arc::new(TeamDirectory::new(game.teams.clone()));
        let ranking = RankingBoard::new(
            competition.start(),
            competition.question_count(),
            teams.clone(),
            Arc::new(NullStore),
        );
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            ranking: RankingConfig {
                snapshot_path: "unused.json".into(),
                restore: false,
            },
            game,
        };

        AppState::new(
            competition,
            ranking,
            IntervalBreaker::new(Duration::zero()),
            teams,
            Arc::new(notifier),
            config,
        )
    }

    async fn submit_bytes(
        state: &AppState,
        from: [u8; 4],
        body: impl Into<Bytes>,
    ) -> AppResult<AnswerResponse> {
        let Json(response) = submit_answer(
            State(state.clone()),
            ConnectInfo(SocketAddr::from((from, 5000))),
            Path(AnswerPath {
                number: "1".to_string(),
            }),
            Ok(body.into()),
        )
        .await?;
        Ok(response)
    }

    async fn submit(state: &AppState, from: [u8; 4], grid: &str) -> AppResult<AnswerResponse> {
        submit_bytes(state, from, grid.to_string()).await
    }

    #[tokio::test]
    async fn test_notifies_only_on_rank_improvement() {
        let mut notifier = MockRankNotifier::new();
        notifier
            .expect_rank_up()
            .with(eq("alpha"), eq("10.0.1.3"), eq(true))
            .times(1)
            .return_const(());
        notifier
            .expect_rank_up()
            .with(eq("beta"), always(), eq(false))
            .times(1)
            .return_const(());
        let state = state(notifier);

        let response = submit(&state, [10, 0, 1, 3], "0\r\n1").await.unwrap();
        assert_eq!(response.score, 2);
        assert_eq!(response.flag.as_deref(), Some("FLAG{one}"));

        // same score again: no change, no notification
        submit(&state, [10, 0, 1, 3], "0\r\n1").await.unwrap();

        // a newcomer enters below the leader
        let response = submit(&state, [10, 0, 2, 8], "1\r\n0").await.unwrap();
        assert_eq!(response.score, 0);
        assert_eq!(response.wrong, 2);
        assert_eq!(response.flag, None);
    }

    #[tokio::test]
    async fn test_rejected_grid_is_not_ranked() {
        let state = state(MockRankNotifier::new());
        let err = submit(&state, [10, 0, 1, 3], "01").await.unwrap_err();
        assert!(matches!(err, AppError::SizeMismatch { .. }));
        assert!(state.ranking().is_empty());
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_invalid_input() {
        let state = state(MockRankNotifier::new());
        let err = submit_bytes(&state, [10, 0, 1, 3], vec![0x30, 0xff, 0x0d, 0x0a, 0x31])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(state.ranking().is_empty());
    }
}
