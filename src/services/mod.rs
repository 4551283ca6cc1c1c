//! Business logic services

pub mod interval_breaker;
pub mod notifier;
pub mod ranking_service;
pub mod snapshot_service;
pub mod team_service;

pub use interval_breaker::IntervalBreaker;
pub use notifier::{LogNotifier, RankNotifier};
pub use ranking_service::RankingBoard;
pub use snapshot_service::{BackgroundSnapshotter, JsonFileStore, SnapshotStore};
pub use team_service::TeamDirectory;
