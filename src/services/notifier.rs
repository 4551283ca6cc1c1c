//! Rank change notification

/// Receives rank improvements reported by the ranking board
#[cfg_attr(test, mockall::automock)]
pub trait RankNotifier: Send + Sync {
    fn rank_up(&self, name: &str, address: &str, became_first: bool);
}

/// Notifier that records rank changes in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl RankNotifier for LogNotifier {
    fn rank_up(&self, name: &str, address: &str, became_first: bool) {
        if became_first {
            tracing::info!(team = %name, address = %address, "Team took first place");
        } else {
            tracing::info!(team = %name, address = %address, "Team moved up the ranking");
        }
    }
}
