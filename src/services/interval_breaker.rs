//! Per-team submission throttle

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Enforces a minimum interval between two submissions of the same team.
///
/// The last-seen time is refreshed on every check, denied ones included, so a
/// team retrying too early pushes its next allowed submission further out.
#[derive(Debug)]
pub struct IntervalBreaker {
    min_interval: Duration,
    last_seen: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl IntervalBreaker {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Check and record a submission happening now
    pub fn check(&self, team: &str) -> bool {
        self.check_at(team, Utc::now())
    }

    pub fn check_at(&self, team: &str, now: DateTime<Utc>) -> bool {
        let previous = self.last_seen.lock().insert(team.to_string(), now);
        match previous {
            Some(last) => now - last >= self.min_interval,
            None => true,
        }
    }

    /// Last recorded submission time of a team
    pub fn last_seen(&self, team: &str) -> Option<DateTime<Utc>> {
        self.last_seen.lock().get(team).copied()
    }
}
