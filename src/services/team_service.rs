//! Team resolution service

use crate::{config::TeamConfig, constants::UNKNOWN_TEAM};

/// Static table mapping source address prefixes to team names
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: Vec<TeamConfig>,
}

impl TeamDirectory {
    pub fn new(mut teams: Vec<TeamConfig>) -> Self {
        // Longest prefix first, so "192.168.10." wins over "192.168.1."
        teams.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { teams }
    }

    /// Team name for a source address, or the unknown-team label
    pub fn resolve(&self, address: &str) -> String {
        self.teams
            .iter()
            .find(|team| address.starts_with(&team.prefix))
            .map_or_else(|| UNKNOWN_TEAM.to_string(), |team| team.name.clone())
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
