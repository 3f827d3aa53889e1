use serde::{Deserialize, Serialize};

/// Number of rows the table keeps.
pub const MAX_ENTRIES: usize = 5;
/// Longest stored player name.
pub const MAX_NAME_LEN: usize = 3;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// Top-five score table. The host owns the record file; this type owns the
/// rules: qualification, three-character uppercased names, descending order,
/// truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` earns a spot: room left, or strictly better than the
    /// current last place.
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < MAX_ENTRIES
            || self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Insert a row, normalizing the name and re-sorting. Returns whether
    /// the row made the table.
    pub fn submit(&mut self, name: &str, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        let name: String = name.trim().to_uppercase().chars().take(MAX_NAME_LEN).collect();
        self.entries.push(LeaderboardEntry { name, score });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
        true
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Encode as the JSON record list the host persists.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decode a persisted record list. Malformed input degrades to an empty
    /// table rather than blocking the game.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<LeaderboardEntry>>(json) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.score.cmp(&a.score));
                entries.truncate(MAX_ENTRIES);
                Self { entries }
            }
            Err(error) => {
                tracing::warn!(error = %error, "discarding unreadable leaderboard records");
                Self::default()
            }
        }
    }
}
