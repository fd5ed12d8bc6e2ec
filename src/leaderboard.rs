use serde::{Deserialize, Serialize};

use crate::game::ElapsedTime;

/// Maximum number of entries kept on the board.
pub const CAPACITY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    #[serde(alias = "userName")]
    pub display_name: String,
    #[serde(alias = "time_total")]
    pub total_seconds: u64,
    #[serde(alias = "time_mins")]
    pub minutes_part: String,
    #[serde(alias = "time_secs")]
    pub seconds_part: String,
}

impl ScoreEntry {
    pub fn new(display_name: impl Into<String>, elapsed: &ElapsedTime) -> Self {
        Self {
            display_name: display_name.into(),
            total_seconds: elapsed.total_seconds,
            minutes_part: elapsed.minutes_part.clone(),
            seconds_part: elapsed.seconds_part.clone(),
        }
    }

    pub fn time_display(&self) -> String {
        format!("{} : {}", self.minutes_part, self.seconds_part)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub updated: Leaderboard,
    pub is_new_high_score: bool,
}

/// Best results, fastest first, never more than [`CAPACITY`] long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ScoreEntry>", into = "Vec<ScoreEntry>")]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl From<Vec<ScoreEntry>> for Leaderboard {
    /// Sorts (stable) and truncates, so data from a store that broke the
    /// ordering still yields a valid board.
    fn from(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by_key(|e| e.total_seconds);
        entries.truncate(CAPACITY);
        Self { entries }
    }
}

impl From<Leaderboard> for Vec<ScoreEntry> {
    fn from(board: Leaderboard) -> Self {
        board.entries
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A time makes the board while there is room, or when it is no slower
    /// than the current last place.
    pub fn qualifies(&self, total_seconds: u64) -> bool {
        match self.entries.last() {
            Some(last) if self.entries.len() >= CAPACITY => total_seconds <= last.total_seconds,
            _ => true,
        }
    }

    /// Insert `candidate` after every entry that is not strictly slower,
    /// then drop whatever falls past [`CAPACITY`].
    pub fn merge(&self, candidate: ScoreEntry) -> MergeOutcome {
        let is_new_high_score = self.qualifies(candidate.total_seconds);

        let pos = self
            .entries
            .iter()
            .position(|e| candidate.total_seconds < e.total_seconds)
            .unwrap_or(self.entries.len());

        let mut entries = self.entries.clone();
        entries.insert(pos, candidate);
        entries.truncate(CAPACITY);

        MergeOutcome {
            updated: Leaderboard { entries },
            is_new_high_score,
        }
    }
}
