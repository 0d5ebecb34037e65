use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A permanent, timestamped unlock record. Created exactly once when its
/// rule first becomes true; never mutated or removed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

/// What a daily challenge asks the learner to do. Informational for the
/// host; completion is an explicit user action, not inferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ChallengeTarget {
    /// Log at least this many minutes of practice.
    PracticeMinutes(u32),
    /// Work through a specific scale.
    Scale(String),
    /// Work through a specific technique.
    Technique(String),
}

/// The challenge scoped to a single calendar day. Replaced, not archived,
/// when the day changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub target: ChallengeTarget,
    pub completed: bool,
}

/// The learner's whole practice history, one instance per learner.
///
/// Persisted as a single JSON document; `BTreeSet` keeps the completed-id
/// sets in a stable order on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    pub xp: u32,
    pub level: u32,
    pub practice_streak: u32,
    pub last_practice_date: Option<NaiveDate>,
    /// Total logged practice time in minutes.
    pub total_practice_time: u32,
    pub completed_scales: BTreeSet<String>,
    pub completed_techniques: BTreeSet<String>,
    /// Append-only, ordered by unlock time.
    pub achievements: Vec<Achievement>,
    pub daily_challenge: Option<DailyChallenge>,
}

/// Level derivation: 100 XP per level, starting at level 1.
pub fn level_for_xp(xp: u32) -> u32 {
    1 + xp / 100
}

impl Progress {
    /// Fresh first-launch state, all counters zeroed.
    pub fn new() -> Self {
        Self {
            level: level_for_xp(0),
            ..Self::default()
        }
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(250), 3);
        assert_eq!(level_for_xp(1000), 11);
    }

    #[test]
    fn test_new_progress_is_zeroed() {
        let p = Progress::new();
        assert_eq!(p.xp, 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.practice_streak, 0);
        assert_eq!(p.total_practice_time, 0);
        assert!(p.last_practice_date.is_none());
        assert!(p.completed_scales.is_empty());
        assert!(p.completed_techniques.is_empty());
        assert!(p.achievements.is_empty());
        assert!(p.daily_challenge.is_none());
    }
}
