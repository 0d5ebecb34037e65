//! # Progression Engine Module
//!
//! The state machine over the learner's [`Progress`] aggregate. Every
//! operation is a single read-modify-persist transition driven by a
//! discrete event from the host (session logged, scale completed, ...).
//!
//! Failure semantics are deliberately asymmetric: logical errors
//! (`InvalidInput` / `NotFound` / `InvalidState`) are rejected before the
//! aggregate is touched, while a persistence failure is reported in the
//! returned [`Updated`] *after* the in-memory mutation has been applied.
//! User-visible progress never silently vanishes because of a storage
//! hiccup, but an invalid operation never corrupts the aggregate.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::achievements;
use crate::catalog;
use crate::challenge;
use crate::clock::Clock;
use crate::error::{PracticeError, Result};
use crate::progress::{Achievement, Progress, level_for_xp};
use crate::store::ProgressStore;

/// XP bonus for completing a scale for the first time.
pub const SCALE_XP: u32 = 50;
/// XP bonus for completing a technique for the first time.
pub const TECHNIQUE_XP: u32 = 50;
/// XP bonus for completing the daily challenge.
pub const CHALLENGE_XP: u32 = 100;

/// The outcome of a state-changing operation: the snapshot after the
/// mutation, plus a warning when the save did not reach the store.
#[derive(Debug, Clone)]
pub struct Updated {
    pub progress: Progress,
    /// Set when the in-memory update succeeded but writing it to the
    /// store did not. Recoverable; the snapshot is still authoritative.
    pub save_error: Option<String>,
}

/// Owns the progress aggregate and serializes all mutations through
/// `&mut self`. Single-writer: the host's event loop is the only caller.
pub struct PracticeEngine<S, C> {
    store: S,
    clock: C,
    progress: Progress,
}

impl<S: ProgressStore, C: Clock> PracticeEngine<S, C> {
    /// Loads the aggregate from the store, falling back to first-launch
    /// defaults when nothing has been persisted yet.
    pub fn new(store: S, clock: C) -> Result<Self> {
        let progress = match store.load()? {
            Some(progress) => progress,
            None => {
                info!("no stored progress found, starting fresh");
                Progress::new()
            }
        };
        Ok(Self {
            store,
            clock,
            progress,
        })
    }

    /// The current snapshot. Consumers read this; they never mutate it.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Adds XP and recomputes the level. No upper bound, no error
    /// conditions; the only failure mode is the durability warning.
    pub fn award_xp(&mut self, amount: u32) -> Updated {
        self.grant_xp(amount);
        debug!(amount, xp = self.progress.xp, "awarded xp");
        self.commit()
    }

    /// Logs a practice session and updates the streak.
    ///
    /// Same-day logging is idempotent for the streak but still
    /// accumulates practice time. A gap of more than one day resets the
    /// streak to 1, the logged day counting as day one.
    pub fn record_practice_session(
        &mut self,
        duration_minutes: u32,
        date: NaiveDate,
    ) -> Result<Updated> {
        if duration_minutes == 0 {
            return Err(PracticeError::InvalidInput(
                "practice duration must be positive".to_string(),
            ));
        }
        if let Some(last) = self.progress.last_practice_date {
            if date < last {
                return Err(PracticeError::InvalidInput(format!(
                    "session date {date} precedes last practice date {last}"
                )));
            }
        }

        self.progress.total_practice_time += duration_minutes;
        match self.progress.last_practice_date {
            // Same-day logging: streak unchanged
            Some(last) if last == date => {}
            // Consecutive day: streak extends
            Some(last) if last.succ_opt() == Some(date) => {
                self.progress.practice_streak += 1;
            }
            // First session ever, or a gap: this day counts as day 1
            _ => self.progress.practice_streak = 1,
        }
        self.progress.last_practice_date = Some(date);

        debug!(
            duration_minutes,
            %date,
            streak = self.progress.practice_streak,
            "recorded practice session"
        );
        Ok(self.commit())
    }

    /// Marks a scale completed. Idempotent: a repeat completion changes
    /// nothing and awards no duplicate XP.
    pub fn complete_scale(&mut self, scale_id: &str) -> Result<Updated> {
        let scale = catalog::scale_by_id(scale_id)?;
        if self.progress.completed_scales.contains(&scale.id) {
            return Ok(self.unchanged());
        }
        self.progress.completed_scales.insert(scale.id.clone());
        self.grant_xp(SCALE_XP);
        debug!(scale = %scale.id, "completed scale");
        Ok(self.commit())
    }

    /// Marks a technique completed. Same contract as [`complete_scale`].
    ///
    /// [`complete_scale`]: Self::complete_scale
    pub fn complete_technique(&mut self, technique_id: &str) -> Result<Updated> {
        let technique = catalog::technique_by_id(technique_id)?;
        if self.progress.completed_techniques.contains(&technique.id) {
            return Ok(self.unchanged());
        }
        self.progress
            .completed_techniques
            .insert(technique.id.clone());
        self.grant_xp(TECHNIQUE_XP);
        debug!(technique = %technique.id, "completed technique");
        Ok(self.commit())
    }

    /// Rolls the daily challenge over to `today` if the stored one is
    /// missing or belongs to another day. Challenges are daily, not
    /// historical: a prior day's completion state is discarded.
    pub fn check_daily_challenge(&mut self, today: NaiveDate) -> Updated {
        if let Some(current) = &self.progress.daily_challenge {
            if current.date == today {
                return self.unchanged();
            }
        }
        let next = challenge::challenge_for(today);
        debug!(%today, title = %next.title, "rotated daily challenge");
        self.progress.daily_challenge = Some(next);
        self.commit()
    }

    /// Completes the current daily challenge and awards its XP bonus.
    pub fn complete_daily_challenge(&mut self) -> Result<Updated> {
        match &mut self.progress.daily_challenge {
            None => Err(PracticeError::InvalidState(
                "no active daily challenge".to_string(),
            )),
            Some(current) if current.completed => Err(PracticeError::InvalidState(
                "daily challenge already completed".to_string(),
            )),
            Some(current) => {
                current.completed = true;
                self.grant_xp(CHALLENGE_XP);
                debug!("completed daily challenge");
                Ok(self.commit())
            }
        }
    }

    fn grant_xp(&mut self, amount: u32) {
        self.progress.xp += amount;
        self.progress.level = level_for_xp(self.progress.xp);
    }

    /// Appends an unlock record for every rule that newly holds. Runs as
    /// part of every committed transition, in stable rule-table order.
    fn unlock_new_achievements(&mut self) {
        let now = self.clock.now();
        for rule in achievements::newly_satisfied(&self.progress) {
            info!(achievement = rule.id, "achievement unlocked");
            self.progress.achievements.push(Achievement {
                id: rule.id.to_string(),
                title: rule.title.to_string(),
                description: rule.description.to_string(),
                unlocked_at: now,
            });
        }
    }

    /// Finishes a transition: evaluate achievements, persist, snapshot.
    /// A failed save is surfaced as a warning, never rolled back.
    fn commit(&mut self) -> Updated {
        self.unlock_new_achievements();
        let save_error = match self.store.save(&self.progress) {
            Ok(()) => None,
            Err(e) => {
                warn!("failed to persist progress: {e}");
                Some(e.to_string())
            }
        };
        Updated {
            progress: self.progress.clone(),
            save_error,
        }
    }

    /// Snapshot for no-op paths; nothing changed, so nothing is saved.
    fn unchanged(&self) -> Updated {
        Updated {
            progress: self.progress.clone(),
            save_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::store::{MemoryStore, ProgressStore};
    use chrono::{DateTime, TimeZone, Utc};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Store whose saves always fail, for the fail-open durability path.
    struct FailingStore;

    impl ProgressStore for FailingStore {
        fn load(&self) -> crate::error::Result<Option<Progress>> {
            Ok(None)
        }

        fn save(&self, _progress: &Progress) -> crate::error::Result<()> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn engine() -> PracticeEngine<MemoryStore, FixedClock> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap());
        PracticeEngine::new(MemoryStore::new(), clock).unwrap()
    }

    #[test]
    fn test_award_xp_recomputes_level() {
        let mut engine = engine();
        let updated = engine.award_xp(250);
        assert_eq!(updated.progress.xp, 250);
        assert_eq!(updated.progress.level, 3);
        assert!(updated.save_error.is_none());
    }

    #[test]
    fn test_streak_extends_on_consecutive_days() {
        let mut engine = engine();
        engine.record_practice_session(20, day(1)).unwrap();
        engine.record_practice_session(20, day(2)).unwrap();
        let updated = engine.record_practice_session(20, day(3)).unwrap();
        assert_eq!(updated.progress.practice_streak, 3);

        // A two-day gap resets the streak, the new day counting as day 1
        let updated = engine.record_practice_session(20, day(6)).unwrap();
        assert_eq!(updated.progress.practice_streak, 1);
        assert_eq!(updated.progress.total_practice_time, 80);
    }

    #[test]
    fn test_same_day_logging_keeps_streak_but_adds_time() {
        let mut engine = engine();
        engine.record_practice_session(15, day(1)).unwrap();
        let updated = engine.record_practice_session(25, day(1)).unwrap();
        assert_eq!(updated.progress.practice_streak, 1);
        assert_eq!(updated.progress.total_practice_time, 40);
    }

    #[test]
    fn test_invalid_sessions_rejected_without_mutation() {
        let mut engine = engine();
        engine.record_practice_session(30, day(5)).unwrap();

        assert!(engine.record_practice_session(0, day(6)).is_err());
        assert!(engine.record_practice_session(30, day(4)).is_err());

        let p = engine.progress();
        assert_eq!(p.total_practice_time, 30);
        assert_eq!(p.last_practice_date, Some(day(5)));
    }

    #[test]
    fn test_complete_scale_is_idempotent() {
        let mut engine = engine();
        let first = engine.complete_scale("pentatonic-minor").unwrap();
        let xp_after_first = first.progress.xp;
        assert_eq!(xp_after_first, SCALE_XP);

        let second = engine.complete_scale("pentatonic-minor").unwrap();
        assert_eq!(second.progress.xp, xp_after_first);
        assert_eq!(second.progress.completed_scales.len(), 1);
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let mut engine = engine();
        assert!(matches!(
            engine.complete_scale("chromatic"),
            Err(PracticeError::NotFound(_))
        ));
        assert!(matches!(
            engine.complete_technique("sweep-picking"),
            Err(PracticeError::NotFound(_))
        ));
        assert_eq!(engine.progress().xp, 0);
    }

    #[test]
    fn test_fresh_session_and_scale_scenario() {
        let mut engine = engine();
        engine.record_practice_session(30, day(1)).unwrap();
        let updated = engine.complete_scale("pentatonic-minor").unwrap();

        let p = &updated.progress;
        assert_eq!(p.total_practice_time, 30);
        assert_eq!(p.practice_streak, 1);
        assert!(p.completed_scales.contains("pentatonic-minor"));
        assert_eq!(p.xp, SCALE_XP);
    }

    #[test]
    fn test_check_daily_challenge_rolls_over_by_day() {
        let mut engine = engine();
        let first = engine.check_daily_challenge(day(1));
        let challenge = first.progress.daily_challenge.clone().unwrap();
        assert_eq!(challenge.date, day(1));
        assert!(!challenge.completed);

        // Same day again: a no-op, same challenge, completed untouched
        engine.complete_daily_challenge().unwrap();
        let again = engine.check_daily_challenge(day(1));
        let same = again.progress.daily_challenge.unwrap();
        assert_eq!(same.title, challenge.title);
        assert!(same.completed);

        // Next day: replaced, completion state discarded
        let next = engine.check_daily_challenge(day(2));
        let rolled = next.progress.daily_challenge.unwrap();
        assert_eq!(rolled.date, day(2));
        assert!(!rolled.completed);
    }

    #[test]
    fn test_complete_daily_challenge_awards_fixed_bonus() {
        let mut engine = engine();
        engine.check_daily_challenge(day(1));
        let updated = engine.complete_daily_challenge().unwrap();
        assert_eq!(updated.progress.xp, CHALLENGE_XP);
        assert!(updated.progress.daily_challenge.unwrap().completed);

        // Completing twice is an InvalidState, xp untouched
        assert!(matches!(
            engine.complete_daily_challenge(),
            Err(PracticeError::InvalidState(_))
        ));
        assert_eq!(engine.progress().xp, CHALLENGE_XP);
    }

    #[test]
    fn test_complete_daily_challenge_without_one_fails() {
        let mut engine = engine();
        assert!(matches!(
            engine.complete_daily_challenge(),
            Err(PracticeError::InvalidState(_))
        ));
        assert_eq!(engine.progress().xp, 0);
    }

    #[test]
    fn test_achievements_unlock_once_and_append_only() {
        let mut engine = engine();
        engine.record_practice_session(30, day(1)).unwrap();
        let after_first = engine.progress().achievements.clone();
        assert!(after_first.iter().any(|a| a.id == "first-session"));

        // More sessions never duplicate or remove earlier unlocks
        engine.record_practice_session(30, day(2)).unwrap();
        engine.record_practice_session(30, day(3)).unwrap();
        let achievements = &engine.progress().achievements;
        assert_eq!(
            achievements
                .iter()
                .filter(|a| a.id == "first-session")
                .count(),
            1
        );
        assert!(achievements.iter().any(|a| a.id == "streak-3"));
        for earlier in &after_first {
            assert!(achievements.iter().any(|a| a.id == earlier.id));
        }
    }

    #[test]
    fn test_two_rules_unlock_in_table_order() {
        let mut engine = engine();
        // 60 minutes in one sitting satisfies first-session and hour-1
        let updated = engine.record_practice_session(60, day(1)).unwrap();
        let ids: Vec<_> = updated
            .progress
            .achievements
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first-session", "hour-1"]);
    }

    #[test]
    fn test_save_failure_is_fail_open() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap());
        let mut engine = PracticeEngine::new(FailingStore, clock).unwrap();

        let updated = engine.complete_scale("blues").unwrap();
        assert!(updated.save_error.is_some());
        // The in-memory mutation sticks even though durability failed
        assert!(updated.progress.completed_scales.contains("blues"));
        assert_eq!(engine.progress().xp, SCALE_XP);
    }

    #[test]
    fn test_engine_reloads_persisted_state() {
        let store = MemoryStore::new();
        let clock = || FixedClock(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap());

        let mut engine = PracticeEngine::new(&store, clock()).unwrap();
        engine.record_practice_session(45, day(1)).unwrap();
        engine.complete_technique("slide").unwrap();

        let reloaded = PracticeEngine::new(&store, clock()).unwrap();
        let p = reloaded.progress();
        assert_eq!(p.total_practice_time, 45);
        assert!(p.completed_techniques.contains("slide"));
        assert_eq!(p.xp, TECHNIQUE_XP);
    }
}
