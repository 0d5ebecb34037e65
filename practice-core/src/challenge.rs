//! Daily challenge pool and selection.
//!
//! Selection is a pure function of the calendar day: the day-of-year
//! indexes into a fixed template pool, so the same day always yields the
//! same challenge no matter how often it is recomputed.

use chrono::{Datelike, NaiveDate};

use crate::progress::{ChallengeTarget, DailyChallenge};

struct ChallengeTemplate {
    title: &'static str,
    description: &'static str,
    target: fn() -> ChallengeTarget,
}

/// Fixed rotation of challenge content. Order matters: it fixes which
/// challenge lands on which day of the year.
const POOL: [ChallengeTemplate; 7] = [
    ChallengeTemplate {
        title: "Warm-up Session",
        description: "Log at least 15 minutes of practice today",
        target: || ChallengeTarget::PracticeMinutes(15),
    },
    ChallengeTemplate {
        title: "Pentatonic Day",
        description: "Run the minor pentatonic scale in every position",
        target: || ChallengeTarget::Scale("pentatonic-minor".to_string()),
    },
    ChallengeTemplate {
        title: "Smooth Operator",
        description: "Practice your legato phrasing",
        target: || ChallengeTarget::Technique("legato".to_string()),
    },
    ChallengeTemplate {
        title: "Deep Focus",
        description: "Log at least 30 minutes of practice today",
        target: || ChallengeTarget::PracticeMinutes(30),
    },
    ChallengeTemplate {
        title: "Mode Explorer",
        description: "Work through the dorian mode in two keys",
        target: || ChallengeTarget::Scale("dorian".to_string()),
    },
    ChallengeTemplate {
        title: "Pick Precision",
        description: "Drill alternate picking with a metronome",
        target: || ChallengeTarget::Technique("alternate-picking".to_string()),
    },
    ChallengeTemplate {
        title: "Feeling Blue",
        description: "Improvise over the blues scale",
        target: || ChallengeTarget::Scale("blues".to_string()),
    },
];

/// Builds the challenge for a calendar day, always uncompleted.
pub fn challenge_for(date: NaiveDate) -> DailyChallenge {
    let template = &POOL[date.ordinal0() as usize % POOL.len()];
    DailyChallenge {
        date,
        title: template.title.to_string(),
        description: template.description.to_string(),
        target: (template.target)(),
        completed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_same_challenge() {
        let a = challenge_for(day(2026, 3, 14));
        let b = challenge_for(day(2026, 3, 14));
        assert_eq!(a.title, b.title);
        assert_eq!(a.target, b.target);
        assert!(!a.completed);
    }

    #[test]
    fn test_consecutive_days_rotate() {
        let a = challenge_for(day(2026, 3, 14));
        let b = challenge_for(day(2026, 3, 15));
        assert_ne!(a.title, b.title);
    }

    #[test]
    fn test_full_rotation_wraps() {
        let a = challenge_for(day(2026, 3, 14));
        let b = challenge_for(day(2026, 3, 21));
        assert_eq!(a.title, b.title);
    }

    #[test]
    fn test_pool_references_real_catalog_ids() {
        for offset in 0..POOL.len() as u64 {
            let date = day(2026, 1, 1) + chrono::Days::new(offset);
            match challenge_for(date).target {
                ChallengeTarget::Scale(id) => {
                    assert!(catalog::scale_by_id(&id).is_ok());
                }
                ChallengeTarget::Technique(id) => {
                    assert!(catalog::technique_by_id(&id).is_ok());
                }
                ChallengeTarget::PracticeMinutes(minutes) => assert!(minutes > 0),
            }
        }
    }
}
