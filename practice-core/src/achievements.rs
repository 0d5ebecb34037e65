//! Achievement rule table.
//!
//! Rules are data: an ordered list of (id, content, predicate). The engine
//! re-scans the table after every mutation and appends an unlock for each
//! rule that now holds and has not been unlocked before. Table order fixes
//! the append order when several rules unlock in the same transition.

use crate::catalog;
use crate::progress::Progress;

pub struct AchievementRule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub predicate: fn(&Progress) -> bool,
}

/// The fixed rule set, evaluated top to bottom.
pub const RULES: [AchievementRule; 13] = [
    AchievementRule {
        id: "first-session",
        title: "First Steps",
        description: "Log your first practice session",
        predicate: |p| p.total_practice_time > 0,
    },
    AchievementRule {
        id: "streak-3",
        title: "Warming Up",
        description: "Practice 3 days in a row",
        predicate: |p| p.practice_streak >= 3,
    },
    AchievementRule {
        id: "streak-7",
        title: "One Week Strong",
        description: "Practice 7 days in a row",
        predicate: |p| p.practice_streak >= 7,
    },
    AchievementRule {
        id: "streak-30",
        title: "Iron Discipline",
        description: "Practice 30 days in a row",
        predicate: |p| p.practice_streak >= 30,
    },
    AchievementRule {
        id: "first-scale",
        title: "Scale Explorer",
        description: "Complete your first scale",
        predicate: |p| !p.completed_scales.is_empty(),
    },
    AchievementRule {
        id: "scales-5",
        title: "Scale Collector",
        description: "Complete 5 scales",
        predicate: |p| p.completed_scales.len() >= 5,
    },
    AchievementRule {
        id: "scales-all",
        title: "Scale Master",
        description: "Complete every scale in the library",
        predicate: |p| p.completed_scales.len() >= catalog::scales().len(),
    },
    AchievementRule {
        id: "first-technique",
        title: "Technician",
        description: "Complete your first technique",
        predicate: |p| !p.completed_techniques.is_empty(),
    },
    AchievementRule {
        id: "techniques-all",
        title: "Complete Toolkit",
        description: "Complete every technique in the library",
        predicate: |p| p.completed_techniques.len() >= catalog::techniques().len(),
    },
    AchievementRule {
        id: "hour-1",
        title: "Hour of Power",
        description: "Log one hour of total practice",
        predicate: |p| p.total_practice_time >= 60,
    },
    AchievementRule {
        id: "hours-10",
        title: "Ten Hours In",
        description: "Log ten hours of total practice",
        predicate: |p| p.total_practice_time >= 600,
    },
    AchievementRule {
        id: "level-5",
        title: "Rising Star",
        description: "Reach level 5",
        predicate: |p| p.level >= 5,
    },
    AchievementRule {
        id: "level-10",
        title: "Guitar Hero",
        description: "Reach level 10",
        predicate: |p| p.level >= 10,
    },
];

/// Rules that hold for `progress` but are not yet unlocked, in table order.
pub fn newly_satisfied(progress: &Progress) -> Vec<&'static AchievementRule> {
    RULES
        .iter()
        .filter(|rule| !progress.has_achievement(rule.id) && (rule.predicate)(progress))
        .collect()
}
