use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single running aggregate over all recorded quiz results.
///
/// There is exactly one `UserStats` per user; the store owns the persisted
/// copy and `stats::record_result` is its sole mutator. Counters only ever
/// grow. `last_activity_date` starts at the Unix epoch, which the streak rule
/// treats as "far in the past" so the first recorded result starts a streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_quizzes_taken: u32,
    pub total_questions_answered: u32,
    pub total_correct_answers: u32,
    pub streak_days: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_activity_date: DateTime<Utc>,
    /// Topic → exponentially-smoothed percentage in `[0, 100]`.
    pub topic_mastery: BTreeMap<String, u8>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_quizzes_taken: 0,
            total_questions_answered: 0,
            total_correct_answers: 0,
            streak_days: 0,
            last_activity_date: DateTime::UNIX_EPOCH,
            topic_mastery: BTreeMap::new(),
        }
    }
}

impl UserStats {
    /// Mastery percentage for a topic, 0 for topics never seen.
    #[must_use]
    pub fn mastery_for(&self, topic: &str) -> u8 {
        self.topic_mastery.get(topic).copied().unwrap_or(0)
    }

    /// Overall fraction of questions answered correctly, in `[0, 1]`.
    #[must_use]
    pub fn overall_accuracy(&self) -> f64 {
        if self.total_questions_answered == 0 {
            return 0.0;
        }
        f64::from(self.total_correct_answers) / f64::from(self.total_questions_answered)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
