//! Folds completed quiz results into the running [`UserStats`] aggregate.
//!
//! `record_result` is the sole mutator of `UserStats`. It is a pure
//! transform: the previous stats come in by reference, the updated stats go
//! out by value, and the caller persists them. Sequencing concurrent
//! recordings (read-modify-write) is the caller's job.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{QuizResult, UserStats};

const MASTERY_CARRY_WEIGHT: f64 = 0.7;
const MASTERY_RECENCY_WEIGHT: f64 = 0.3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A result whose numeric invariants are broken.
///
/// Rejection happens before any counter moves, so the stats passed in remain
/// the authoritative state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidResultError {
    #[error("result reports zero questions")]
    ZeroQuestions,

    #[error("score {score} is out of range for {total_questions} questions")]
    ScoreOutOfRange { score: u32, total_questions: u32 },
}

//
// ─── RECORDING ─────────────────────────────────────────────────────────────────
//

/// Applies one completed result to the stats, returning the updated value.
///
/// In one atomic transform: bumps the lifetime counters, applies the
/// calendar-day streak rule against `now`, stamps `last_activity_date`, and
/// re-blends the topic's mastery as `round(current * 0.7 + pct * 0.3)`.
///
/// Calendar days are midnight-truncated on the UTC timestamps given; callers
/// wanting wall-clock-local streak boundaries convert before calling.
///
/// # Errors
///
/// Returns [`InvalidResultError`] when `total_questions` is zero (the mastery
/// percentage would be undefined) or `score > total_questions`. Nothing is
/// updated on rejection.
pub fn record_result(
    stats: &UserStats,
    result: &QuizResult,
    now: DateTime<Utc>,
) -> Result<UserStats, InvalidResultError> {
    if result.total_questions == 0 {
        return Err(InvalidResultError::ZeroQuestions);
    }
    if result.score > result.total_questions {
        return Err(InvalidResultError::ScoreOutOfRange {
            score: result.score,
            total_questions: result.total_questions,
        });
    }

    let mut updated = stats.clone();

    updated.total_quizzes_taken += 1;
    updated.total_questions_answered += result.total_questions;
    updated.total_correct_answers += result.score;

    updated.streak_days = next_streak(stats.streak_days, stats.last_activity_date, now);
    updated.last_activity_date = now;

    let mastery = blend_mastery(
        stats.mastery_for(&result.topic),
        result.score,
        result.total_questions,
    );
    updated.topic_mastery.insert(result.topic.clone(), mastery);

    Ok(updated)
}

/// Streak rule on midnight-truncated calendar days:
/// consecutive day extends, a gap restarts at 1, the first-ever activity
/// (or a same-day result with no streak yet) starts at 1, and further
/// activity on an already-counted day changes nothing.
fn next_streak(streak_days: u32, last_activity: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let day_gap = (now.date_naive() - last_activity.date_naive())
        .num_days()
        .abs();

    if day_gap == 1 {
        streak_days.saturating_add(1)
    } else if day_gap > 1 {
        1
    } else if streak_days == 0 {
        1
    } else {
        streak_days
    }
}

/// Exponential smoothing, recency-weighted 30%, rounded to nearest integer.
/// Both operands live in `[0, 100]`, so the blend does too.
fn blend_mastery(current: u8, score: u32, total_questions: u32) -> u8 {
    let pct = f64::from(score) / f64::from(total_questions) * 100.0;
    let blended = (f64::from(current) * MASTERY_CARRY_WEIGHT + pct * MASTERY_RECENCY_WEIGHT).round();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mastery = blended as u8;
    mastery
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
