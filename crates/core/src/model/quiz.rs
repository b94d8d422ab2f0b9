use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::QuizId;
use crate::model::question::Question;

/// An ordered, immutable set of questions produced by one parse operation.
///
/// A quiz is never mutated after creation, only deleted. The parser does not
/// reject an empty question list; callers that need a playable quiz should
/// check `is_empty` before offering it to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    pub topic: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn test_created_at_serializes_as_millis() {
        let quiz = Quiz {
            id: QuizId::new(),
            title: "Calculus Practice".to_string(),
            topic: "Calculus".to_string(),
            created_at: fixed_now(),
            questions: Vec::new(),
        };
        let json = serde_json::to_value(&quiz).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(json["title"], "Calculus Practice");
    }

    #[test]
    fn test_json_roundtrip() {
        let quiz = Quiz {
            id: QuizId::new(),
            title: "Algebra Practice".to_string(),
            topic: "Algebra".to_string(),
            created_at: fixed_now(),
            questions: Vec::new(),
        };
        let encoded = serde_json::to_string(&quiz).unwrap();
        let decoded: Quiz = serde_json::from_str(&encoded).unwrap();
        assert_eq!(quiz, decoded);
    }
}
