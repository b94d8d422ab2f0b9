use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::ids::{QuestionId, QuizId, ResultId};
use crate::model::quiz::Quiz;

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// One answered question inside a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub user_answer: String,
    pub is_correct: bool,
}

/// Question-id → answer mapping that keeps insertion order.
///
/// Serialized as a plain JSON map, but iteration (and the serialized key
/// order) follows the order answers were recorded in, which is the order the
/// user moved through the quiz. Re-answering a question updates the existing
/// entry in place without changing its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap(Vec<(QuestionId, AnswerRecord)>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Records an answer, replacing any earlier answer to the same question.
    pub fn record(&mut self, question_id: QuestionId, answer: AnswerRecord) {
        if let Some(entry) = self.0.iter_mut().find(|(id, _)| *id == question_id) {
            entry.1 = answer;
        } else {
            self.0.push((question_id, answer));
        }
    }

    #[must_use]
    pub fn get(&self, question_id: QuestionId) -> Option<&AnswerRecord> {
        self.0
            .iter()
            .find(|(id, _)| *id == question_id)
            .map(|(_, answer)| answer)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of answers graded correct.
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        let correct = self.0.iter().filter(|(_, a)| a.is_correct).count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &AnswerRecord)> {
        self.0.iter().map(|(id, answer)| (*id, answer))
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, answer) in &self.0 {
            map.serialize_entry(id, answer)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnswerMapVisitor;

        impl<'de> Visitor<'de> for AnswerMapVisitor {
            type Value = AnswerMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map of question ids to answer records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, answer)) =
                    access.next_entry::<QuestionId, AnswerRecord>()?
                {
                    entries.push((id, answer));
                }
                Ok(AnswerMap(entries))
            }
        }

        deserializer.deserialize_map(AnswerMapVisitor)
    }
}

//
// ─── QUIZ RESULT ───────────────────────────────────────────────────────────────
//

/// The immutable record of one completed attempt at a quiz.
///
/// `quiz_title` and `topic` are copied at completion time rather than
/// re-derived, so history display survives later topic renames. `quiz_id` is
/// a weak reference: deleting the quiz leaves its results in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: ResultId,
    pub quiz_id: QuizId,
    pub quiz_title: String,
    pub topic: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
    pub answers: AnswerMap,
}

impl QuizResult {
    /// Builds the completion record for one attempt at `quiz`.
    ///
    /// The score is counted from the answer map; `total_questions` comes from
    /// the quiz itself, so unanswered questions still count toward the total.
    #[must_use]
    pub fn new(quiz: &Quiz, answers: AnswerMap, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: ResultId::from_timestamp(completed_at),
            quiz_id: quiz.id,
            quiz_title: quiz.title.clone(),
            topic: quiz.topic.clone(),
            date: completed_at,
            score: answers.correct_count(),
            total_questions: u32::try_from(quiz.questions.len()).unwrap_or(u32::MAX),
            answers,
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
