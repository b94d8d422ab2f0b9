use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// How a question is answered: free text or single-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    ShortAnswer,
    MultipleChoice,
}

/// One gradable prompt inside a quiz.
///
/// `text` may carry markdown/LaTeX annotations; the core treats it as an
/// opaque string. `graph` is an optional single-variable function expression
/// for plotting and is not validated here.
///
/// `correct_answer` and `options` are deliberately loose: AI-generated input
/// frequently omits the answer or ships an empty option list, and the parser
/// passes that through rather than rejecting the whole quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
}

impl Question {
    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        self.question_type == QuestionType::MultipleChoice
    }

    /// Checks a user's answer against the expected one.
    ///
    /// Comparison strips all whitespace and lowercases both sides, so
    /// `3x^2 + 4` and `3x^2+4` grade the same. A question without a
    /// `correct_answer` never grades correct.
    #[must_use]
    pub fn grade(&self, user_answer: &str) -> bool {
        match &self.correct_answer {
            Some(expected) => normalize(user_answer) == normalize(expected),
            None => false,
        }
    }
}

fn normalize(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn short_answer(correct: Option<&str>) -> Question {
        Question {
            id: QuestionId::new(),
            text: "What is the derivative of x^3?".to_string(),
            question_type: QuestionType::ShortAnswer,
            options: None,
            correct_answer: correct.map(str::to_string),
            explanation: None,
            graph: None,
        }
    }

    #[test]
    fn test_grade_ignores_whitespace_and_case() {
        let q = short_answer(Some("3x^2 + 4"));
        assert!(q.grade("3X^2+4"));
        assert!(q.grade("  3x^2 +   4  "));
        assert!(!q.grade("3x^2"));
    }

    #[test]
    fn test_grade_without_correct_answer_is_false() {
        let q = short_answer(None);
        assert!(!q.grade("anything"));
        assert!(!q.grade(""));
    }

    #[test]
    fn test_question_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&QuestionType::ShortAnswer).unwrap(),
            "\"short-answer\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionType::MultipleChoice).unwrap(),
            "\"multiple-choice\""
        );
    }

    #[test]
    fn test_serialized_shape_omits_absent_fields() {
        let q = short_answer(Some("4"));
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "short-answer");
        assert_eq!(json["correctAnswer"], "4");
        assert!(json.get("options").is_none());
        assert!(json.get("explanation").is_none());
        assert!(json.get("graph").is_none());
    }
}
