//! Turns pasted AI chat output into a structured [`Quiz`].
//!
//! Input is loosely specified: the question list may arrive as a bare JSON
//! array, wrapped in a ```json fence, buried in surrounding prose, or nested
//! under a `questions` key. Extraction finds the most plausible JSON span,
//! decoding is strict, and the per-item mapping is deliberately forgiving so
//! one sloppy question never sinks the whole paste.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Question, QuestionId, QuestionType, Quiz, QuizId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Parse failure with a message fit to show the user directly.
///
/// The underlying JSON decoder error is logged, never surfaced; users pasting
/// chat transcripts get a stable, actionable message instead of serde
/// internals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("Could not parse the input. Please ensure it is a valid JSON format.")]
    InvalidJson,
    #[error(
        "Invalid JSON structure. Expected an array of questions or an object with a 'questions' array."
    )]
    InvalidStructure,
}

//
// ─── PARSER ────────────────────────────────────────────────────────────────────
//

/// Parses free-form quiz text into a [`Quiz`] for the given topic.
///
/// The quiz gets a fresh id, `title = "{topic} Practice"`, and `created_at =
/// now`; every question gets a fresh id regardless of any id in the source.
/// Question order follows input order.
///
/// # Errors
///
/// Returns [`ParseError::InvalidJson`] when no candidate span decodes as
/// JSON, and [`ParseError::InvalidStructure`] when the decoded value is
/// neither an array nor an object carrying a `questions` array.
pub fn parse_quiz_input(input: &str, topic: &str, now: DateTime<Utc>) -> Result<Quiz, ParseError> {
    let candidate = extract_candidate(input);

    let decoded: Value = serde_json::from_str(candidate).map_err(|e| {
        log::warn!("quiz input did not decode as JSON: {e}");
        ParseError::InvalidJson
    })?;

    let items = match &decoded {
        Value::Array(items) => items.as_slice(),
        Value::Object(fields) => match fields.get("questions") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Err(ParseError::InvalidStructure),
        },
        _ => return Err(ParseError::InvalidStructure),
    };

    let questions = items.iter().map(map_item).collect();

    Ok(Quiz {
        id: QuizId::new(),
        title: format!("{topic} Practice"),
        topic: topic.to_string(),
        created_at: now,
        questions,
    })
}

//
// ─── EXTRACTION ────────────────────────────────────────────────────────────────
//

/// Picks the JSON candidate out of the raw paste.
///
/// Preference order: a fenced ```json block, then the widest `[ { … } ]`
/// span, then the whole input as-is.
fn extract_candidate(input: &str) -> &str {
    if let Some(body) = fenced_json_block(input) {
        return body;
    }
    if let Some(span) = object_array_span(input) {
        return span;
    }
    input
}

/// Body of the first ```json fenced block, if it is properly closed.
fn fenced_json_block(input: &str) -> Option<&str> {
    const OPEN: &str = "```json";
    const CLOSE: &str = "```";

    let start = input.find(OPEN)? + OPEN.len();
    let body = &input[start..];
    let end = body.find(CLOSE)?;
    Some(body[..end].trim())
}

/// Widest span starting at `[` followed by `{` and ending at `}` followed by
/// `]`, whitespace permitted between the brackets.
fn object_array_span(input: &str) -> Option<&str> {
    let bytes = input.as_bytes();

    let open = (0..bytes.len())
        .find(|&i| bytes[i] == b'[' && next_non_ws(bytes, i + 1) == Some(b'{'))?;
    let close = (open + 1..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b']' && prev_non_ws(bytes, i) == Some(b'}'))?;

    Some(&input[open..=close])
}

fn next_non_ws(bytes: &[u8], from: usize) -> Option<u8> {
    bytes[from..]
        .iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}

fn prev_non_ws(bytes: &[u8], before: usize) -> Option<u8> {
    bytes[..before]
        .iter()
        .rev()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}

//
// ─── ITEM MAPPING ──────────────────────────────────────────────────────────────
//

/// Maps one decoded item to a [`Question`].
///
/// Field fallbacks, in order: `question` → `text` → placeholder text;
/// `answer` → `correctAnswer`; `explanation` → `reasoning`. The presence of
/// an `options` key makes the question multiple-choice regardless of the
/// key's value. Nothing here fails: missing fields degrade to defaults.
fn map_item(item: &Value) -> Question {
    let question_type = if item.get("options").is_some() {
        QuestionType::MultipleChoice
    } else {
        QuestionType::ShortAnswer
    };

    Question {
        id: QuestionId::new(),
        text: string_field(item, &["question", "text"])
            .unwrap_or_else(|| "No question text provided".to_string()),
        question_type,
        options: item
            .get("options")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(option_text).collect()),
        correct_answer: string_field(item, &["answer", "correctAnswer"]),
        explanation: string_field(item, &["explanation", "reasoning"]),
        graph: item.get("graph").and_then(Value::as_str).map(str::to_string),
    }
}

/// First of `names` whose value is a non-empty string.
fn string_field(item: &Value, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        item.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Option entries are usually strings; anything else keeps its JSON rendering.
fn option_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
