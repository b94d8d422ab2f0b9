use chrono::Duration;
use quiz_core::model::{AnswerMap, AnswerRecord, QuestionType, QuizResult};
use quiz_core::time::{Clock, fixed_now};
use services::{QuizService, RecordError, StatsService};
use storage::repository::Storage;

const PASTED_CHAT: &str = r#"Sure! Here is your quiz:
```json
[
    {"question": "What is $2+2$?", "answer": "4", "explanation": "Basic addition."},
    {"question": "Pick the prime.", "options": ["4", "5", "6"], "answer": "5"},
    {"question": "Simplify 3x^2 + 4 - 0.", "answer": "3x^2 + 4"}
]
```
Good luck!"#;

/// Replays a quiz the way the UI does: grade each question, log the answer,
/// and build the completion record.
fn replay(quiz: &quiz_core::model::Quiz, responses: &[&str]) -> QuizResult {
    let mut answers = AnswerMap::new();
    for (question, response) in quiz.questions.iter().zip(responses) {
        answers.record(
            question.id,
            AnswerRecord {
                user_answer: (*response).to_string(),
                is_correct: question.grade(response),
            },
        );
    }
    QuizResult::new(quiz, answers, fixed_now())
}

#[tokio::test]
async fn import_replay_and_record_updates_stats() {
    let storage = Storage::in_memory();
    let quiz_svc = QuizService::new(storage.clone()).with_clock(Clock::fixed(fixed_now()));
    let stats_svc = StatsService::new(storage.clone()).with_clock(Clock::fixed(fixed_now()));

    let quiz = quiz_svc.import_quiz(PASTED_CHAT, "Math").await.unwrap();
    assert_eq!(quiz.title, "Math Practice");
    assert_eq!(quiz.questions.len(), 3);
    assert_eq!(
        quiz.questions[1].question_type,
        QuestionType::MultipleChoice
    );
    assert_eq!(quiz_svc.list_quizzes().await.unwrap().len(), 1);

    // Whitespace-insensitive grading: the last response matches despite
    // different spacing.
    let result = replay(&quiz, &["4", "6", "3x^2+4"]);
    assert_eq!(result.score, 2);
    assert_eq!(result.total_questions, 3);

    let stats = stats_svc.record_completion(&result).await.unwrap();
    assert_eq!(stats.total_quizzes_taken, 1);
    assert_eq!(stats.total_questions_answered, 3);
    assert_eq!(stats.total_correct_answers, 2);
    assert_eq!(stats.streak_days, 1);
    // round(0 * 0.7 + (2/3 * 100) * 0.3) = 20
    assert_eq!(stats.mastery_for("Math"), 20);

    assert_eq!(stats_svc.list_results().await.unwrap(), vec![result]);
    assert_eq!(stats_svc.stats().await.unwrap(), stats);
}

#[tokio::test]
async fn streak_extends_across_daily_services() {
    let storage = Storage::in_memory();
    let quiz_svc = QuizService::new(storage.clone()).with_clock(Clock::fixed(fixed_now()));
    let quiz = quiz_svc.import_quiz(PASTED_CHAT, "Math").await.unwrap();

    for day in 0..3 {
        let clock = Clock::fixed(fixed_now() + Duration::days(day));
        let svc = StatsService::new(storage.clone()).with_clock(clock);
        let result = replay(&quiz, &["4", "5", "3x^2 + 4"]);
        let stats = svc.record_completion(&result).await.unwrap();
        assert_eq!(stats.streak_days, u32::try_from(day).unwrap() + 1);
    }

    // A three-day gap breaks the streak back to 1.
    let svc = StatsService::new(storage.clone())
        .with_clock(Clock::fixed(fixed_now() + Duration::days(5)));
    let stats = svc
        .record_completion(&replay(&quiz, &["4", "5", "3x^2 + 4"]))
        .await
        .unwrap();
    assert_eq!(stats.streak_days, 1);
}

#[tokio::test]
async fn invalid_result_persists_nothing() {
    let storage = Storage::in_memory();
    let quiz_svc = QuizService::new(storage.clone()).with_clock(Clock::fixed(fixed_now()));
    let stats_svc = StatsService::new(storage.clone()).with_clock(Clock::fixed(fixed_now()));

    let quiz = quiz_svc.import_quiz("[]", "Empty").await.unwrap();
    assert!(quiz.is_empty());

    // An empty quiz completes with zero questions, which the aggregator
    // rejects before anything is written.
    let result = QuizResult::new(&quiz, AnswerMap::new(), fixed_now());
    let err = stats_svc.record_completion(&result).await.unwrap_err();
    assert!(matches!(err, RecordError::InvalidResult(_)));

    assert!(stats_svc.list_results().await.unwrap().is_empty());
    assert_eq!(
        stats_svc.stats().await.unwrap(),
        quiz_core::model::UserStats::default()
    );
}

#[tokio::test]
async fn failed_parse_saves_no_quiz() {
    let storage = Storage::in_memory();
    let quiz_svc = QuizService::new(storage.clone());

    assert!(quiz_svc.import_quiz("not json at all", "Math").await.is_err());
    assert!(quiz_svc.list_quizzes().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleted_quiz_leaves_history_readable() {
    let storage = Storage::in_memory();
    let quiz_svc = QuizService::new(storage.clone()).with_clock(Clock::fixed(fixed_now()));
    let stats_svc = StatsService::new(storage.clone()).with_clock(Clock::fixed(fixed_now()));

    let quiz = quiz_svc.import_quiz(PASTED_CHAT, "Math").await.unwrap();
    let result = replay(&quiz, &["4", "5", "wrong"]);
    stats_svc.record_completion(&result).await.unwrap();

    quiz_svc.delete_quiz(quiz.id).await.unwrap();
    assert!(quiz_svc.get_quiz(quiz.id).await.unwrap().is_none());

    // History keeps the copied title/topic even though the quiz is gone.
    let history = stats_svc.list_results().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].quiz_title, "Math Practice");
}
