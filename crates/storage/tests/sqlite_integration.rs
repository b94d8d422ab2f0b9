use quiz_core::model::{
    AnswerMap, AnswerRecord, Question, QuestionId, QuestionType, Quiz, QuizId, QuizResult,
    UserStats,
};
use quiz_core::time::fixed_now;
use storage::repository::{QuizRepository, ResultRepository, StatsRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn build_quiz(topic: &str) -> Quiz {
    let question = Question {
        id: QuestionId::new(),
        text: "What is $\\int 2x\\,dx$?".to_string(),
        question_type: QuestionType::MultipleChoice,
        options: Some(vec!["x^2 + C".to_string(), "2x + C".to_string()]),
        correct_answer: Some("x^2 + C".to_string()),
        explanation: Some("Reverse the power rule.".to_string()),
        graph: Some("x^2".to_string()),
    };
    Quiz {
        id: QuizId::new(),
        title: format!("{topic} Practice"),
        topic: topic.to_string(),
        created_at: fixed_now(),
        questions: vec![question],
    }
}

#[tokio::test]
async fn sqlite_roundtrips_quiz_payload() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_quiz_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let quiz = build_quiz("Calculus");
    repo.save_quiz(&quiz).await.unwrap();

    let fetched = repo.load_quiz(quiz.id).await.unwrap().expect("stored quiz");
    assert_eq!(fetched, quiz);

    let all = repo.load_quizzes().await.unwrap();
    assert_eq!(all, vec![quiz]);
}

#[tokio::test]
async fn sqlite_rejects_duplicate_quiz_ids() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_quiz_dup?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let quiz = build_quiz("Calculus");
    repo.save_quiz(&quiz).await.unwrap();
    assert!(matches!(
        repo.save_quiz(&quiz).await,
        Err(StorageError::Conflict)
    ));
}

#[tokio::test]
async fn sqlite_roundtrips_result_with_answer_order() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_result?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let quiz = build_quiz("Algebra");
    let mut answers = AnswerMap::new();
    answers.record(
        quiz.questions[0].id,
        AnswerRecord {
            user_answer: "x^2 + C".to_string(),
            is_correct: true,
        },
    );
    let result = QuizResult::new(&quiz, answers, fixed_now());

    repo.save_result(&result).await.unwrap();
    let loaded = repo.load_results().await.unwrap();
    assert_eq!(loaded, vec![result]);
}

#[tokio::test]
async fn sqlite_delete_quiz_keeps_results() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_weak_ref?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let quiz = build_quiz("History");
    repo.save_quiz(&quiz).await.unwrap();
    let result = QuizResult::new(&quiz, AnswerMap::new(), fixed_now());
    repo.save_result(&result).await.unwrap();

    repo.delete_quiz(quiz.id).await.unwrap();
    assert!(repo.load_quiz(quiz.id).await.unwrap().is_none());

    // quiz_id is a weak reference: the result survives its quiz.
    let results = repo.load_results().await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].quiz_id, quiz.id);
}

#[tokio::test]
async fn sqlite_stats_default_then_upsert() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_stats?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.load_stats().await.unwrap(), UserStats::default());

    let mut stats = UserStats::default();
    stats.total_quizzes_taken = 4;
    stats.streak_days = 2;
    stats.topic_mastery.insert("Algebra".to_string(), 47);
    repo.save_stats(&stats).await.unwrap();
    assert_eq!(repo.load_stats().await.unwrap(), stats);

    stats.total_quizzes_taken = 5;
    repo.save_stats(&stats).await.unwrap();
    assert_eq!(repo.load_stats().await.unwrap(), stats);
}
