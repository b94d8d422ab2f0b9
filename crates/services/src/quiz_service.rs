use quiz_core::model::{Quiz, QuizId};
use quiz_core::parser::parse_quiz_input;
use quiz_core::time::Clock;
use storage::repository::Storage;

use crate::error::QuizServiceError;

/// Imports pasted quiz text and manages the saved quiz library.
pub struct QuizService {
    storage: Storage,
    clock: Clock,
}

impl QuizService {
    /// Create a quiz service over the given storage with a real-time clock.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            clock: Clock::default(),
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Parse pasted text into a quiz for `topic` and persist it.
    ///
    /// The returned quiz is the persisted one; callers typically navigate
    /// straight to it.
    ///
    /// # Errors
    ///
    /// Returns a parse error with its user-facing message if the text cannot
    /// be turned into a question list, or a storage error if persisting
    /// fails. A failed parse saves nothing.
    pub async fn import_quiz(&self, input: &str, topic: &str) -> Result<Quiz, QuizServiceError> {
        let quiz = parse_quiz_input(input, topic, self.clock.now())?;
        self.storage.quizzes.save_quiz(&quiz).await?;
        Ok(quiz)
    }

    /// All saved quizzes, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading fails.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        Ok(self.storage.quizzes.load_quizzes().await?)
    }

    /// Fetch one quiz by id; `None` when it was deleted or never existed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading fails.
    pub async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, QuizServiceError> {
        Ok(self.storage.quizzes.load_quiz(id).await?)
    }

    /// Delete a quiz. Results recorded against it stay in history.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the deletion fails.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), QuizServiceError> {
        Ok(self.storage.quizzes.delete_quiz(id).await?)
    }
}
