use async_trait::async_trait;
use quiz_core::model::{Quiz, QuizId, QuizResult, UserStats};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for quizzes.
///
/// Quizzes are immutable: they are saved once, listed, fetched, and deleted.
/// Deletion does not touch results that reference the quiz.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Persist a new quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a quiz with the same id already
    /// exists, or other storage errors.
    async fn save_quiz(&self, quiz: &Quiz) -> Result<(), StorageError>;

    /// All saved quizzes, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quizzes cannot be loaded.
    async fn load_quizzes(&self) -> Result<Vec<Quiz>, StorageError>;

    /// Fetch a quiz by id; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failure (absence is not an error).
    async fn load_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError>;

    /// Delete a quiz. Deleting a missing quiz is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the deletion cannot be executed.
    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError>;
}

/// Repository contract for completed quiz results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Persist one completion record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn save_result(&self, result: &QuizResult) -> Result<(), StorageError>;

    /// All recorded results, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the results cannot be loaded.
    async fn load_results(&self) -> Result<Vec<QuizResult>, StorageError>;
}

/// Repository contract for the singleton user statistics.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Current stats, or the zeroed default if none were ever persisted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stats cannot be loaded.
    async fn load_stats(&self) -> Result<UserStats, StorageError>;

    /// Replace the persisted stats with the given snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stats cannot be stored.
    async fn save_stats(&self, stats: &UserStats) -> Result<(), StorageError>;
}

/// Bundle of repository handles a service layer works against.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
    pub results: Arc<dyn ResultRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

impl Storage {
    /// Build a `Storage` backed entirely by memory, for tests and prototyping.
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            quizzes: Arc::new(repo.clone()),
            results: Arc::new(repo.clone()),
            stats: Arc::new(repo),
        }
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Lists keep insertion order, matching the oldest-first contract.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    quizzes: Arc<Mutex<Vec<Quiz>>>,
    results: Arc<Mutex<Vec<QuizResult>>>,
    stats: Arc<Mutex<Option<UserStats>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn save_quiz(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let mut guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|q| q.id == quiz.id) {
            return Err(StorageError::Conflict);
        }
        guard.push(quiz.clone());
        Ok(())
    }

    async fn load_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn load_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().find(|q| q.id == id).cloned())
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let mut guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.retain(|q| q.id != id);
        Ok(())
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn save_result(&self, result: &QuizResult) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(result.clone());
        Ok(())
    }

    async fn load_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl StatsRepository for InMemoryRepository {
    async fn load_stats(&self) -> Result<UserStats, StorageError> {
        let guard = self
            .stats
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    async fn save_stats(&self, stats: &UserStats) -> Result<(), StorageError> {
        let mut guard = self
            .stats
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(stats.clone());
        Ok(())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
