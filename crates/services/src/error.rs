//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::parser::ParseError;
use quiz_core::stats::InvalidResultError;
use storage::repository::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error(transparent)]
    InvalidResult(#[from] InvalidResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
