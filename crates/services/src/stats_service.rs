use tokio::sync::Mutex;

use quiz_core::model::{QuizResult, UserStats};
use quiz_core::stats::record_result;
use quiz_core::time::Clock;
use storage::repository::Storage;

use crate::error::RecordError;

/// Records completed quiz attempts and serves the running statistics.
///
/// `record_completion` is the only path that writes `UserStats`. Recordings
/// are serialized through an internal mutex so two completions can never fold
/// against the same stats snapshot and lose an update.
pub struct StatsService {
    storage: Storage,
    clock: Clock,
    record_lock: Mutex<()>,
}

impl StatsService {
    /// Create a stats service over the given storage with a real-time clock.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            clock: Clock::default(),
            record_lock: Mutex::new(()),
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Persist one completed attempt and fold it into the stats.
    ///
    /// The aggregate transform runs before anything is written, so a result
    /// that fails validation persists neither the result nor a stats change.
    /// Returns the updated stats for immediate display.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidResult` for a result with zero questions
    /// or an out-of-range score, or a storage error if either write fails.
    pub async fn record_completion(&self, result: &QuizResult) -> Result<UserStats, RecordError> {
        let _serial = self.record_lock.lock().await;

        let stats = self.storage.stats.load_stats().await?;
        let updated = record_result(&stats, result, self.clock.now())?;

        self.storage.results.save_result(result).await?;
        self.storage.stats.save_stats(&updated).await?;

        Ok(updated)
    }

    /// Current stats; the zeroed default before any result was recorded.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading fails.
    pub async fn stats(&self) -> Result<UserStats, RecordError> {
        Ok(self.storage.stats.load_stats().await?)
    }

    /// Full result history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading fails.
    pub async fn list_results(&self) -> Result<Vec<QuizResult>, RecordError> {
        Ok(self.storage.results.load_results().await?)
    }
}
