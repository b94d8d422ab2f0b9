use quiz_core::model::UserStats;
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{conn_err, decode_payload, encode_payload},
};
use crate::repository::{StatsRepository, StorageError};

/// Stats live in a single row; the table's CHECK pins the id to 1.
#[async_trait::async_trait]
impl StatsRepository for SqliteRepository {
    async fn load_stats(&self) -> Result<UserStats, StorageError> {
        let row = sqlx::query("SELECT payload FROM user_stats WHERE id = 1")
            .fetch_optional(self.pool())
            .await
            .map_err(conn_err)?;

        match row {
            Some(row) => {
                let payload: String = row
                    .try_get("payload")
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                decode_payload(&payload)
            }
            None => Ok(UserStats::default()),
        }
    }

    async fn save_stats(&self, stats: &UserStats) -> Result<(), StorageError> {
        let payload = encode_payload(stats)?;

        sqlx::query(
            r"
                INSERT INTO user_stats (id, payload)
                VALUES (1, ?1)
                ON CONFLICT (id) DO UPDATE SET payload = excluded.payload
            ",
        )
        .bind(payload)
        .execute(self.pool())
        .await
        .map_err(conn_err)?;

        Ok(())
    }
}
