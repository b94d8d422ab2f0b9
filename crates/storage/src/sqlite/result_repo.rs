use quiz_core::model::QuizResult;
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{conn_err, decode_payload, encode_payload},
};
use crate::repository::{ResultRepository, StorageError};

#[async_trait::async_trait]
impl ResultRepository for SqliteRepository {
    async fn save_result(&self, result: &QuizResult) -> Result<(), StorageError> {
        let payload = encode_payload(result)?;

        sqlx::query(
            r"
                INSERT INTO quiz_results (id, quiz_id, completed_at, payload)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(result.id.to_string())
        .bind(result.quiz_id.to_string())
        .bind(result.date)
        .bind(payload)
        .execute(self.pool())
        .await
        .map_err(conn_err)?;

        Ok(())
    }

    async fn load_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT payload FROM quiz_results
                ORDER BY completed_at ASC, id ASC
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(conn_err)?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let payload: String = row
                .try_get("payload")
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            results.push(decode_payload(&payload)?);
        }
        Ok(results)
    }
}
