use quiz_core::model::{Quiz, QuizId};
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{conn_err, decode_payload, encode_payload},
};
use crate::repository::{QuizRepository, StorageError};

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn save_quiz(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let payload = encode_payload(quiz)?;

        sqlx::query(
            r"
                INSERT INTO quizzes (id, created_at, payload)
                VALUES (?1, ?2, ?3)
            ",
        )
        .bind(quiz.id.to_string())
        .bind(quiz.created_at)
        .bind(payload)
        .execute(self.pool())
        .await
        .map_err(conn_err)?;

        Ok(())
    }

    async fn load_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT payload FROM quizzes
                ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(conn_err)?;

        let mut quizzes = Vec::with_capacity(rows.len());
        for row in rows {
            let payload: String = row
                .try_get("payload")
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            quizzes.push(decode_payload(&payload)?);
        }
        Ok(quizzes)
    }

    async fn load_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let row = sqlx::query("SELECT payload FROM quizzes WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(conn_err)?;

        match row {
            Some(row) => {
                let payload: String = row
                    .try_get("payload")
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(decode_payload(&payload)?))
            }
            None => Ok(None),
        }
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM quizzes WHERE id = ?1")
            .bind(id.to_string())
            .execute(self.pool())
            .await
            .map_err(conn_err)?;
        Ok(())
    }
}
