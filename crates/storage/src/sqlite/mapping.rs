use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::StorageError;

pub(crate) fn conn_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => StorageError::Connection(e.to_string()),
    }
}

/// Encode an entity into its JSON payload column.
pub(crate) fn encode_payload<T: Serialize>(entity: &T) -> Result<String, StorageError> {
    serde_json::to_string(entity).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode an entity back out of its JSON payload column.
pub(crate) fn decode_payload<T: DeserializeOwned>(payload: &str) -> Result<T, StorageError> {
    serde_json::from_str(payload).map_err(|e| StorageError::Serialization(e.to_string()))
}
