#![forbid(unsafe_code)]

//! Persistence for the quiz practice app. Entities round-trip as opaque JSON
//! payloads; repositories expose the load/save boundary the services layer
//! drives. Backends: `SQLite` for the app, in-memory for tests.

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, QuizRepository, ResultRepository, StatsRepository, Storage, StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
