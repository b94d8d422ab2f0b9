#![forbid(unsafe_code)]

//! Orchestration layer between the UI and the quiz core: importing pasted
//! quiz text, managing the quiz library, and recording completions into the
//! running statistics.

pub mod error;
pub mod quiz_service;
pub mod stats_service;

pub use quiz_core::Clock;

pub use error::{QuizServiceError, RecordError};
pub use quiz_service::QuizService;
pub use stats_service::StatsService;
