#![forbid(unsafe_code)]

//! Core of the AI quiz practice app: turns pasted AI-generated quiz text
//! into structured quizzes and folds completed attempts into running user
//! statistics. Pure transforms only; persistence lives in the `storage`
//! crate and orchestration in `services`.

pub mod error;
pub mod model;
pub mod parser;
pub mod stats;
pub mod time;

pub use error::Error;
pub use model::{
    AnswerMap, AnswerRecord, Question, QuestionId, QuestionType, Quiz, QuizId, QuizResult,
    ResultId, UserStats,
};
pub use parser::{ParseError, parse_quiz_input};
pub use stats::{InvalidResultError, record_result};
pub use time::Clock;
