mod ids;
mod question;
mod quiz;
mod result;
mod stats;

pub use ids::{ParseIdError, QuestionId, QuizId, ResultId};
pub use question::{Question, QuestionType};
pub use quiz::Quiz;
pub use result::{AnswerMap, AnswerRecord, QuizResult};
pub use stats::UserStats;
