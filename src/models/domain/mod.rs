pub mod answer_record;
pub mod quiz;

pub use answer_record::AnswerRecord;
pub use quiz::{Quiz, QuizQuestion};
