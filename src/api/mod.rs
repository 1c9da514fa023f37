pub mod client;
pub mod types;

pub use client::{HttpBackend, StudyBackend, GENERATE_QUIZ_PATH, SUMMARIZE_PATH};
pub use types::{QuestionKind, QuizQuestion};
