use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of both POST endpoints.
#[derive(Debug, Serialize)]
pub struct TextRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct NotesResponse {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizResponse {
    #[serde(default)]
    pub quiz: Option<Vec<QuizQuestion>>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "tf")]
    TrueFalse,
    #[default]
    #[serde(other)]
    Other,
}

/// One question as produced by the backend. The controller never looks
/// inside; only the quiz view interprets the known fields. Anything the
/// backend adds is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuizQuestion {
    pub fn multiple_choice(question: &str, options: &[&str], answer: &str) -> Self {
        Self {
            kind: QuestionKind::MultipleChoice,
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
            extra: Map::new(),
        }
    }

    pub fn true_false(statement: &str, answer: bool) -> Self {
        Self {
            kind: QuestionKind::TrueFalse,
            question: statement.to_string(),
            options: Vec::new(),
            answer: if answer { "True" } else { "False" }.to_string(),
            extra: Map::new(),
        }
    }

    /// Selectable answers. True/false questions come without options on
    /// the wire.
    pub fn choices(&self) -> Vec<String> {
        if !self.options.is_empty() {
            return self.options.clone();
        }
        match self.kind {
            QuestionKind::TrueFalse => vec!["True".to_string(), "False".to_string()],
            _ => Vec::new(),
        }
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        choice.trim().eq_ignore_ascii_case(self.answer.trim())
    }
}
