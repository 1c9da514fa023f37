use crate::api::QuizQuestion;
use crate::error::BackendError;

pub const NOTES_EMPTY_INPUT: &str = "Please paste some text to summarize.";
pub const QUIZ_EMPTY_INPUT: &str = "Please paste some text to generate a quiz.";
pub const NOTES_FAILED: &str = "Failed to generate notes.";
pub const QUIZ_FAILED: &str = "Failed to generate quiz.";
pub const QUIZ_EMPTY_RESULT: &str = "Could not generate a quiz from the provided text.";

/// The two independent request flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Notes,
    Quiz,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Notes => "notes",
            Operation::Quiz => "quiz",
        }
    }

    pub fn empty_input_message(self) -> &'static str {
        match self {
            Operation::Notes => NOTES_EMPTY_INPUT,
            Operation::Quiz => QUIZ_EMPTY_INPUT,
        }
    }

    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Notes => NOTES_FAILED,
            Operation::Quiz => QUIZ_FAILED,
        }
    }
}

/// The single shared error slot, tagged with the operation that set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub operation: Operation,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Default, Clone)]
pub struct StudyState {
    /// Pasted source text. Edited in place; `cursor_position` is a byte offset
    /// on a char boundary.
    pub input_buffer: String,
    pub cursor_position: usize,
    pub notes: Option<String>,
    pub quiz: Option<Vec<QuizQuestion>>,
    pub loading_notes: bool,
    pub loading_quiz: bool,
    pub error: Option<ErrorMessage>,
}

impl StudyState {
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn is_loading(&self, operation: Operation) -> bool {
        match operation {
            Operation::Notes => self.loading_notes,
            Operation::Quiz => self.loading_quiz,
        }
    }
}

/// A request the controller has committed to; the caller performs it and
/// hands the outcome back as a `BackendResponse` with the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub operation: Operation,
    pub request_id: u64,
    pub text: String,
}

#[derive(Debug)]
pub enum BackendResponse {
    Notes {
        request_id: u64,
        result: Result<String, BackendError>,
    },
    Quiz {
        request_id: u64,
        result: Result<Vec<QuizQuestion>, BackendError>,
    },
}

impl BackendResponse {
    pub fn operation(&self) -> Operation {
        match self {
            BackendResponse::Notes { .. } => Operation::Notes,
            BackendResponse::Quiz { .. } => Operation::Quiz,
        }
    }

    pub fn request_id(&self) -> u64 {
        match self {
            BackendResponse::Notes { request_id, .. } | BackendResponse::Quiz { request_id, .. } => {
                *request_id
            }
        }
    }
}

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Notes,
    Quiz,
    QuitConfirm,
}
