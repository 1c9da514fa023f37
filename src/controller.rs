//! The study-tools controller: input text, generated notes, generated quiz,
//! one loading flag per operation and a single error slot.
//!
//! Every invocation first performs its start-up side effects (`begin_*`), then
//! the caller awaits the backend and feeds the outcome to [`apply`]. Each
//! operation carries a monotonic request id; a response whose id is not the
//! latest for its operation is stale and is dropped without touching state.
//!
//! [`apply`]: StudyToolsController::apply

use crate::api::{QuizQuestion, StudyBackend};
use crate::error::BackendError;
use crate::models::{
    BackendResponse, ErrorMessage, Operation, OperationStatus, PendingRequest, StudyState,
    QUIZ_EMPTY_RESULT,
};
use crate::worker::run_request;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct StudyToolsController {
    state: StudyState,
    notes_seq: u64,
    quiz_seq: u64,
}

impl StudyToolsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StudyState {
        &self.state
    }

    /// Mutable access for input editing.
    pub fn state_mut(&mut self) -> &mut StudyState {
        &mut self.state
    }

    pub fn input(&self) -> &str {
        &self.state.input_buffer
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input_buffer = text.into();
        self.state.cursor_position = self.state.input_buffer.len();
    }

    pub fn clear_input(&mut self) {
        self.state.input_buffer.clear();
        self.state.cursor_position = 0;
    }

    pub fn status(&self, operation: Operation) -> OperationStatus {
        if self.state.is_loading(operation) {
            return OperationStatus::Loading;
        }
        let has_result = match operation {
            Operation::Notes => self.state.notes.is_some(),
            Operation::Quiz => self.state.quiz.is_some(),
        };
        if has_result {
            OperationStatus::Succeeded
        } else if self
            .state
            .error
            .as_ref()
            .is_some_and(|e| e.operation == operation)
        {
            OperationStatus::Failed
        } else {
            OperationStatus::Idle
        }
    }

    /// Start a notes attempt. Clears the error, the notes and any displayed
    /// quiz. Returns `None` when the input is empty; the validation message is
    /// then already in the error slot.
    pub fn begin_notes(&mut self) -> Option<PendingRequest> {
        self.notes_seq += 1;
        self.state.error = None;
        self.state.notes = None;
        self.state.quiz = None;

        if self.state.input_buffer.is_empty() {
            self.state.loading_notes = false;
            self.fail(Operation::Notes, Operation::Notes.empty_input_message().to_string());
            return None;
        }

        self.state.loading_notes = true;
        info!(request_id = self.notes_seq, "requesting notes");
        Some(PendingRequest {
            operation: Operation::Notes,
            request_id: self.notes_seq,
            text: self.state.input_buffer.clone(),
        })
    }

    /// Start a quiz attempt from the pasted text (never from the notes).
    /// Clears the error and the quiz; notes stay on screen.
    pub fn begin_quiz(&mut self) -> Option<PendingRequest> {
        self.quiz_seq += 1;
        self.state.error = None;
        self.state.quiz = None;

        if self.state.input_buffer.is_empty() {
            self.state.loading_quiz = false;
            self.fail(Operation::Quiz, Operation::Quiz.empty_input_message().to_string());
            return None;
        }

        self.state.loading_quiz = true;
        info!(request_id = self.quiz_seq, "requesting quiz");
        Some(PendingRequest {
            operation: Operation::Quiz,
            request_id: self.quiz_seq,
            text: self.state.input_buffer.clone(),
        })
    }

    /// Apply a completed request. Returns `false` when the response was stale
    /// and ignored.
    pub fn apply(&mut self, response: BackendResponse) -> bool {
        let operation = response.operation();
        let request_id = response.request_id();
        let latest = match operation {
            Operation::Notes => self.notes_seq,
            Operation::Quiz => self.quiz_seq,
        };
        if request_id != latest {
            debug!(
                operation = operation.label(),
                request_id, latest, "dropping stale response"
            );
            return false;
        }

        match response {
            BackendResponse::Notes { result, .. } => {
                self.state.loading_notes = false;
                self.finish_notes(result);
            }
            BackendResponse::Quiz { result, .. } => {
                self.state.loading_quiz = false;
                self.finish_quiz(result);
            }
        }
        true
    }

    fn finish_notes(&mut self, result: Result<String, BackendError>) {
        match result {
            Ok(notes) => {
                info!(chars = notes.chars().count(), "notes received");
                self.state.notes = Some(notes);
            }
            Err(err) => self.fail_from_backend(Operation::Notes, err),
        }
    }

    fn finish_quiz(&mut self, result: Result<Vec<QuizQuestion>, BackendError>) {
        match result {
            Ok(quiz) if quiz.is_empty() => {
                warn!("backend returned an empty quiz");
                self.fail(Operation::Quiz, QUIZ_EMPTY_RESULT.to_string());
            }
            Ok(quiz) => {
                info!(questions = quiz.len(), "quiz received");
                self.state.quiz = Some(quiz);
            }
            Err(err) => self.fail_from_backend(Operation::Quiz, err),
        }
    }

    fn fail_from_backend(&mut self, operation: Operation, err: BackendError) {
        warn!(operation = operation.label(), error = %err, "request failed");
        let message = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| operation.fallback_message().to_string());
        self.fail(operation, message);
    }

    fn fail(&mut self, operation: Operation, message: String) {
        self.state.error = Some(ErrorMessage { operation, message });
    }

    /// Run a whole notes attempt against `backend`.
    pub async fn generate_notes<B>(&mut self, backend: &B)
    where
        B: StudyBackend + ?Sized,
    {
        if let Some(request) = self.begin_notes() {
            let response = run_request(backend, request).await;
            self.apply(response);
        }
    }

    /// Run a whole quiz attempt against `backend`.
    pub async fn generate_quiz<B>(&mut self, backend: &B)
    where
        B: StudyBackend + ?Sized,
    {
        if let Some(request) = self.begin_quiz() {
            let response = run_request(backend, request).await;
            self.apply(response);
        }
    }
}
