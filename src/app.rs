use crate::config::Config;
use crate::controller::StudyToolsController;
use crate::models::{BackendResponse, Focus, Operation, PendingRequest};
use crate::quiz::QuizProgress;

pub const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Everything the terminal front end needs on top of the controller.
#[derive(Debug)]
pub struct App {
    pub controller: StudyToolsController,
    pub focus: Focus,
    /// Focus to return to when the quit dialog is dismissed.
    pub previous_focus: Focus,
    pub quiz_progress: Option<QuizProgress>,
    pub input_scroll_y: u16,
    pub notes_scroll_y: u16,
    pub spinner_frame: usize,
    /// One-line feedback that is not an operation error (exports and such).
    pub notice: Option<String>,
    pub should_quit: bool,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            controller: StudyToolsController::new(),
            focus: Focus::Editor,
            previous_focus: Focus::Editor,
            quiz_progress: None,
            input_scroll_y: 0,
            notes_scroll_y: 0,
            spinner_frame: 0,
            notice: None,
            should_quit: false,
            config,
        }
    }

    pub fn is_busy(&self) -> bool {
        let state = self.controller.state();
        state.loading_notes || state.loading_quiz
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    /// Start `operation` unless it is already loading. Disabling the trigger
    /// mirrors a greyed-out button; the controller would cope either way.
    pub fn trigger(&mut self, operation: Operation) -> Option<PendingRequest> {
        if self.controller.state().is_loading(operation) {
            return None;
        }
        self.notice = None;
        let request = match operation {
            Operation::Notes => {
                self.notes_scroll_y = 0;
                self.controller.begin_notes()
            }
            Operation::Quiz => self.controller.begin_quiz(),
        };
        self.sync_quiz_progress();
        request
    }

    pub fn apply_response(&mut self, response: BackendResponse) {
        let operation = response.operation();
        if self.controller.apply(response) && operation == Operation::Quiz {
            self.quiz_progress = None;
            self.sync_quiz_progress();
            if self.quiz_progress.is_some() && self.focus == Focus::Notes {
                self.focus = Focus::Quiz;
            }
        }
    }

    /// Keep quiz progress in step with the controller's quiz slot.
    fn sync_quiz_progress(&mut self) {
        match &self.controller.state().quiz {
            None => {
                self.quiz_progress = None;
                if self.focus == Focus::Quiz {
                    self.focus = Focus::Editor;
                }
            }
            Some(quiz) if self.quiz_progress.is_none() => {
                self.quiz_progress = Some(QuizProgress::new(quiz));
            }
            Some(_) => {}
        }
    }

    /// Whether the quiz panel has something to show.
    pub fn quiz_visible(&self) -> bool {
        let state = self.controller.state();
        state.quiz.is_some() && !state.loading_quiz
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::Notes,
            Focus::Notes if self.quiz_visible() => Focus::Quiz,
            Focus::Notes | Focus::Quiz => Focus::Editor,
            Focus::QuitConfirm => Focus::QuitConfirm,
        };
    }

    pub fn ask_quit(&mut self) {
        if self.focus != Focus::QuitConfirm {
            self.previous_focus = self.focus;
            self.focus = Focus::QuitConfirm;
        }
    }

    pub fn cancel_quit(&mut self) {
        self.focus = self.previous_focus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QuizQuestion;

    fn app_with(text: &str) -> App {
        let mut app = App::new(Config::default());
        app.controller.set_input(text);
        app
    }

    #[test]
    fn test_trigger_is_ignored_while_loading() {
        let mut app = app_with("text");
        assert!(app.trigger(Operation::Notes).is_some());
        assert!(app.trigger(Operation::Notes).is_none());
        assert!(app.trigger(Operation::Quiz).is_some());
        assert!(app.is_busy());
    }

    #[test]
    fn test_quiz_response_creates_progress() {
        let mut app = app_with("text");
        let request = app.trigger(Operation::Quiz).unwrap();
        app.focus = Focus::Notes;
        app.apply_response(BackendResponse::Quiz {
            request_id: request.request_id,
            result: Ok(vec![QuizQuestion::true_false("Q", true)]),
        });
        assert_eq!(app.quiz_progress.as_ref().map(|p| p.total()), Some(1));
        assert_eq!(app.focus, Focus::Quiz);
        assert!(app.quiz_visible());
    }

    #[test]
    fn test_notes_trigger_drops_quiz_progress() {
        let mut app = app_with("text");
        let request = app.trigger(Operation::Quiz).unwrap();
        app.apply_response(BackendResponse::Quiz {
            request_id: request.request_id,
            result: Ok(vec![QuizQuestion::true_false("Q", true)]),
        });
        app.focus = Focus::Quiz;

        app.trigger(Operation::Notes).unwrap();
        assert!(app.quiz_progress.is_none());
        assert_eq!(app.focus, Focus::Editor);
    }

    #[test]
    fn test_quit_dialog_restores_focus() {
        let mut app = app_with("");
        app.focus = Focus::Notes;
        app.ask_quit();
        assert_eq!(app.focus, Focus::QuitConfirm);
        app.cancel_quit();
        assert_eq!(app.focus, Focus::Notes);
    }

    #[test]
    fn test_focus_cycle_skips_hidden_quiz() {
        let mut app = app_with("");
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Notes);
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Editor);
    }
}
