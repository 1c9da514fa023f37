use crate::api::QuizQuestion;

/// The learner's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub choice: String,
    pub correct: bool,
}

/// Walk-through state for a received quiz.
#[derive(Debug, Clone)]
pub struct QuizProgress {
    pub current_index: usize,
    /// Highlighted choice within the current question.
    pub highlighted: usize,
    pub answers: Vec<Option<SubmittedAnswer>>,
    total: usize,
}

impl QuizProgress {
    pub fn new(quiz: &[QuizQuestion]) -> Self {
        Self {
            current_index: 0,
            highlighted: 0,
            answers: vec![None; quiz.len()],
            total: quiz.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current_answer(&self) -> Option<&SubmittedAnswer> {
        self.answers.get(self.current_index).and_then(|a| a.as_ref())
    }

    pub fn highlight_next(&mut self, quiz: &[QuizQuestion]) {
        let count = self.choice_count(quiz);
        if count > 0 && self.current_answer().is_none() {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn highlight_prev(&mut self, quiz: &[QuizQuestion]) {
        let count = self.choice_count(quiz);
        if count > 0 && self.current_answer().is_none() {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    /// Lock in the highlighted choice. Questions without choices are revealed
    /// as unscored. Returns `false` when the question was already answered.
    pub fn submit(&mut self, quiz: &[QuizQuestion]) -> bool {
        if self.current_answer().is_some() {
            return false;
        }
        let Some(question) = quiz.get(self.current_index) else {
            return false;
        };
        let choices = question.choices();
        let answer = match choices.get(self.highlighted) {
            Some(choice) => SubmittedAnswer {
                choice: choice.clone(),
                correct: question.is_correct(choice),
            },
            None => SubmittedAnswer {
                choice: String::new(),
                correct: false,
            },
        };
        self.answers[self.current_index] = Some(answer);
        true
    }

    pub fn next_question(&mut self) -> bool {
        if self.current_index + 1 < self.total {
            self.current_index += 1;
            self.highlighted = 0;
            true
        } else {
            false
        }
    }

    pub fn prev_question(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.highlighted = 0;
            true
        } else {
            false
        }
    }

    pub fn restart(&mut self) {
        self.current_index = 0;
        self.highlighted = 0;
        self.answers.iter_mut().for_each(|a| *a = None);
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn score(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| a.as_ref().is_some_and(|a| a.correct))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.answered() == self.total
    }

    fn choice_count(&self, quiz: &[QuizQuestion]) -> usize {
        quiz.get(self.current_index)
            .map(|q| q.choices().len())
            .unwrap_or(0)
    }
}
