use crate::api::QuizQuestion;
use crate::app::App;
use crate::models::Focus;
use crate::quiz::QuizProgress;
use crate::ui::spinner::{draw_spinner, QUIZ_SPINNER_TEXT};
use crate::ui::summarizer::panel_block;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz_panel(f: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    if state.loading_quiz {
        draw_spinner(f, area, app.spinner(), QUIZ_SPINNER_TEXT, "Quiz");
        return;
    }

    let (Some(quiz), Some(progress)) = (state.quiz.as_deref(), app.quiz_progress.as_ref()) else {
        return;
    };
    let Some(question) = quiz.get(progress.current_index) else {
        return;
    };

    let title = format!(
        "Quiz - Question {} / {}",
        progress.current_index + 1,
        progress.total()
    );
    let body = Paragraph::new(question_text(question, progress))
        .wrap(Wrap { trim: true })
        .block(panel_block(&title, app.focus == Focus::Quiz));
    f.render_widget(body, area);
}

fn question_text(question: &QuizQuestion, progress: &QuizProgress) -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        question.question.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    let submitted = progress.current_answer();
    let choices = question.choices();

    for (i, choice) in choices.iter().enumerate() {
        let (marker, style) = match submitted {
            Some(_) if question.is_correct(choice) => ("✓ ", Style::default().fg(Color::Green)),
            Some(answer) if answer.choice == *choice => ("✗ ", Style::default().fg(Color::Red)),
            Some(_) => ("  ", Style::default().fg(Color::DarkGray)),
            None if i == progress.highlighted => (
                "▶ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            None => ("  ", Style::default()),
        };
        text.push_line(Line::from(Span::styled(format!("{}{}", marker, choice), style)));
    }

    if choices.is_empty() {
        let line = match submitted {
            Some(_) => Line::from(vec![
                Span::styled("Answer: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::from(question.answer.clone()),
            ]),
            None => Line::from(Span::styled(
                "Think it over, then press Enter to reveal the answer.",
                Style::default().fg(Color::DarkGray),
            )),
        };
        text.push_line(line);
    }

    text.push_line(Line::from(""));
    if let Some(answer) = submitted
        && !choices.is_empty()
    {
        let verdict = if answer.correct {
            Span::styled("Correct!", Style::default().fg(Color::Green))
        } else {
            Span::styled(
                format!("Incorrect. Answer: {}", question.answer),
                Style::default().fg(Color::Red),
            )
        };
        text.push_line(Line::from(verdict));
    }

    let score = format!("Score: {} / {}", progress.score(), progress.total());
    if progress.is_complete() {
        text.push_line(Line::from(Span::styled(
            format!("Quiz complete. {}", score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        text.push_line(Line::from(Span::styled(
            score,
            Style::default().fg(Color::DarkGray),
        )));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(text: &Text) -> String {
        text.lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_unanswered_question_highlights_choice() {
        let quiz = vec![QuizQuestion::multiple_choice("Q ______", &["a", "b"], "b")];
        let progress = QuizProgress::new(&quiz);
        let text = rendered(&question_text(&quiz[0], &progress));
        assert!(text.contains("▶ a"));
        assert!(text.contains("  b"));
        assert!(text.contains("Score: 0 / 1"));
    }

    #[test]
    fn test_wrong_answer_marks_both_choices() {
        let quiz = vec![QuizQuestion::multiple_choice("Q ______", &["a", "b"], "b")];
        let mut progress = QuizProgress::new(&quiz);
        progress.submit(&quiz);
        let text = rendered(&question_text(&quiz[0], &progress));
        assert!(text.contains("✗ a"));
        assert!(text.contains("✓ b"));
        assert!(text.contains("Incorrect. Answer: b"));
        assert!(text.contains("Quiz complete. Score: 0 / 1"));
    }
}
