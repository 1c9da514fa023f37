pub mod layout;
mod quiz;
mod spinner;
mod summarizer;

pub use layout::{calculate_main_chunks, centered_rect, MainLayout};
pub use quiz::draw_quiz_panel;
pub use spinner::{draw_spinner, QUIZ_SPINNER_TEXT};
pub use summarizer::{draw_editor, draw_notes};

use crate::app::App;
use crate::models::Focus;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MESSAGE_HEIGHT: u16 = 3;

/// Draw the whole screen from `app`.
pub fn draw_app(f: &mut Frame, app: &mut App) {
    let state = app.controller.state();
    let show_quiz = state.loading_quiz || app.quiz_visible();
    let has_message = state.error.is_some() || app.notice.is_some();
    let layout = calculate_main_chunks(
        f.area(),
        show_quiz,
        if has_message { MESSAGE_HEIGHT } else { 0 },
    );

    draw_header(f, layout.header_area);
    draw_editor(f, app, layout.input_area);
    draw_notes(f, app, layout.notes_area);
    if let Some(area) = layout.quiz_area {
        draw_quiz_panel(f, app, area);
    }
    if let Some(area) = layout.message_area {
        draw_message(f, app, area);
    }
    draw_help(f, app, layout.help_area);

    if app.focus == Focus::QuitConfirm {
        draw_quit_confirmation(f);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "AI Study Tools",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Generate structured notes and quizzes from any academic text.",
            Style::default().fg(Color::Gray),
        ),
    ])])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// The single error slot wins over the export notice.
fn draw_message(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let widget = if let Some(error) = app.controller.state().error_message() {
        Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(Span::styled(
                        "Error",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
            )
    } else if let Some(notice) = &app.notice {
        Paragraph::new(truncate_string(notice, width))
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::ALL))
    } else {
        return;
    };
    f.render_widget(widget, area);
}

fn key_span(key: &'static str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(key, style)
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();

    let first = Line::from(vec![
        key_span("Ctrl+N", !state.loading_notes),
        Span::from(" Generate Notes  "),
        key_span("Ctrl+G", !state.loading_quiz),
        Span::from(" Generate Quiz  "),
        key_span("Ctrl+S", state.notes.is_some()),
        Span::from(" Export  "),
        key_span("Ctrl+L", true),
        Span::from(" Clear Text"),
    ]);

    let mut second = vec![key_span("Tab", true), Span::from(" Switch Panel  ")];
    match app.focus {
        Focus::Notes => second.extend([key_span("↑/↓ PgUp/PgDn", true), Span::from(" Scroll  ")]),
        Focus::Quiz => second.extend([
            key_span("↑/↓", true),
            Span::from(" Choose  "),
            key_span("Enter", true),
            Span::from(" Answer/Next  "),
            key_span("←/→", true),
            Span::from(" Question  "),
            key_span("r", true),
            Span::from(" Restart  "),
        ]),
        Focus::Editor | Focus::QuitConfirm => {}
    }
    second.extend([
        key_span("Esc", true),
        Span::from(" Quit  "),
        key_span("Ctrl+C", true),
        Span::from(" Exit"),
    ]);

    let help = Paragraph::new(vec![first, Line::from(second)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Quit Study Tools?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Unsaved notes and quiz results will be lost."),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Yes  "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::from(" No"),
        ]),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Confirm"));
    f.render_widget(dialog, area);
}
