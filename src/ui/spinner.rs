use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const QUIZ_SPINNER_TEXT: &str = "Building your quiz...";

/// A bordered panel with a single centred spinner line.
pub fn draw_spinner(f: &mut Frame, area: Rect, frame: &str, text: &str, title: &str) {
    let top_padding = area.height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(vec![
        Span::styled(
            frame.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" "),
        Span::from(text.to_string()),
    ]));

    let spinner = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(spinner, area);
}
