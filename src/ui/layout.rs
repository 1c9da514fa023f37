use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub header_area: Rect,
    pub input_area: Rect,
    pub notes_area: Rect,
    /// Right-hand column, present while a quiz is loading or shown.
    pub quiz_area: Option<Rect>,
    /// Error banner / notice line, present only when there is something to say.
    pub message_area: Option<Rect>,
    pub help_area: Rect,
}

pub fn calculate_main_chunks(area: Rect, show_quiz: bool, message_height: u16) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(message_height),
            Constraint::Length(4),
        ])
        .split(area);

    let (left, quiz_area) = if show_quiz {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        (columns[0], Some(columns[1]))
    } else {
        (chunks[1], None)
    };

    let editor_notes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(3)])
        .split(left);

    MainLayout {
        header_area: chunks[0],
        input_area: editor_notes[0],
        notes_area: editor_notes[1],
        quiz_area,
        message_area: (message_height > 0).then_some(chunks[2]),
        help_area: chunks[3],
    }
}

/// A `percent_x` by `percent_y` rectangle centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
