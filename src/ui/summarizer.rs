use crate::app::App;
use crate::models::Focus;
use crate::utils::{
    calculate_max_scroll, calculate_wrapped_cursor_position, estimate_text_height, render_markdown,
    wrap_editor_lines,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub(crate) fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

pub fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let state = app.controller.state();
    let input = state.input_buffer.as_str();
    let cursor = state.cursor_position.min(input.len());

    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let (cursor_line, cursor_col) = calculate_wrapped_cursor_position(input, cursor, inner_width);

    // follow the cursor
    let mut scroll = app.input_scroll_y as usize;
    if cursor_line < scroll {
        scroll = cursor_line;
    } else if inner_height > 0 && cursor_line >= scroll + inner_height {
        scroll = cursor_line + 1 - inner_height;
    }

    let content = if input.is_empty() {
        Text::from(Span::styled(
            "[Paste or type the text you want to study...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        // pre-wrapped; Paragraph must not wrap again or the cursor drifts
        Text::from(
            wrap_editor_lines(input, inner_width)
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>(),
        )
    };

    let words = input.split_whitespace().count();
    let title = format!("Source Text ({} words)", words);
    let editor = Paragraph::new(content)
        .scroll((scroll as u16, 0))
        .block(panel_block(&title, focused));
    f.render_widget(editor, area);

    app.input_scroll_y = scroll as u16;

    if focused && inner_width > 0 {
        let x = area.x + 1 + (cursor_col.min(inner_width - 1) as u16);
        let y = area.y + 1 + (cursor_line.saturating_sub(scroll) as u16);
        f.set_cursor_position((x, y));
    }
}

pub fn draw_notes(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Notes;
    let state = app.controller.state();

    let content = if state.loading_notes {
        Text::from(Line::from(vec![
            Span::styled(app.spinner(), Style::default().fg(Color::Yellow)),
            Span::from(" Generating notes..."),
        ]))
    } else if let Some(notes) = &state.notes {
        Text::from(render_markdown(notes))
    } else {
        Text::from(Span::styled(
            "Notes will appear here. Press Ctrl+N to summarize your text.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    };

    let visible = area.height.saturating_sub(2) as usize;
    let width = area.width.saturating_sub(2) as usize;
    let max_scroll = calculate_max_scroll(estimate_text_height(&content, width), visible);
    app.notes_scroll_y = app.notes_scroll_y.min(max_scroll);

    let notes = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((app.notes_scroll_y, 0))
        .block(panel_block("Study Notes", focused));
    f.render_widget(notes, area);
}
