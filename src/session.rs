use crate::app::App;
use crate::file_io::export_study_sheet;
use crate::models::{Focus, Operation, PendingRequest};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

const NOTES_PAGE: u16 = 10;

/// Route a key press. Returns a request for the caller to run when the key
/// started an operation.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<PendingRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }

    if app.focus == Focus::QuitConfirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.should_quit = true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_quit(),
            _ => {}
        }
        return None;
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('n') => app.trigger(Operation::Notes),
            KeyCode::Char('g') => app.trigger(Operation::Quiz),
            KeyCode::Char('l') => {
                app.controller.clear_input();
                app.input_scroll_y = 0;
                None
            }
            KeyCode::Char('s') => {
                export(app);
                None
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => {
            app.ask_quit();
            None
        }
        KeyCode::Tab => {
            app.cycle_focus();
            None
        }
        _ => {
            match app.focus {
                Focus::Editor => handle_editor_key(app, key),
                Focus::Notes => handle_notes_key(app, key),
                Focus::Quiz => handle_quiz_key(app, key),
                Focus::QuitConfirm => {}
            }
            None
        }
    }
}

/// Insert pasted text at the cursor.
pub fn insert_text(app: &mut App, text: &str) {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let state = app.controller.state_mut();
    state.input_buffer.insert_str(state.cursor_position, &normalized);
    state.cursor_position += normalized.len();
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    let state = app.controller.state_mut();
    let buffer = &mut state.input_buffer;
    let cursor = &mut state.cursor_position;
    *cursor = (*cursor).min(buffer.len());

    match key.code {
        KeyCode::Char(c) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        KeyCode::Enter => {
            buffer.insert(*cursor, '\n');
            *cursor += 1;
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_boundary(buffer, *cursor) {
                buffer.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_boundary(buffer, *cursor) {
                buffer.replace_range(*cursor..next, "");
            }
        }
        KeyCode::Left => {
            if let Some(prev) = prev_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => {
            let at = *cursor;
            *cursor = buffer[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
        }
        KeyCode::End => {
            let at = *cursor;
            *cursor = buffer[at..].find('\n').map(|i| at + i).unwrap_or(buffer.len());
        }
        _ => {}
    }
}

fn handle_notes_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.notes_scroll_y = app.notes_scroll_y.saturating_sub(1),
        KeyCode::Down => app.notes_scroll_y = app.notes_scroll_y.saturating_add(1),
        KeyCode::PageUp => app.notes_scroll_y = app.notes_scroll_y.saturating_sub(NOTES_PAGE),
        KeyCode::PageDown => app.notes_scroll_y = app.notes_scroll_y.saturating_add(NOTES_PAGE),
        KeyCode::Home => app.notes_scroll_y = 0,
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    let Some(quiz) = app.controller.state().quiz.as_deref() else {
        return;
    };
    let Some(progress) = app.quiz_progress.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Up => progress.highlight_prev(quiz),
        KeyCode::Down => progress.highlight_next(quiz),
        KeyCode::Left => {
            progress.prev_question();
        }
        KeyCode::Right => {
            progress.next_question();
        }
        KeyCode::Enter => {
            if !progress.submit(quiz) {
                progress.next_question();
            }
        }
        KeyCode::Char('r') => progress.restart(),
        _ => {}
    }
}

fn export(app: &mut App) {
    let state = app.controller.state();
    let Some(notes) = state.notes.as_deref() else {
        app.notice = Some("Nothing to export yet. Generate notes first.".to_string());
        return;
    };
    match export_study_sheet(&app.config.export_dir, notes, state.quiz.as_deref()) {
        Ok(path) => {
            info!(path = %path.display(), "exported study sheet");
            app.notice = Some(format!("Saved {}", path.display()));
        }
        Err(e) => {
            warn!(error = %e, "export failed");
            app.notice = Some(format!("Export failed: {}", e));
        }
    }
}

fn prev_boundary(text: &str, cursor: usize) -> Option<usize> {
    text[..cursor].char_indices().next_back().map(|(i, _)| i)
}

fn next_boundary(text: &str, cursor: usize) -> Option<usize> {
    text[cursor..].chars().next().map(|c| cursor + c.len_utf8())
}
