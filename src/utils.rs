pub mod markdown;

pub use markdown::render_markdown;

use ratatui::text::Text;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `s` to at most `max_chars` characters, ending in "...".
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Byte range `start..end` of one visual row of wrapped editor text.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VisualRow {
    start: usize,
    end: usize,
}

/// Break `text` into rows at character boundaries: hard breaks at '\n',
/// soft breaks when a row would exceed `max_width` columns. Nothing is
/// trimmed, so a row's display width is the width of its source slice.
fn wrap_rows(text: &str, max_width: usize) -> Vec<VisualRow> {
    let max_width = max_width.max(1);
    let mut rows = Vec::new();
    let mut width = 0;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            rows.push(VisualRow { start, end: idx });
            width = 0;
            start = idx + 1;
            continue;
        }

        let ch_width = ch.width().unwrap_or(0);
        if width > 0 && width + ch_width > max_width {
            rows.push(VisualRow { start, end: idx });
            width = 0;
            start = idx;
        }
        width += ch_width;
    }

    if start < text.len() || text.is_empty() || text.ends_with('\n') {
        rows.push(VisualRow {
            start,
            end: text.len(),
        });
    }

    rows
}

/// The editor's display rows. The editor renders these without further
/// wrapping so the cursor math below matches the screen cell for cell.
pub fn wrap_editor_lines(text: &str, max_width: usize) -> Vec<&str> {
    wrap_rows(text, max_width)
        .into_iter()
        .map(|row| &text[row.start..row.end])
        .collect()
}

/// (row, column) of the byte offset `cursor_index` inside `text` wrapped
/// at `max_width` columns. A cursor sitting after a soft-wrapped or full
/// last row moves to the start of the following row.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor_index == 0 {
        return (0, 0);
    }

    let max_width = max_width.max(1);
    let cursor_index = cursor_index.min(text.len());
    let rows = wrap_rows(text, max_width);
    for (row_idx, row) in rows.iter().enumerate() {
        if cursor_index < row.start || cursor_index > row.end {
            continue;
        }
        let soft_break_follows = rows
            .get(row_idx + 1)
            .is_some_and(|next| next.start == row.end);
        if cursor_index == row.end && soft_break_follows {
            continue;
        }
        let col = text[row.start..cursor_index].width();
        if col >= max_width && row_idx + 1 == rows.len() {
            return (row_idx + 1, 0);
        }
        return (row_idx, col);
    }

    (rows.len().saturating_sub(1), 0)
}

/// Rough number of rows `text` occupies when wrapped at `width` columns.
pub fn estimate_text_height(text: &Text, width: usize) -> usize {
    let width = width.max(1);
    text.lines
        .iter()
        .map(|line| {
            let line_width = line.width();
            if line_width == 0 {
                1
            } else {
                line_width.div_ceil(width)
            }
        })
        .sum()
}

pub fn calculate_max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height
        .saturating_sub(visible_height)
        .min(u16::MAX as usize) as u16
}
