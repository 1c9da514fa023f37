//! Markdown → ratatui lines for the notes panel.
//!
//! Covers what the summarizer emits: `#`..`###` headings, nested `-`/`*`
//! bullets, numbered items, `>` quotes, `---` rules, fenced code, pipe tables
//! and the inline `**bold**`, `*italic*`, `` `code` `` spans.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[.)]\s+(.*)$").expect("numbered item pattern"));
static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(?P<bold>.+?)\*\*|\*(?P<italic>[^*]+?)\*|`(?P<code>[^`]+)`")
        .expect("inline pattern")
});

pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    let source: Vec<&str> = content.lines().collect();
    let mut out: Vec<Line<'static>> = Vec::new();
    let mut in_code = false;
    let mut i = 0;

    while i < source.len() {
        let raw = source[i];
        let trimmed = raw.trim();

        if trimmed.starts_with("```") {
            in_code = !in_code;
            i += 1;
            continue;
        }
        if in_code {
            out.push(Line::from(Span::styled(
                format!("  {}", raw),
                Style::default().add_modifier(Modifier::DIM),
            )));
            i += 1;
            continue;
        }

        if is_table_row(raw) && source.get(i + 1).is_some_and(|next| is_table_separator(next)) {
            let mut rows = vec![split_table_row(raw)];
            i += 2;
            while i < source.len() && is_table_row(source[i]) && !is_table_separator(source[i]) {
                rows.push(split_table_row(source[i]));
                i += 1;
            }
            push_table(&rows, &mut out);
            continue;
        }

        out.push(render_block_line(raw));
        i += 1;
    }

    out
}

fn render_block_line(raw: &str) -> Line<'static> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Line::from("");
    }

    if let Some((level, heading)) = heading(trimmed) {
        let style = match level {
            1 => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            2 => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            _ => Style::default().add_modifier(Modifier::BOLD),
        };
        return Line::from(Span::styled(heading.to_string(), style));
    }

    if is_rule(trimmed) {
        return Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(quote) = trimmed.strip_prefix('>') {
        let mut spans = vec![Span::styled("│ ", Style::default().fg(Color::DarkGray))];
        spans.extend(
            inline_spans(quote.trim_start())
                .into_iter()
                .map(|s| s.patch_style(Style::default().add_modifier(Modifier::ITALIC))),
        );
        return Line::from(spans);
    }

    // two spaces of source indentation per nesting level
    let depth = (raw.len() - raw.trim_start().len()) / 2;
    let indent = "  ".repeat(depth + 1);

    if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        let bullet = if depth == 0 { "• " } else { "◦ " };
        let mut spans = vec![Span::from(format!("{}{}", indent, bullet))];
        spans.extend(inline_spans(item));
        return Line::from(spans);
    }

    if let Some(caps) = NUMBERED_ITEM.captures(trimmed) {
        let mut spans = vec![Span::from(format!("{}{}. ", indent, &caps[1]))];
        spans.extend(inline_spans(caps.get(2).map_or("", |m| m.as_str())));
        return Line::from(spans);
    }

    Line::from(inline_spans(trimmed))
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&level) {
        line[level..].strip_prefix(' ').map(|rest| (level, rest.trim()))
    } else {
        None
    }
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3
        && (line.chars().all(|c| c == '-') || line.chars().all(|c| c == '*') || line.chars().all(|c| c == '_'))
}

fn inline_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::from(text[last..whole.start()].to_string()));
        }
        if let Some(bold) = caps.name("bold") {
            spans.push(Span::styled(
                bold.as_str().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        } else if let Some(italic) = caps.name("italic") {
            spans.push(Span::styled(
                italic.as_str().to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(code) = caps.name("code") {
            spans.push(Span::styled(
                code.as_str().to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }
        last = whole.end();
    }

    if last < text.len() || spans.is_empty() {
        spans.push(Span::from(text[last..].to_string()));
    }
    spans
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.len() > 1
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-') && trimmed.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn split_table_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Narrow panels cannot fit columns, so each data row becomes a block of
/// "Header: value" lines.
fn push_table(rows: &[Vec<String>], out: &mut Vec<Line<'static>>) {
    let Some((headers, data)) = rows.split_first() else {
        return;
    };
    if data.is_empty() {
        out.push(Line::from(Span::styled(
            headers.join(" │ "),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        return;
    }
    for (n, row) in data.iter().enumerate() {
        if n > 0 {
            out.push(Line::from(""));
        }
        for (col, cell) in row.iter().enumerate() {
            let header = headers.get(col).map(String::as_str).unwrap_or("");
            let mut spans = vec![Span::styled(
                format!("{}: ", header),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            spans.extend(inline_spans(cell));
            out.push(Line::from(spans));
        }
    }
}
