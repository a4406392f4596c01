//! Small rendering helpers shared by the screens.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

/// What: Keep the tail of `value` that fits into `max_width` columns.
///
/// Inputs:
/// - `value`: Full input buffer
/// - `max_width`: Available display columns
///
/// Output:
/// - The widest suffix that fits, so the caret end of a long input stays
///   visible while typing.
pub fn visible_tail(value: &str, max_width: u16) -> String {
    let max = usize::from(max_width);
    let mut width = 0usize;
    let mut chars: Vec<char> = Vec::new();
    for c in value.chars().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        chars.push(c);
    }
    chars.into_iter().rev().collect()
}

/// Render an input value line with a caret block when focused.
pub fn input_line(value: &str, focused: bool, masked: bool, width: u16, th: &Theme) -> Line<'static> {
    let shown = if masked {
        "\u{2022}".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    // Reserve one column for the caret.
    let tail = visible_tail(&shown, width.saturating_sub(1));
    let mut spans = vec![Span::styled(tail, Style::default().fg(th.text))];
    if focused {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().fg(th.sapphire),
        ));
    }
    Line::from(spans)
}

/// Build a key-hint line like `[q] quit  [r] refresh`.
pub fn hints(pairs: &[(&str, &str)], th: &Theme) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::with_capacity(pairs.len() * 2);
    for (key, label) in pairs {
        spans.push(Span::styled(
            format!("[{key}] "),
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{label}  "),
            Style::default().fg(th.subtext),
        ));
    }
    Line::from(spans)
}

/// Centered sub-rectangle taking `percent_x`/`percent_y` of `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Pad or cut `text` to exactly `width` display columns.
pub fn fixed_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}
