//! Modal dialog rendering layered over the active screen.

use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::state::{AppState, Modal};
use crate::theme::theme;

use super::helpers::centered_rect;

/// Render the active modal, if any.
pub fn render_modal(f: &mut Frame, app: &AppState) {
    let th = theme();
    let (title, body, accent) = match &app.modal {
        Modal::None => return,
        Modal::Alert { message } => (" Notice ", message.clone(), th.yellow),
        Modal::ConfirmDeleteAluno { nome, .. } => (
            " Delete student ",
            format!("Delete student \"{nome}\"?\n\nEnter to confirm, Esc to cancel."),
            th.red,
        ),
        Modal::ConfirmDeleteTurma { nome, .. } => (
            " Delete class ",
            format!(
                "Delete class \"{nome}\"?\nAll of its students will be deleted as well.\n\nEnter to confirm, Esc to cancel."
            ),
            th.red,
        ),
    };

    let area = centered_rect(50, 35, f.area());
    f.render_widget(Clear, area);
    let lines: Vec<Line> = body
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(th.text))))
        .collect();
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent))
                .title(Span::styled(
                    title,
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                )),
        ),
        area,
    );
}
