//! Login screen rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::state::{AppState, LoginField};
use crate::theme::theme;

use super::helpers::{centered_rect, hints, input_line};

/// Render the credential prompt centered on the canvas.
pub fn render_login(f: &mut Frame, app: &AppState) {
    let th = theme();
    let area = centered_rect(50, 50, f.area());

    let card = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.lavender))
        .title(Span::styled(
            " Turmalin ",
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ));
    let inner = card.inner(area);
    f.render_widget(card, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // heading
            Constraint::Length(1), // username label
            Constraint::Length(1), // username value
            Constraint::Length(1), // password label
            Constraint::Length(1), // password value
            Constraint::Length(2), // status
            Constraint::Min(1),    // hints
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "School management sign-in",
            Style::default().fg(th.subtext),
        ))),
        rows[0],
    );

    let label = |text: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.subtext)
        };
        Paragraph::new(Line::from(Span::styled(text.to_string(), style)))
    };
    let user_focus = app.login.field == LoginField::Username;
    f.render_widget(label("Username", user_focus), rows[1]);
    f.render_widget(
        Paragraph::new(input_line(
            &app.login.username,
            user_focus,
            false,
            rows[2].width,
            &th,
        )),
        rows[2],
    );
    f.render_widget(label("Password", !user_focus), rows[3]);
    f.render_widget(
        Paragraph::new(input_line(
            &app.login.password,
            !user_focus,
            true,
            rows[4].width,
            &th,
        )),
        rows[4],
    );

    let status = if app.login.busy {
        Line::from(Span::styled(
            "Signing in\u{2026}",
            Style::default().fg(th.yellow),
        ))
    } else if let Some(err) = &app.login.error {
        Line::from(Span::styled(err.clone(), Style::default().fg(th.red)))
    } else {
        Line::default()
    };
    f.render_widget(Paragraph::new(status), rows[5]);

    f.render_widget(
        Paragraph::new(vec![
            hints(
                &[("Enter", "sign in"), ("Tab", "switch field"), ("Esc", "quit")],
                &th,
            ),
            Line::default(),
            Line::from(Span::styled(
                "Default credentials: admin / admin123",
                Style::default().fg(th.subtext),
            )),
        ]),
        rows[6],
    );
}
