//! Class list and class detail rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};

use crate::state::AppState;
use crate::theme::{Theme, theme};
use crate::util::format_date;

use super::helpers::{fixed_width, hints};

/// Render the class list screen.
pub fn render_turmas(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay))
        .title(" Classes ");

    if app.loading_turmas {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Loading\u{2026}",
                Style::default().fg(th.yellow),
            ))
            .block(block),
            rows[0],
        );
    } else if app.turmas.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No classes registered.",
                Style::default().fg(th.subtext),
            ))
            .block(block),
            rows[0],
        );
    } else {
        let header = Line::from(Span::styled(
            format!(
                "{}{}{}{}",
                fixed_width("Name", 28),
                fixed_width("Year", 8),
                fixed_width("Shift", 10),
                "Students",
            ),
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ));
        let mut items: Vec<ListItem> = vec![ListItem::new(header)];
        for turma in &app.turmas {
            let shift = if turma.turno_display.is_empty() {
                turma.turno.label().to_string()
            } else {
                turma.turno_display.clone()
            };
            items.push(ListItem::new(Line::from(Span::styled(
                format!(
                    "{}{}{}{}",
                    fixed_width(&turma.nome, 28),
                    fixed_width(&turma.ano_letivo.to_string(), 8),
                    fixed_width(&shift, 10),
                    turma.total_alunos,
                ),
                Style::default().fg(th.text),
            ))));
        }
        app.turma_state.select(Some(app.selected_turma + 1));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(th.text).bg(th.surface));
        f.render_stateful_widget(list, rows[0], &mut app.turma_state);
    }

    f.render_widget(
        Paragraph::new(hints(
            &[
                ("Enter", "detail"),
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("r", "refresh"),
                ("b", "back"),
                ("q", "quit"),
            ],
            &th,
        )),
        rows[1],
    );
}

/// Render the class detail screen: class facts plus its students.
pub fn render_turma_detail(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    match (&app.detail, app.loading_detail) {
        (_, true) => {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "Loading\u{2026}",
                    Style::default().fg(th.yellow),
                ))
                .block(detail_block(&th, " Class ")),
                rows[0],
            );
        }
        (Some(d), false) => {
            let t = &d.turma;
            let shift = if t.turno_display.is_empty() {
                t.turno.label().to_string()
            } else {
                t.turno_display.clone()
            };
            let kv = |key: &str, val: String| {
                Line::from(vec![
                    Span::styled(
                        format!("{key}: "),
                        Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(val, Style::default().fg(th.text)),
                ])
            };
            f.render_widget(
                Paragraph::new(vec![
                    kv("Name", t.nome.clone()),
                    kv("School year", t.ano_letivo.to_string()),
                    kv("Shift", shift),
                    kv("Enrolled students", t.total_alunos.to_string()),
                ])
                .block(detail_block(&th, " Class ")),
                rows[0],
            );
        }
        (None, false) => {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "No class loaded.",
                    Style::default().fg(th.subtext),
                ))
                .block(detail_block(&th, " Class ")),
                rows[0],
            );
        }
    }

    let students_block = detail_block(&th, " Students in this class ");
    let alunos = app.detail.as_ref().map(|d| d.alunos.clone()).unwrap_or_default();
    if alunos.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No students enrolled.",
                Style::default().fg(th.subtext),
            ))
            .block(students_block),
            rows[1],
        );
    } else {
        let items: Vec<ListItem> = alunos
            .iter()
            .map(|a| {
                ListItem::new(Line::from(Span::styled(
                    format!(
                        "{}{}{}",
                        fixed_width(&a.nome, 28),
                        fixed_width(&a.matricula, 14),
                        format_date(a.data_nascimento),
                    ),
                    Style::default().fg(th.text),
                )))
            })
            .collect();
        app.detail_state.select(Some(app.selected_detail_aluno));
        let list = List::new(items)
            .block(students_block)
            .highlight_style(Style::default().fg(th.text).bg(th.surface));
        f.render_stateful_widget(list, rows[1], &mut app.detail_state);
    }

    f.render_widget(
        Paragraph::new(hints(
            &[
                ("a", "add student"),
                ("d", "delete student"),
                ("e", "edit class"),
                ("r", "refresh"),
                ("b", "back"),
            ],
            &th,
        )),
        rows[2],
    );
}

/// Rounded bordered block used by both detail panes.
fn detail_block(th: &Theme, title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay))
        .title(title)
}
