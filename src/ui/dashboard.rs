//! Dashboard rendering: stats cards, filters, and the student table.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};

use crate::logic::PAGE_SIZE;
use crate::state::{AppState, DashFocus};
use crate::theme::{Theme, theme};
use crate::util::format_date;

use super::helpers::{fixed_width, hints, input_line};

/// Render the dashboard: header, stats, filters, table, footer.
pub fn render_dashboard(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // stats cards
            Constraint::Length(3), // filters
            Constraint::Min(4),    // table
            Constraint::Length(2), // footer
        ])
        .split(area);

    render_stats(f, app, rows[0], &th);
    render_filters(f, app, rows[1], &th);
    render_table(f, app, rows[2], &th);
    render_footer(f, app, rows[3], &th);
}

/// Two stat cards: total classes and total students.
fn render_stats(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let card = |title: &str, value: String, accent| {
        Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                value,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.overlay))
                .title(format!(" {title} ")),
        )
    };
    f.render_widget(
        card("Classes", app.turmas.len().to_string(), th.sapphire),
        cols[0],
    );
    f.render_widget(
        card("Students", app.total_alunos.to_string(), th.green),
        cols[1],
    );
}

/// Name filter input and class filter selector.
fn render_filters(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let border = |focused: bool| {
        Style::default().fg(if focused { th.sapphire } else { th.overlay })
    };

    let name_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border(app.dash_focus == DashFocus::NameFilter))
        .title(" Search by name (/) ");
    let name_inner = name_block.inner(cols[0]);
    f.render_widget(name_block, cols[0]);
    f.render_widget(
        Paragraph::new(input_line(
            &app.filtro_nome,
            app.dash_focus == DashFocus::NameFilter,
            false,
            name_inner.width,
            th,
        )),
        name_inner,
    );

    let turma_label = match app.filtro_turma.and_then(|i| app.turmas.get(i)) {
        Some(t) => format!("{} - {}", t.nome, t.ano_letivo),
        None => "All classes".to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("\u{25c2} {turma_label} \u{25b8}"),
            Style::default().fg(th.text),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border(app.dash_focus == DashFocus::TurmaFilter))
                .title(" Class filter (f) "),
        ),
        cols[1],
    );
}

/// The student table, or a loading/empty message in its place.
fn render_table(f: &mut Frame, app: &mut AppState, area: Rect, th: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if app.dash_focus == DashFocus::Table {
            th.sapphire
        } else {
            th.overlay
        }))
        .title(" Students ");

    if app.dashboard_loading() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Loading\u{2026}",
                Style::default().fg(th.yellow),
            ))
            .block(block),
            area,
        );
        return;
    }
    if app.alunos.items.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No students found.",
                Style::default().fg(th.subtext),
            ))
            .block(block),
            area,
        );
        return;
    }

    let header = Line::from(Span::styled(
        format!(
            "{}{}{}{}{}",
            fixed_width("Name", 24),
            fixed_width("Enrollment", 12),
            fixed_width("E-mail", 28),
            fixed_width("Born", 12),
            "Class",
        ),
        Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
    ));

    let mut items: Vec<ListItem> = vec![ListItem::new(header)];
    for aluno in &app.alunos.items {
        let turma = if aluno.turma_nome.is_empty() {
            "-".to_string()
        } else {
            aluno.turma_nome.clone()
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!(
                "{}{}{}{}{}",
                fixed_width(&aluno.nome, 24),
                fixed_width(&aluno.matricula, 12),
                fixed_width(&aluno.email, 28),
                fixed_width(&format_date(aluno.data_nascimento), 12),
                turma,
            ),
            Style::default().fg(th.text),
        ))));
    }

    // Offset by one for the header row: ratatui selects by item index.
    app.aluno_state.select(Some(app.selected_aluno + 1));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(th.text).bg(th.surface));
    f.render_stateful_widget(list, area, &mut app.aluno_state);
}

/// Pagination summary plus key hints.
fn render_footer(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let v = &app.alunos;
    let summary = if v.count == 0 {
        String::new()
    } else {
        let first = u64::from(v.current_page - 1) * PAGE_SIZE + 1;
        let last = (u64::from(v.current_page) * PAGE_SIZE).min(v.count);
        format!(
            "Page {}/{}  \u{2022}  showing {first} to {last} of {} students",
            v.current_page,
            v.total_pages.max(1),
            v.count,
        )
    };
    f.render_widget(
        Paragraph::new(Span::styled(summary, Style::default().fg(th.subtext))),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(hints(
            &[
                ("h/l", "page"),
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("t", "classes"),
                ("r", "refresh"),
                ("x", "logout"),
                ("q", "quit"),
            ],
            th,
        )),
        rows[1],
    );
}
