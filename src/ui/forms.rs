//! Form rendering for class and student create/edit screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::state::{AlunoField, AppState, TurmaField};
use crate::theme::{Theme, theme};

use super::helpers::{hints, input_line};

/// One labeled field: label row, value row, optional error row.
struct FieldRow<'a> {
    /// Display label.
    label: &'a str,
    /// Wire field name used to look up server-side errors.
    key: &'a str,
    /// Current buffer content (already rendered for selectors).
    value: String,
    /// Whether this field has key focus.
    focused: bool,
    /// Whether the value is a selector cycled with Left/Right.
    selector: bool,
}

/// Render the class form.
pub fn render_turma_form(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let form = &app.turma_form;
    let title = if form.id.is_some() {
        " Edit class "
    } else {
        " New class "
    };
    let fields = [
        FieldRow {
            label: "Name",
            key: "nome",
            value: form.nome.clone(),
            focused: form.field == TurmaField::Nome,
            selector: false,
        },
        FieldRow {
            label: "School year",
            key: "ano_letivo",
            value: form.ano_letivo.clone(),
            focused: form.field == TurmaField::AnoLetivo,
            selector: false,
        },
        FieldRow {
            label: "Shift",
            key: "turno",
            value: form.turno.label().to_string(),
            focused: form.field == TurmaField::Turno,
            selector: true,
        },
    ];
    render_form(f, area, &th, title, &fields, &form.errors, form.busy);
}

/// Render the student form.
pub fn render_aluno_form(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let form = &app.aluno_form;
    let title = if form.id.is_some() {
        " Edit student "
    } else {
        " New student "
    };
    let turma_value = match form.turma_idx.and_then(|i| app.turmas.get(i)) {
        Some(t) => format!("{} - {}", t.nome, t.ano_letivo),
        None => "(no class available)".to_string(),
    };
    let fields = [
        FieldRow {
            label: "Name",
            key: "nome",
            value: form.nome.clone(),
            focused: form.field == AlunoField::Nome,
            selector: false,
        },
        FieldRow {
            label: "E-mail",
            key: "email",
            value: form.email.clone(),
            focused: form.field == AlunoField::Email,
            selector: false,
        },
        FieldRow {
            label: "Enrollment number",
            key: "matricula",
            value: form.matricula.clone(),
            focused: form.field == AlunoField::Matricula,
            selector: false,
        },
        FieldRow {
            label: "Birth date (DD/MM/YYYY)",
            key: "data_nascimento",
            value: form.data_nascimento.clone(),
            focused: form.field == AlunoField::DataNascimento,
            selector: false,
        },
        FieldRow {
            label: "Class",
            key: "turma",
            value: turma_value,
            focused: form.field == AlunoField::Turma,
            selector: true,
        },
    ];
    render_form(f, area, &th, title, &fields, &form.errors, form.busy);
}

/// Shared form renderer: fields stacked vertically, errors inline in red.
fn render_form(
    f: &mut Frame,
    area: Rect,
    th: &Theme,
    title: &'static str,
    fields: &[FieldRow<'_>],
    errors: &std::collections::BTreeMap<String, String>,
    busy: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.lavender))
        .title(Span::styled(
            title,
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints: Vec<Constraint> = Vec::with_capacity(fields.len() * 3 + 2);
    for _ in fields {
        constraints.push(Constraint::Length(1)); // label
        constraints.push(Constraint::Length(1)); // value
        constraints.push(Constraint::Length(1)); // error or spacer
    }
    constraints.push(Constraint::Length(1)); // status
    constraints.push(Constraint::Min(1)); // hints
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in fields.iter().enumerate() {
        let label_style = if field.focused {
            Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.subtext)
        };
        f.render_widget(
            Paragraph::new(Span::styled(field.label.to_string(), label_style)),
            rows[i * 3],
        );
        let value_area = rows[i * 3 + 1];
        let value = if field.selector {
            Line::from(Span::styled(
                format!("\u{25c2} {} \u{25b8}", field.value),
                Style::default().fg(th.text),
            ))
        } else {
            input_line(&field.value, field.focused, false, value_area.width, th)
        };
        f.render_widget(Paragraph::new(value), value_area);
        if let Some(err) = errors.get(field.key) {
            f.render_widget(
                Paragraph::new(Span::styled(
                    err.clone(),
                    Style::default().fg(th.red),
                )),
                rows[i * 3 + 2],
            );
        }
    }

    // Non-field errors surface on the status row.
    let status_row = rows[fields.len() * 3];
    if busy {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Saving\u{2026}",
                Style::default().fg(th.yellow),
            )),
            status_row,
        );
    } else if let Some(msg) = errors.get("error").or_else(|| errors.get("non_field_errors")) {
        f.render_widget(
            Paragraph::new(Span::styled(msg.clone(), Style::default().fg(th.red))),
            status_row,
        );
    }

    f.render_widget(
        Paragraph::new(hints(
            &[
                ("Enter", "save"),
                ("Tab", "next field"),
                ("\u{25c2}\u{25b8}", "cycle selector"),
                ("Esc", "cancel"),
            ],
            th,
        )),
        rows[fields.len() * 3 + 1],
    );
}
