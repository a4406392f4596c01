//! Rendering layer: one function per screen plus shared helpers.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::{AppState, Route};
use crate::theme::theme;

pub mod helpers;

mod dashboard;
mod forms;
mod login;
mod modals;
mod turmas;

/// What: Draw the whole frame for the current state.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Application state (list states are mutated while rendering)
///
/// Output:
/// - Renders the active route, the error banner when set, and any modal on
///   top.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    if app.route == Route::Login {
        login::render_login(f, app);
        modals::render_modal(f, app);
        return;
    }

    let th = theme();
    let banner_height = u16::from(app.error.is_some());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(banner_height),
        ])
        .split(f.area());

    render_header(f, app, rows[0]);
    match app.route {
        Route::Login => {}
        Route::Dashboard => dashboard::render_dashboard(f, app, rows[1]),
        Route::Turmas => turmas::render_turmas(f, app, rows[1]),
        Route::TurmaDetail => turmas::render_turma_detail(f, app, rows[1]),
        Route::TurmaForm => forms::render_turma_form(f, app, rows[1]),
        Route::AlunoForm => forms::render_aluno_form(f, app, rows[1]),
    }

    if let Some(err) = &app.error {
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    " error ",
                    Style::default()
                        .fg(th.base)
                        .bg(th.red)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {err} (Esc to dismiss)"), Style::default().fg(th.red)),
            ])),
            rows[2],
        );
    }

    modals::render_modal(f, app);
}

/// One-line header: app name, signed-in user, current screen.
fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let screen = match app.route {
        Route::Login => "sign in",
        Route::Dashboard => "dashboard",
        Route::Turmas => "classes",
        Route::TurmaDetail => "class detail",
        Route::TurmaForm => "class form",
        Route::AlunoForm => "student form",
    };
    let user = app.username.as_deref().unwrap_or("-");
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                " Turmalin ",
                Style::default()
                    .fg(th.base)
                    .bg(th.mauve)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {screen}"), Style::default().fg(th.subtext)),
            Span::styled(
                format!("  \u{2022}  {user}"),
                Style::default().fg(th.sapphire),
            ),
        ])),
        area,
    );
}
