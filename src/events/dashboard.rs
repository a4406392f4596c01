//! Key handling for the dashboard: filters, table navigation, paging.

use crossterm::event::{KeyCode, KeyEvent};

use crate::logic;
use crate::session::SessionStore;
use crate::state::{AppState, DashFocus, Modal, Route};

use super::{Senders, forms, logout};

/// What: Handle one key press on the dashboard.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Application state
/// - `session`: Session store (for the explicit logout key)
/// - `tx`: Worker senders
///
/// Output:
/// - `true` when the user asked to quit.
pub fn handle_key(
    ke: KeyEvent,
    app: &mut AppState,
    session: &SessionStore,
    tx: &Senders,
) -> bool {
    match app.dash_focus {
        DashFocus::NameFilter => handle_name_filter(ke, app, tx),
        DashFocus::TurmaFilter => handle_turma_filter(ke, app, tx),
        DashFocus::Table => return handle_table(ke, app, session, tx),
    }
    false
}

/// Keys while the name filter input is focused.
fn handle_name_filter(ke: KeyEvent, app: &mut AppState, tx: &Senders) {
    match ke.code {
        KeyCode::Esc => app.dash_focus = DashFocus::Table,
        KeyCode::Tab => app.dash_focus = app.dash_focus.next(),
        KeyCode::Enter => {
            logic::apply_filters(app, &tx.query_tx);
            app.dash_focus = DashFocus::Table;
        }
        KeyCode::Backspace => {
            app.filtro_nome.pop();
        }
        KeyCode::Char(c) => app.filtro_nome.push(c),
        _ => {}
    }
}

/// Keys while the class filter selector is focused.
fn handle_turma_filter(ke: KeyEvent, app: &mut AppState, tx: &Senders) {
    match ke.code {
        KeyCode::Esc => app.dash_focus = DashFocus::Table,
        KeyCode::Tab => app.dash_focus = app.dash_focus.next(),
        KeyCode::Enter => {
            logic::apply_filters(app, &tx.query_tx);
            app.dash_focus = DashFocus::Table;
        }
        KeyCode::Left | KeyCode::Up => {
            app.filtro_turma = match app.filtro_turma {
                None => None,
                Some(0) => None,
                Some(i) => Some(i - 1),
            };
        }
        KeyCode::Right | KeyCode::Down => {
            if !app.turmas.is_empty() {
                let last = app.turmas.len() - 1;
                app.filtro_turma = Some(match app.filtro_turma {
                    None => 0,
                    Some(i) => (i + 1).min(last),
                });
            }
        }
        _ => {}
    }
}

/// Keys while the student table is focused.
fn handle_table(ke: KeyEvent, app: &mut AppState, session: &SessionStore, tx: &Senders) -> bool {
    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => {
            if app.error.is_some() {
                app.error = None;
            }
        }
        KeyCode::Tab => app.dash_focus = app.dash_focus.next(),
        KeyCode::Char('/') => app.dash_focus = DashFocus::NameFilter,
        KeyCode::Char('f') => app.dash_focus = DashFocus::TurmaFilter,
        KeyCode::Up | KeyCode::Char('k') => logic::move_sel(
            app.alunos.items.len(),
            &mut app.selected_aluno,
            &mut app.aluno_state,
            -1,
        ),
        KeyCode::Down | KeyCode::Char('j') => logic::move_sel(
            app.alunos.items.len(),
            &mut app.selected_aluno,
            &mut app.aluno_state,
            1,
        ),
        KeyCode::Left | KeyCode::Char('h') => {
            if app.alunos.can_prev {
                let mut query = app.query.clone();
                query.page = query.page.saturating_sub(1).max(1);
                logic::send_query(app, &tx.query_tx, query);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.alunos.can_next {
                let mut query = app.query.clone();
                query.page += 1;
                logic::send_query(app, &tx.query_tx, query);
            }
        }
        KeyCode::Home => {
            if app.alunos.current_page > 1 {
                let mut query = app.query.clone();
                query.page = 1;
                logic::send_query(app, &tx.query_tx, query);
            }
        }
        KeyCode::End => {
            if app.alunos.can_next {
                let mut query = app.query.clone();
                query.page = app.alunos.total_pages.max(1);
                logic::send_query(app, &tx.query_tx, query);
            }
        }
        KeyCode::Char('r') => {
            logic::refresh_current(app, &tx.query_tx);
            app.loading_turmas = true;
            let _ = tx.turmas_tx.send(());
        }
        KeyCode::Char('n') => {
            if app.turmas.is_empty() {
                // A student must reference an existing class.
                app.modal = Modal::Alert {
                    message: "Register a class before adding students.".to_string(),
                };
            } else {
                forms::open_new_aluno(app, Route::Dashboard);
            }
        }
        KeyCode::Char('e') => {
            if let Some(aluno) = app.selected_aluno().cloned() {
                forms::open_edit_aluno(app, &aluno, Route::Dashboard);
                // Refresh the buffers from the backend in case the row is stale.
                let _ = tx.aluno_tx.send(aluno.id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some((id, nome)) = app.selected_aluno().map(|a| (a.id, a.nome.clone())) {
                app.modal = Modal::ConfirmDeleteAluno { id, nome };
            }
        }
        KeyCode::Char('t') => {
            logic::clamp_sel(app.turmas.len(), &mut app.selected_turma, &mut app.turma_state);
            app.route = Route::Turmas;
        }
        KeyCode::Char('x') => logout(app, session),
        _ => {}
    }
    false
}
