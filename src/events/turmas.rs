//! Key handling for the class list and class detail screens.

use crossterm::event::{KeyCode, KeyEvent};

use crate::logic;
use crate::state::{AppState, Modal, Route};

use super::{Senders, forms};

/// What: Handle one key press on the class list or detail screen.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Application state
/// - `tx`: Worker senders
///
/// Output:
/// - `true` when the user asked to quit.
pub fn handle_key(ke: KeyEvent, app: &mut AppState, tx: &Senders) -> bool {
    match app.route {
        Route::TurmaDetail => handle_detail(ke, app, tx),
        _ => handle_list(ke, app, tx),
    }
}

/// Keys on the class list.
fn handle_list(ke: KeyEvent, app: &mut AppState, tx: &Senders) -> bool {
    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Char('b') => {
            if app.error.is_some() {
                app.error = None;
            } else {
                app.route = Route::Dashboard;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => logic::move_sel(
            app.turmas.len(),
            &mut app.selected_turma,
            &mut app.turma_state,
            -1,
        ),
        KeyCode::Down | KeyCode::Char('j') => logic::move_sel(
            app.turmas.len(),
            &mut app.selected_turma,
            &mut app.turma_state,
            1,
        ),
        KeyCode::Enter => {
            if let Some(id) = app.selected_turma().map(|t| t.id) {
                app.loading_detail = true;
                let _ = tx.detail_tx.send(id);
                app.route = Route::TurmaDetail;
            }
        }
        KeyCode::Char('n') => forms::open_new_turma(app),
        KeyCode::Char('e') => {
            if let Some(turma) = app.selected_turma().cloned() {
                forms::open_edit_turma(app, &turma);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some((id, nome)) = app.selected_turma().map(|t| (t.id, t.nome.clone())) {
                app.modal = Modal::ConfirmDeleteTurma { id, nome };
            }
        }
        KeyCode::Char('r') => {
            app.loading_turmas = true;
            let _ = tx.turmas_tx.send(());
        }
        _ => {}
    }
    false
}

/// Keys on the class detail screen.
fn handle_detail(ke: KeyEvent, app: &mut AppState, tx: &Senders) -> bool {
    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Char('b') => {
            if app.error.is_some() {
                app.error = None;
            } else {
                app.route = Route::Turmas;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let len = app.detail.as_ref().map_or(0, |d| d.alunos.len());
            logic::move_sel(
                len,
                &mut app.selected_detail_aluno,
                &mut app.detail_state,
                -1,
            );
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = app.detail.as_ref().map_or(0, |d| d.alunos.len());
            logic::move_sel(
                len,
                &mut app.selected_detail_aluno,
                &mut app.detail_state,
                1,
            );
        }
        KeyCode::Char('e') => {
            if let Some(turma) = app.detail.as_ref().map(|d| d.turma.clone()) {
                forms::open_edit_turma(app, &turma);
            }
        }
        KeyCode::Char('a') => {
            if let Some(turma_id) = app.detail.as_ref().map(|d| d.turma.id) {
                forms::open_new_aluno(app, Route::TurmaDetail);
                app.aluno_form.turma_idx = app.turmas.iter().position(|t| t.id == turma_id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let selected = app
                .detail
                .as_ref()
                .and_then(|d| d.alunos.get(app.selected_detail_aluno))
                .map(|a| (a.id, a.nome.clone()));
            if let Some((id, nome)) = selected {
                app.modal = Modal::ConfirmDeleteAluno { id, nome };
            }
        }
        KeyCode::Char('r') => {
            if let Some(id) = app.detail.as_ref().map(|d| d.turma.id) {
                app.loading_detail = true;
                let _ = tx.detail_tx.send(id);
            }
        }
        _ => {}
    }
    false
}
