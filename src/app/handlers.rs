//! Folding worker responses into `AppState`.
//!
//! Every handler runs on the event loop; nothing here blocks. An
//! [`ApiError::Auth`] from any worker drops the session and routes to the
//! login screen; other failures become the dismissible banner and leave the
//! previous data in place.

use tokio::sync::mpsc;

use crate::api::{ApiError, validation_messages};
use crate::events::{Senders, logout};
use crate::logic;
use crate::session::{Session, SessionStore};
use crate::state::{Aluno, AppState, DeleteRequest, Page, Route, Turma, TurmaDetailState};
use crate::util;

use super::channels::{AlunoPageOutcome, DeleteOutcome, DetailOutcome, InitOutcome, SaveOutcome};

/// Surface a non-validation failure: logout on auth, banner otherwise.
fn fail(app: &mut AppState, session: &SessionStore, err: &ApiError, context: &str) {
    if matches!(err, ApiError::Auth) {
        logout(app, session);
        app.login.error = Some("Session expired. Sign in again.".to_string());
        return;
    }
    tracing::warn!(error = %err, context, "request failed");
    app.error = Some(format!("{context}: {err}"));
}

/// Fold the class list into state, keeping selections and filter valid.
fn fold_turmas(app: &mut AppState, page: Page<Turma>) {
    app.turmas = page.results;
    logic::clamp_sel(app.turmas.len(), &mut app.selected_turma, &mut app.turma_state);
    if let Some(idx) = app.filtro_turma
        && idx >= app.turmas.len()
    {
        app.filtro_turma = None;
    }
}

/// What: Fold the combined initial dashboard fetch.
///
/// Details:
/// - Both halves arrive together; the dashboard leaves its loading state only
///   here, so the first render always has classes and students at once.
pub fn handle_init(app: &mut AppState, session: &SessionStore, out: InitOutcome) {
    app.loading_turmas = false;
    app.loading_alunos = false;
    match out.turmas {
        Ok(page) => fold_turmas(app, page),
        Err(err) => {
            fail(app, session, &err, "Could not load classes");
            return;
        }
    }
    match out.alunos {
        Ok(page) => {
            app.total_alunos = page.count;
            app.alunos = logic::view_state(page, 1);
            app.query = Default::default();
            // The initial page outranks any query still in flight.
            app.latest_query_id = app.next_query_id;
            logic::clamp_sel(
                app.alunos.items.len(),
                &mut app.selected_aluno,
                &mut app.aluno_state,
            );
        }
        Err(err) => fail(app, session, &err, "Could not load students"),
    }
}

/// What: Fold one student list result, dropping overtaken responses.
///
/// Details:
/// - Responses older than the newest folded-in query id are stale echoes of
///   an abandoned query and are ignored.
pub fn handle_alunos_page(app: &mut AppState, session: &SessionStore, out: AlunoPageOutcome) {
    if out.id < app.latest_query_id {
        tracing::debug!(id = out.id, latest = app.latest_query_id, "dropping stale student page");
        return;
    }
    app.latest_query_id = out.id;
    app.loading_alunos = false;
    match out.result {
        Ok(page) => {
            app.total_alunos = page.count;
            app.alunos = logic::view_state(page, out.requested_page);
            app.query.page = app.alunos.current_page;
            logic::clamp_sel(
                app.alunos.items.len(),
                &mut app.selected_aluno,
                &mut app.aluno_state,
            );
        }
        Err(err) => fail(app, session, &err, "Could not load students"),
    }
}

/// Fold a class list refresh.
pub fn handle_turmas(
    app: &mut AppState,
    session: &SessionStore,
    result: crate::api::Result<Page<Turma>>,
) {
    app.loading_turmas = false;
    match result {
        Ok(page) => fold_turmas(app, page),
        Err(err) => fail(app, session, &err, "Could not load classes"),
    }
}

/// Fold a class detail result.
pub fn handle_detail(app: &mut AppState, session: &SessionStore, out: DetailOutcome) {
    app.loading_detail = false;
    match out.result {
        Ok((turma, alunos)) => {
            app.detail = Some(TurmaDetailState {
                turma,
                alunos: alunos.results,
            });
            let len = app.detail.as_ref().map_or(0, |d| d.alunos.len());
            logic::clamp_sel(len, &mut app.selected_detail_aluno, &mut app.detail_state);
        }
        Err(err) => fail(app, session, &err, "Could not load class"),
    }
}

/// What: Refresh the student edit form with the freshly fetched entity.
///
/// Details:
/// - Only applies while the matching edit form is still open; an answer for a
///   form the user already left is dropped.
pub fn handle_aluno_fetch(
    app: &mut AppState,
    session: &SessionStore,
    result: crate::api::Result<Aluno>,
) {
    match result {
        Ok(aluno) => {
            if app.route != Route::AlunoForm || app.aluno_form.id != Some(aluno.id) {
                tracing::debug!(id = aluno.id, "dropping student fetch for a closed form");
                return;
            }
            app.aluno_form.nome = aluno.nome;
            app.aluno_form.email = aluno.email;
            app.aluno_form.matricula = aluno.matricula;
            app.aluno_form.data_nascimento = util::format_date(aluno.data_nascimento);
            app.aluno_form.turma_idx = app.turmas.iter().position(|t| t.id == aluno.turma);
        }
        Err(err) => fail(app, session, &err, "Could not load student"),
    }
}

/// What: Fold a login result and kick off the initial dashboard fetch.
pub fn handle_login(
    app: &mut AppState,
    session_result: crate::api::Result<Session>,
    init_tx: &mpsc::UnboundedSender<()>,
) {
    app.login.busy = false;
    match session_result {
        Ok(session) => {
            app.username = Some(session.username);
            app.login = Default::default();
            app.route = Route::Dashboard;
            app.loading_turmas = true;
            app.loading_alunos = true;
            let _ = init_tx.send(());
        }
        Err(ApiError::Auth) => {
            app.login.error = Some("Invalid username or password".to_string());
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            app.login.error = Some(err.to_string());
        }
    }
}

/// What: Fold a save result: close the form and refresh, or show errors.
///
/// Details:
/// - Validation failures land inline on the form with the buffers untouched.
/// - Other failures keep the form open and raise the banner.
pub fn handle_save(
    app: &mut AppState,
    session: &SessionStore,
    out: SaveOutcome,
    tx: &Senders,
) {
    match out {
        SaveOutcome::Turma(Ok(turma)) => {
            app.turma_form.busy = false;
            let origin = app.form_origin;
            app.route = origin;
            app.loading_turmas = true;
            let _ = tx.turmas_tx.send(());
            if origin == Route::TurmaDetail {
                app.loading_detail = true;
                let _ = tx.detail_tx.send(turma.id);
            }
        }
        SaveOutcome::Turma(Err(ApiError::Validation { errors })) => {
            app.turma_form.busy = false;
            app.turma_form.errors = validation_messages(&errors);
        }
        SaveOutcome::Turma(Err(err)) => {
            app.turma_form.busy = false;
            fail(app, session, &err, "Could not save class");
        }
        SaveOutcome::Aluno(Ok(aluno)) => {
            app.aluno_form.busy = false;
            let origin = app.form_origin;
            app.route = origin;
            // Counts changed on both entities; re-fetch what the screen shows.
            logic::refresh_current(app, &tx.query_tx);
            app.loading_turmas = true;
            let _ = tx.turmas_tx.send(());
            if origin == Route::TurmaDetail {
                app.loading_detail = true;
                let _ = tx.detail_tx.send(aluno.turma);
            }
        }
        SaveOutcome::Aluno(Err(ApiError::Validation { errors })) => {
            app.aluno_form.busy = false;
            app.aluno_form.errors = validation_messages(&errors);
        }
        SaveOutcome::Aluno(Err(err)) => {
            app.aluno_form.busy = false;
            fail(app, session, &err, "Could not save student");
        }
    }
}

/// What: Fold a deletion result and re-fetch the affected lists.
///
/// Details:
/// - Student deletions re-fetch through the page reconciliation in
///   `logic::refresh_after_delete`, stepping off a page the deletion emptied.
/// - Class deletions cascade server-side, so the student list and any filter
///   pointing at the deleted class are reset as well.
pub fn handle_delete(
    app: &mut AppState,
    session: &SessionStore,
    out: DeleteOutcome,
    tx: &Senders,
) {
    let context = match out.request {
        DeleteRequest::Turma(_) => "Could not delete class",
        DeleteRequest::Aluno(_) => "Could not delete student",
    };
    if let Err(err) = out.result {
        fail(app, session, &err, context);
        return;
    }
    match out.request {
        DeleteRequest::Aluno(id) => {
            tracing::info!(id, "student deleted");
            logic::refresh_after_delete(app, &tx.query_tx);
            app.loading_turmas = true;
            let _ = tx.turmas_tx.send(());
            if app.route == Route::TurmaDetail
                && let Some(turma_id) = app.detail.as_ref().map(|d| d.turma.id)
            {
                app.loading_detail = true;
                let _ = tx.detail_tx.send(turma_id);
            }
        }
        DeleteRequest::Turma(id) => {
            tracing::info!(id, "class deleted");
            // Drop filters that pointed at the deleted class before re-fetching.
            if app
                .filtro_turma
                .and_then(|i| app.turmas.get(i))
                .is_some_and(|t| t.id == id)
            {
                app.filtro_turma = None;
            }
            if app.query.turma == Some(id) {
                app.query.turma = None;
                app.query.page = 1;
            }
            if app.route == Route::TurmaDetail {
                app.route = Route::Turmas;
                app.detail = None;
            }
            app.loading_turmas = true;
            let _ = tx.turmas_tx.send(());
            logic::refresh_current(app, &tx.query_tx);
        }
    }
}
