//! Event handling layer for Turmalin's TUI.
//!
//! `handle_event` dispatches one terminal event: modals first, then the
//! handler of the active route. Handlers mutate [`AppState`] and talk to the
//! background workers through the senders they are given; none of them block.

use crossterm::event::{Event as CEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::session::SessionStore;
use crate::state::{AlunoQuery, AppState, Credentials, DeleteRequest, Modal, Route, SaveRequest};

mod dashboard;
mod forms;
mod login;
mod turmas;

/// Senders the key handlers use to reach the background workers.
pub struct Senders {
    /// Student list queries.
    pub query_tx: mpsc::UnboundedSender<AlunoQuery>,
    /// Class list refreshes.
    pub turmas_tx: mpsc::UnboundedSender<()>,
    /// Class detail fetches (class id).
    pub detail_tx: mpsc::UnboundedSender<i64>,
    /// Fresh single-student fetches when an edit form opens (student id).
    pub aluno_tx: mpsc::UnboundedSender<i64>,
    /// Create/update requests.
    pub save_tx: mpsc::UnboundedSender<SaveRequest>,
    /// Deletion requests.
    pub delete_tx: mpsc::UnboundedSender<DeleteRequest>,
    /// Login attempts.
    pub login_tx: mpsc::UnboundedSender<Credentials>,
}

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: Terminal event from the reader thread
/// - `app`: Application state
/// - `session`: Session store, cleared directly on an explicit logout
/// - `tx`: Worker senders
///
/// Output:
/// - `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(ev: CEvent, app: &mut AppState, session: &SessionStore, tx: &Senders) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }

    if handle_modal(ke, app, tx) {
        return false;
    }

    match app.route {
        Route::Login => login::handle_key(ke, app, tx),
        Route::Dashboard => dashboard::handle_key(ke, app, session, tx),
        Route::Turmas | Route::TurmaDetail => turmas::handle_key(ke, app, tx),
        Route::TurmaForm | Route::AlunoForm => forms::handle_key(ke, app, tx),
    }
}

/// Consume the event when a modal is open. Returns `true` when handled.
fn handle_modal(ke: KeyEvent, app: &mut AppState, tx: &Senders) -> bool {
    use crossterm::event::KeyCode;
    match &app.modal {
        Modal::None => false,
        Modal::Alert { .. } => {
            if matches!(ke.code, KeyCode::Enter | KeyCode::Esc) {
                app.modal = Modal::None;
            }
            true
        }
        Modal::ConfirmDeleteAluno { id, .. } => {
            match ke.code {
                KeyCode::Enter => {
                    let _ = tx.delete_tx.send(DeleteRequest::Aluno(*id));
                    app.modal = Modal::None;
                }
                KeyCode::Esc => app.modal = Modal::None,
                _ => {}
            }
            true
        }
        Modal::ConfirmDeleteTurma { id, .. } => {
            match ke.code {
                KeyCode::Enter => {
                    let _ = tx.delete_tx.send(DeleteRequest::Turma(*id));
                    app.modal = Modal::None;
                }
                KeyCode::Esc => app.modal = Modal::None,
                _ => {}
            }
            true
        }
    }
}

/// What: Drop the session and return to the login screen.
///
/// Inputs:
/// - `app`: Application state to reset
/// - `session`: Store to clear
///
/// Output:
/// - Route set to [`Route::Login`] with per-session data cleared; used both
///   for the explicit logout key and when a worker reports an expired
///   session.
pub fn logout(app: &mut AppState, session: &SessionStore) {
    session.clear();
    app.username = None;
    app.route = Route::Login;
    app.login = Default::default();
    app.turmas.clear();
    app.alunos = Default::default();
    app.detail = None;
    app.total_alunos = 0;
    app.modal = Modal::None;
    tracing::info!("logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> CEvent {
        CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn senders() -> (
        Senders,
        mpsc::UnboundedReceiver<DeleteRequest>,
        mpsc::UnboundedReceiver<Credentials>,
    ) {
        let (query_tx, _) = mpsc::unbounded_channel();
        let (turmas_tx, _) = mpsc::unbounded_channel();
        let (detail_tx, _) = mpsc::unbounded_channel();
        let (aluno_tx, _) = mpsc::unbounded_channel();
        let (save_tx, _) = mpsc::unbounded_channel();
        let (delete_tx, delete_rx) = mpsc::unbounded_channel();
        let (login_tx, login_rx) = mpsc::unbounded_channel();
        (
            Senders {
                query_tx,
                turmas_tx,
                detail_tx,
                aluno_tx,
                save_tx,
                delete_tx,
                login_tx,
            },
            delete_rx,
            login_rx,
        )
    }

    #[test]
    /// What: A confirm modal sends the deletion and closes on Enter
    ///
    /// - Input: ConfirmDeleteAluno modal, Enter key
    /// - Output: DeleteRequest::Aluno on the channel, modal dismissed
    fn confirm_delete_sends_request() {
        let (tx, mut delete_rx, _login_rx) = senders();
        let mut app = AppState::default();
        app.route = Route::Dashboard;
        app.modal = Modal::ConfirmDeleteAluno {
            id: 7,
            nome: "Ana".into(),
        };
        let quit = handle_event(key(KeyCode::Enter), &mut app, &test_store(), &tx);
        assert!(!quit);
        assert_eq!(app.modal, Modal::None);
        assert_eq!(delete_rx.try_recv().unwrap(), DeleteRequest::Aluno(7));
    }

    #[test]
    /// What: Esc cancels a confirm modal without sending anything
    ///
    /// - Input: ConfirmDeleteTurma modal, Esc key
    /// - Output: Modal dismissed, channel empty
    fn esc_cancels_modal() {
        let (tx, mut delete_rx, _login_rx) = senders();
        let mut app = AppState::default();
        app.route = Route::Turmas;
        app.modal = Modal::ConfirmDeleteTurma {
            id: 3,
            nome: "5º Ano A".into(),
        };
        handle_event(key(KeyCode::Esc), &mut app, &test_store(), &tx);
        assert_eq!(app.modal, Modal::None);
        assert!(delete_rx.try_recv().is_err());
    }

    #[test]
    /// What: Typed credentials are submitted from the login screen
    ///
    /// - Input: Username/password typed, Enter pressed
    /// - Output: Credentials message with both values
    fn login_submits_credentials() {
        let (tx, _delete_rx, mut login_rx) = senders();
        let mut app = AppState::default();
        for c in "admin".chars() {
            handle_event(key(KeyCode::Char(c)), &mut app, &test_store(), &tx);
        }
        handle_event(key(KeyCode::Tab), &mut app, &test_store(), &tx);
        for c in "admin123".chars() {
            handle_event(key(KeyCode::Char(c)), &mut app, &test_store(), &tx);
        }
        handle_event(key(KeyCode::Enter), &mut app, &test_store(), &tx);
        let creds = login_rx.try_recv().unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(&*creds.password, "admin123");
        assert!(app.login.busy);
    }

    fn test_store() -> SessionStore {
        let dir = std::env::temp_dir().join("turmalin-events-test");
        let _ = std::fs::create_dir_all(&dir);
        SessionStore::load(dir.join("session.json"))
    }
}
