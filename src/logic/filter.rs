//! Filter state and student-list query dispatch.
//!
//! Filter edits live in `AppState` buffers and only become the active
//! [`ListQuery`] on an explicit apply, which always resets to page 1. Every
//! dispatched query carries a monotonic id so the event loop can drop
//! responses that a newer query has overtaken.

use tokio::sync::mpsc;

use crate::logic::pagination::page_after_delete;
use crate::state::{AlunoQuery, AppState, ListQuery};

/// What: Build the query the pending filter buffers describe.
///
/// Inputs:
/// - `app`: Read-only state; uses `filtro_nome` and `filtro_turma`
///
/// Output:
/// - [`ListQuery`] at page 1 with empty buffers mapped to `None`.
pub fn pending_query(app: &AppState) -> ListQuery {
    let nome = app.filtro_nome.trim();
    ListQuery {
        turma: app
            .filtro_turma
            .and_then(|idx| app.turmas.get(idx))
            .map(|t| t.id),
        nome: (!nome.is_empty()).then(|| nome.to_string()),
        page: 1,
    }
}

/// What: Allocate an id and dispatch `query` to the fetch worker.
///
/// Inputs:
/// - `app`: Mutable state; records the query as active and flags loading
/// - `query_tx`: Sender feeding the student-list worker
///
/// Output:
/// - Updates `app.query` and `app.next_query_id`; the send itself is
///   fire-and-forget (a dropped worker ends the process anyway).
pub fn send_query(app: &mut AppState, query_tx: &mpsc::UnboundedSender<AlunoQuery>, query: ListQuery) {
    let id = app.next_query_id;
    app.next_query_id += 1;
    app.loading_alunos = true;
    app.query = query.clone();
    tracing::debug!(
        id,
        page = query.page,
        turma = ?query.turma,
        nome = ?query.nome,
        "dispatching student list query"
    );
    let _ = query_tx.send(AlunoQuery { id, query });
}

/// Apply the pending filters: activate them at page 1 and re-fetch.
pub fn apply_filters(app: &mut AppState, query_tx: &mpsc::UnboundedSender<AlunoQuery>) {
    let query = pending_query(app);
    send_query(app, query_tx, query);
}

/// Re-fetch the current page with the active filters unchanged.
pub fn refresh_current(app: &mut AppState, query_tx: &mpsc::UnboundedSender<AlunoQuery>) {
    let query = app.query.clone();
    send_query(app, query_tx, query);
}

/// What: Re-fetch after a student deletion, stepping off an emptied page.
///
/// Inputs:
/// - `app`: Mutable state; uses the last seen count and the active filters
/// - `query_tx`: Sender feeding the student-list worker
///
/// Output:
/// - Dispatches the reconciled query (`page_after_delete`) with filters kept.
pub fn refresh_after_delete(app: &mut AppState, query_tx: &mpsc::UnboundedSender<AlunoQuery>) {
    let mut query = app.query.clone();
    query.page = page_after_delete(app.alunos.count, app.alunos.current_page);
    send_query(app, query_tx, query);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ListViewState, Turma, Turno};

    fn app_with_turmas() -> AppState {
        let mut app = AppState::default();
        app.turmas = vec![
            Turma {
                id: 10,
                nome: "5º Ano A".into(),
                ano_letivo: 2026,
                turno: Turno::Manha,
                turno_display: "Manhã".into(),
                total_alunos: 3,
            },
            Turma {
                id: 20,
                nome: "5º Ano B".into(),
                ano_letivo: 2026,
                turno: Turno::Tarde,
                turno_display: "Tarde".into(),
                total_alunos: 1,
            },
        ];
        app
    }

    #[test]
    /// What: Applying a name filter resets the page to 1
    ///
    /// - Input: Active query on page 3, pending name "Ana"
    /// - Output: Dispatched query at page 1 carrying the name
    fn apply_resets_to_page_one() {
        let mut app = app_with_turmas();
        app.query = ListQuery {
            turma: None,
            nome: None,
            page: 3,
        };
        app.filtro_nome = "Ana".into();
        let (tx, mut rx) = mpsc::unbounded_channel();
        apply_filters(&mut app, &tx);
        let sent = rx.try_recv().unwrap();
        assert_eq!(sent.query.page, 1);
        assert_eq!(sent.query.nome.as_deref(), Some("Ana"));
        assert_eq!(app.query.page, 1);
        assert!(app.loading_alunos);
    }

    #[test]
    /// What: The pending class filter maps its index to the class id
    ///
    /// - Input: filtro_turma = Some(1), blank name buffer
    /// - Output: Query with turma id 20 and no name filter
    fn pending_turma_index_maps_to_id() {
        let mut app = app_with_turmas();
        app.filtro_turma = Some(1);
        app.filtro_nome = "   ".into();
        let q = pending_query(&app);
        assert_eq!(q.turma, Some(20));
        assert!(q.nome.is_none());
    }

    #[test]
    /// What: Query ids increase monotonically across dispatches
    ///
    /// - Input: Two sends
    /// - Output: Second id greater than first
    fn query_ids_are_monotonic() {
        let mut app = app_with_turmas();
        let (tx, mut rx) = mpsc::unbounded_channel();
        send_query(&mut app, &tx, ListQuery::default());
        send_query(&mut app, &tx, ListQuery::default());
        let a = rx.try_recv().unwrap();
        let b = rx.try_recv().unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    /// What: Delete refresh keeps filters and applies page reconciliation
    ///
    /// - Input: Active filter query on page 2 of a 21-item list
    /// - Output: Re-fetch of page 1 with the same filters
    fn refresh_after_delete_keeps_filters() {
        let mut app = app_with_turmas();
        app.query = ListQuery {
            turma: Some(10),
            nome: Some("Ana".into()),
            page: 2,
        };
        app.alunos = ListViewState {
            items: Vec::new(),
            count: 21,
            current_page: 2,
            total_pages: 2,
            can_prev: true,
            can_next: false,
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        refresh_after_delete(&mut app, &tx);
        let sent = rx.try_recv().unwrap();
        assert_eq!(sent.query.page, 1);
        assert_eq!(sent.query.turma, Some(10));
        assert_eq!(sent.query.nome.as_deref(), Some("Ana"));
    }
}
