//! Integration tests for list normalization and pagination reconciliation.

use turmalin::api::ListPayload;
use turmalin::logic::{self, page_after_delete, total_pages, view_state};
use turmalin::state::{Aluno, AppState, ListQuery, ListViewState};

/// Build a student JSON object for wire payload fixtures.
fn aluno_json(id: i64, nome: &str) -> String {
    format!(
        r#"{{"id":{id},"nome":"{nome}","email":"{nome}@escola.br","matricula":"m{id}",
            "data_nascimento":"2010-01-01","turma":1,"turma_nome":"5º Ano A"}}"#
    )
}

#[test]
/// What: A bare array and the equivalent single-page envelope are identical
///
/// - Input: The same two students as a bare array and as an envelope
/// - Output: Same normalized page and same derived view state
fn bare_and_envelope_views_match() {
    let body = format!("[{},{}]", aluno_json(1, "Ana"), aluno_json(2, "Bia"));
    let bare: ListPayload<Aluno> = serde_json::from_str(&body).expect("bare payload");
    let envelope: ListPayload<Aluno> = serde_json::from_str(&format!(
        r#"{{"count":2,"next":null,"previous":null,"results":{body}}}"#
    ))
    .expect("envelope payload");

    let bare_view: ListViewState<Aluno> = view_state(bare.normalize(), 1);
    let env_view: ListViewState<Aluno> = view_state(envelope.normalize(), 1);
    assert_eq!(bare_view, env_view);
    assert_eq!(bare_view.total_pages, 1);
    assert_eq!(bare_view.count, 2);
    assert!(!bare_view.can_next && !bare_view.can_prev);
}

#[test]
/// What: total_pages follows ceil(count/20) with zero only at zero
///
/// - Input: Counts from 0 to 200
/// - Output: ceil division result; zero iff count is zero
fn total_pages_property() {
    for count in 0u64..=200 {
        let expected = count.div_ceil(20) as u32;
        assert_eq!(total_pages(count), expected, "count={count}");
        assert_eq!(total_pages(count) == 0, count == 0);
    }
}

#[test]
/// What: Deleting the only item of page 2 of 21 re-fetches page 1
///
/// - Input: count 21, current page 2
/// - Output: page_after_delete returns 1
fn delete_scenario_21_items_page_2() {
    assert_eq!(page_after_delete(21, 2), 1);
}

#[test]
/// What: Deleting a non-last item keeps the current page
///
/// - Input: count 45 on pages 1..3
/// - Output: Same page re-fetched
fn delete_keeps_page_when_not_trailing() {
    for page in 1..=3 {
        assert_eq!(page_after_delete(45, page), page);
    }
}

#[test]
/// What: The delete re-fetch reuses the active filters
///
/// - Input: App with class and name filters active on page 2 of 21 items
/// - Output: Dispatched query carries both filters at page 1
fn delete_refetch_keeps_filters() {
    let mut app = AppState::default();
    app.query = ListQuery {
        turma: Some(7),
        nome: Some("Ana".into()),
        page: 2,
    };
    app.alunos.count = 21;
    app.alunos.current_page = 2;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    logic::refresh_after_delete(&mut app, &tx);
    let sent = rx.try_recv().expect("query dispatched");
    assert_eq!(sent.query.turma, Some(7));
    assert_eq!(sent.query.nome.as_deref(), Some("Ana"));
    assert_eq!(sent.query.page, 1);
}

#[test]
/// What: Applying the name filter resets to page 1 from any page
///
/// - Input: Pending filter "Ana" while page 5 is active
/// - Output: Active query page 1 with the filter applied
fn apply_filter_resets_page() {
    let mut app = AppState::default();
    app.query.page = 5;
    app.filtro_nome = "Ana".into();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    logic::apply_filters(&mut app, &tx);
    assert_eq!(app.query.page, 1);
    assert_eq!(app.query.nome.as_deref(), Some("Ana"));
    let sent = rx.try_recv().expect("query dispatched");
    assert_eq!(sent.query.page, 1);
}

#[test]
/// What: An envelope with pages derives prev/next from the server links
///
/// - Input: count 41 with only a next link, then only a previous link
/// - Output: can_next/can_prev mirror the links; 3 total pages
fn envelope_links_drive_navigation() {
    let results = format!("[{}]", aluno_json(1, "Ana"));
    let first: ListPayload<Aluno> = serde_json::from_str(&format!(
        r#"{{"count":41,"next":"http://x/api/alunos/?page=2","previous":null,"results":{results}}}"#
    ))
    .expect("first page");
    let v = view_state(first.normalize(), 1);
    assert!(v.can_next && !v.can_prev);
    assert_eq!(v.total_pages, 3);

    let last: ListPayload<Aluno> = serde_json::from_str(&format!(
        r#"{{"count":41,"next":null,"previous":"http://x/api/alunos/?page=2","results":{results}}}"#
    ))
    .expect("last page");
    let v = view_state(last.normalize(), 3);
    assert!(!v.can_next && v.can_prev);
    assert_eq!(v.current_page, 3);
}
