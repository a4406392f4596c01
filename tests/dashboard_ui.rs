//! Rendering tests over a test backend: loading gate, table, login screen.

use ratatui::{Terminal, backend::TestBackend};
use turmalin::state::{Aluno, AppState, ListViewState, Route, Turma, Turno};
use turmalin::ui::ui;

/// Flatten the drawn buffer into one string for containment asserts.
fn draw_to_text(app: &mut AppState) -> String {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|f| ui(f, app)).expect("draw");
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn turma(id: i64, nome: &str) -> Turma {
    Turma {
        id,
        nome: nome.into(),
        ano_letivo: 2026,
        turno: Turno::Manha,
        turno_display: "Manhã".into(),
        total_alunos: 2,
    }
}

fn aluno(id: i64, nome: &str) -> Aluno {
    Aluno {
        id,
        nome: nome.into(),
        email: format!("{nome}@escola.br").to_lowercase(),
        matricula: format!("2026-{id:04}"),
        data_nascimento: chrono::NaiveDate::from_ymd_opt(2010, 5, 3).expect("date"),
        turma: 1,
        turma_nome: "5º Ano A".into(),
    }
}

#[test]
/// What: The dashboard stays in its loading state until both fetches land
///
/// - Input: Authenticated state with only the class fetch resolved
/// - Output: "Loading" shown instead of the table
fn dashboard_waits_for_both_fetches() {
    let mut app = AppState::default();
    app.route = Route::Dashboard;
    app.username = Some("admin".into());
    app.turmas = vec![turma(1, "5º Ano A")];
    app.loading_turmas = false;
    app.loading_alunos = true; // student page still in flight
    let text = draw_to_text(&mut app);
    assert!(text.contains("Loading"), "expected loading gate:\n{text}");
}

#[test]
/// What: A folded-in page renders rows and the pagination summary
///
/// - Input: 2 students of a 41-item result on page 2
/// - Output: Student names, page indicator, and range summary visible
fn dashboard_renders_table_and_summary() {
    let mut app = AppState::default();
    app.route = Route::Dashboard;
    app.username = Some("admin".into());
    app.turmas = vec![turma(1, "5º Ano A")];
    app.total_alunos = 41;
    app.alunos = ListViewState {
        items: vec![aluno(21, "Ana Souza"), aluno(22, "Bia Lima")],
        count: 41,
        current_page: 2,
        total_pages: 3,
        can_prev: true,
        can_next: true,
    };
    let text = draw_to_text(&mut app);
    assert!(text.contains("Ana Souza"), "row missing:\n{text}");
    assert!(text.contains("Bia Lima"), "row missing:\n{text}");
    assert!(text.contains("Page 2/3"), "page indicator missing:\n{text}");
    assert!(
        text.contains("showing 21 to 40 of 41"),
        "summary missing:\n{text}"
    );
    assert!(text.contains("admin"), "header user missing:\n{text}");
}

#[test]
/// What: An empty result renders the empty notice, not a table
///
/// - Input: Zero students, no loading flags
/// - Output: "No students found."
fn dashboard_renders_empty_notice() {
    let mut app = AppState::default();
    app.route = Route::Dashboard;
    let text = draw_to_text(&mut app);
    assert!(text.contains("No students found."), "notice missing:\n{text}");
}

#[test]
/// What: The login screen masks the password and shows failures
///
/// - Input: Login route with typed credentials and an error set
/// - Output: Username visible, password dots only, error text shown
fn login_masks_password() {
    let mut app = AppState::default();
    app.route = Route::Login;
    app.login.username = "admin".into();
    app.login.password.push_str("s3cr3t-pass");
    app.login.error = Some("Invalid username or password".into());
    let text = draw_to_text(&mut app);
    assert!(text.contains("admin"), "username missing:\n{text}");
    assert!(!text.contains("s3cr3t-pass"), "password leaked:\n{text}");
    assert!(text.contains('\u{2022}'), "mask dots missing:\n{text}");
    assert!(
        text.contains("Invalid username or password"),
        "error missing:\n{text}"
    );
}

#[test]
/// What: The error banner renders and names the dismissal key
///
/// - Input: Dashboard with a banner error set
/// - Output: Banner text plus "Esc to dismiss"
fn error_banner_renders() {
    let mut app = AppState::default();
    app.route = Route::Dashboard;
    app.error = Some("Could not load students: network error".into());
    let text = draw_to_text(&mut app);
    assert!(
        text.contains("Could not load students"),
        "banner missing:\n{text}"
    );
    assert!(text.contains("Esc to dismiss"), "hint missing:\n{text}");
}
