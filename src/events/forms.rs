//! Key handling for the class and student forms, plus form open helpers.
//!
//! Submit performs only the checks the UI needs to build a request body
//! (numbers parse, date parses, a class is picked); everything else is the
//! backend's call and comes back as field-level validation errors.

use crossterm::event::{KeyCode, KeyEvent};

use crate::state::{
    Aluno, AlunoField, AlunoFormState, AlunoInput, AppState, Route, SaveRequest, Turma,
    TurmaField, TurmaFormState, TurmaInput,
};
use crate::util;

use super::Senders;

/// Open the class form empty, for creation.
pub fn open_new_turma(app: &mut AppState) {
    app.turma_form = TurmaFormState::default();
    app.form_origin = Route::Turmas;
    app.route = Route::TurmaForm;
}

/// Open the class form pre-filled from `turma`, for editing.
pub fn open_edit_turma(app: &mut AppState, turma: &Turma) {
    app.turma_form = TurmaFormState {
        id: Some(turma.id),
        nome: turma.nome.clone(),
        ano_letivo: turma.ano_letivo.to_string(),
        turno: turma.turno,
        ..TurmaFormState::default()
    };
    app.form_origin = app.route;
    app.route = Route::TurmaForm;
}

/// Open the student form empty, for creation. Defaults the class picker to
/// the active class filter when one is set.
pub fn open_new_aluno(app: &mut AppState, origin: Route) {
    app.aluno_form = AlunoFormState::default();
    app.aluno_form.turma_idx = app
        .filtro_turma
        .or_else(|| (!app.turmas.is_empty()).then_some(0));
    app.form_origin = origin;
    app.route = Route::AlunoForm;
}

/// Open the student form pre-filled from `aluno`, for editing.
pub fn open_edit_aluno(app: &mut AppState, aluno: &Aluno, origin: Route) {
    app.aluno_form = AlunoFormState {
        id: Some(aluno.id),
        nome: aluno.nome.clone(),
        email: aluno.email.clone(),
        matricula: aluno.matricula.clone(),
        data_nascimento: util::format_date(aluno.data_nascimento),
        turma_idx: app.turmas.iter().position(|t| t.id == aluno.turma),
        ..AlunoFormState::default()
    };
    app.form_origin = origin;
    app.route = Route::AlunoForm;
}

/// What: Handle one key press on either form.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Application state
/// - `tx`: Worker senders
///
/// Output:
/// - Always `false`; forms never quit the application directly.
pub fn handle_key(ke: KeyEvent, app: &mut AppState, tx: &Senders) -> bool {
    match app.route {
        Route::TurmaForm => handle_turma_form(ke, app, tx),
        Route::AlunoForm => handle_aluno_form(ke, app, tx),
        _ => {}
    }
    false
}

/// Keys on the class form.
fn handle_turma_form(ke: KeyEvent, app: &mut AppState, tx: &Senders) {
    let form = &mut app.turma_form;
    match ke.code {
        KeyCode::Esc => {
            app.route = app.form_origin;
        }
        KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
        KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
        KeyCode::Left if form.field == TurmaField::Turno => form.turno = form.turno.prev(),
        KeyCode::Right if form.field == TurmaField::Turno => form.turno = form.turno.next(),
        KeyCode::Enter => submit_turma(app, tx),
        KeyCode::Backspace => match form.field {
            TurmaField::Nome => {
                form.nome.pop();
            }
            TurmaField::AnoLetivo => {
                form.ano_letivo.pop();
            }
            TurmaField::Turno => {}
        },
        KeyCode::Char(c) => match form.field {
            TurmaField::Nome => form.nome.push(c),
            TurmaField::AnoLetivo => {
                if c.is_ascii_digit() {
                    form.ano_letivo.push(c);
                }
            }
            TurmaField::Turno => {}
        },
        _ => {}
    }
}

/// Validate the class form and dispatch the save request.
fn submit_turma(app: &mut AppState, tx: &Senders) {
    let form = &mut app.turma_form;
    if form.busy {
        return;
    }
    form.errors.clear();
    if form.nome.trim().is_empty() {
        form.errors
            .insert("nome".into(), "Name is required".into());
    }
    let ano = form.ano_letivo.trim().parse::<i32>();
    if ano.is_err() {
        form.errors
            .insert("ano_letivo".into(), "Enter a valid year".into());
    }
    if !form.errors.is_empty() {
        return;
    }
    let input = TurmaInput {
        nome: form.nome.trim().to_string(),
        ano_letivo: ano.unwrap_or_default(),
        turno: form.turno,
    };
    form.busy = true;
    let request = match form.id {
        Some(id) => SaveRequest::UpdateTurma { id, input },
        None => SaveRequest::CreateTurma(input),
    };
    let _ = tx.save_tx.send(request);
}

/// Keys on the student form.
fn handle_aluno_form(ke: KeyEvent, app: &mut AppState, tx: &Senders) {
    let turma_count = app.turmas.len();
    let form = &mut app.aluno_form;
    match ke.code {
        KeyCode::Esc => {
            app.route = app.form_origin;
        }
        KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
        KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
        KeyCode::Left if form.field == AlunoField::Turma => {
            form.turma_idx = form.turma_idx.map(|i| i.saturating_sub(1));
        }
        KeyCode::Right if form.field == AlunoField::Turma => {
            if turma_count > 0 {
                form.turma_idx = Some(match form.turma_idx {
                    None => 0,
                    Some(i) => (i + 1).min(turma_count - 1),
                });
            }
        }
        KeyCode::Enter => submit_aluno(app, tx),
        KeyCode::Backspace => {
            if let Some(buf) = aluno_buffer(form) {
                buf.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buf) = aluno_buffer(form) {
                buf.push(c);
            }
        }
        _ => {}
    }
}

/// Text buffer behind the focused student-form field, when it has one.
fn aluno_buffer(form: &mut AlunoFormState) -> Option<&mut String> {
    match form.field {
        AlunoField::Nome => Some(&mut form.nome),
        AlunoField::Email => Some(&mut form.email),
        AlunoField::Matricula => Some(&mut form.matricula),
        AlunoField::DataNascimento => Some(&mut form.data_nascimento),
        AlunoField::Turma => None,
    }
}

/// Validate the student form and dispatch the save request.
fn submit_aluno(app: &mut AppState, tx: &Senders) {
    let turma_id = app
        .aluno_form
        .turma_idx
        .and_then(|i| app.turmas.get(i))
        .map(|t| t.id);
    let form = &mut app.aluno_form;
    if form.busy {
        return;
    }
    form.errors.clear();
    if form.nome.trim().is_empty() {
        form.errors
            .insert("nome".into(), "Name is required".into());
    }
    if !form.email.contains('@') {
        form.errors
            .insert("email".into(), "Enter a valid e-mail".into());
    }
    if form.matricula.trim().is_empty() {
        form.errors
            .insert("matricula".into(), "Enrollment number is required".into());
    }
    let date = util::parse_date(&form.data_nascimento);
    if date.is_none() {
        form.errors.insert(
            "data_nascimento".into(),
            "Enter a valid date (DD/MM/YYYY)".into(),
        );
    }
    if turma_id.is_none() {
        form.errors
            .insert("turma".into(), "Pick a class".into());
    }
    if !form.errors.is_empty() {
        return;
    }
    let (Some(date), Some(turma)) = (date, turma_id) else {
        return;
    };
    let input = AlunoInput {
        nome: form.nome.trim().to_string(),
        email: form.email.trim().to_string(),
        matricula: form.matricula.trim().to_string(),
        data_nascimento: date,
        turma,
    };
    form.busy = true;
    let request = match form.id {
        Some(id) => SaveRequest::UpdateAluno { id, input },
        None => SaveRequest::CreateAluno(input),
    };
    let _ = tx.save_tx.send(request);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Turno;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn senders() -> (Senders, mpsc::UnboundedReceiver<SaveRequest>) {
        let (query_tx, _) = mpsc::unbounded_channel();
        let (turmas_tx, _) = mpsc::unbounded_channel();
        let (detail_tx, _) = mpsc::unbounded_channel();
        let (aluno_tx, _) = mpsc::unbounded_channel();
        let (save_tx, save_rx) = mpsc::unbounded_channel();
        let (delete_tx, _) = mpsc::unbounded_channel();
        let (login_tx, _) = mpsc::unbounded_channel();
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
            save_rx,
        )
    }

    fn turma(id: i64, nome: &str) -> Turma {
        Turma {
            id,
            nome: nome.into(),
            ano_letivo: 2026,
            turno: Turno::Manha,
            turno_display: String::new(),
            total_alunos: 0,
        }
    }

    #[test]
    /// What: An incomplete class form collects errors instead of submitting
    ///
    /// - Input: Empty name, garbage year, Enter
    /// - Output: Errors on both fields, nothing sent
    fn turma_form_validates_before_send() {
        let (tx, mut save_rx) = senders();
        let mut app = AppState::default();
        app.route = Route::TurmaForm;
        app.turma_form.ano_letivo = "20x6".into();
        handle_key(key(KeyCode::Enter), &mut app, &tx);
        assert!(app.turma_form.errors.contains_key("nome"));
        assert!(app.turma_form.errors.contains_key("ano_letivo"));
        assert!(save_rx.try_recv().is_err());
        assert!(!app.turma_form.busy);
    }

    #[test]
    /// What: A valid student form submits a create request
    ///
    /// - Input: All fields filled, a class picked, Enter
    /// - Output: SaveRequest::CreateAluno with the class id resolved
    fn aluno_form_submits_create() {
        let (tx, mut save_rx) = senders();
        let mut app = AppState::default();
        app.turmas = vec![turma(10, "5º Ano A"), turma(20, "5º Ano B")];
        app.route = Route::AlunoForm;
        app.aluno_form.nome = "Ana Souza".into();
        app.aluno_form.email = "ana@escola.br".into();
        app.aluno_form.matricula = "2026-0007".into();
        app.aluno_form.data_nascimento = "03/05/2010".into();
        app.aluno_form.turma_idx = Some(1);
        handle_key(key(KeyCode::Enter), &mut app, &tx);
        assert!(app.aluno_form.busy);
        match save_rx.try_recv().unwrap() {
            SaveRequest::CreateAluno(input) => {
                assert_eq!(input.turma, 20);
                assert_eq!(input.data_nascimento.to_string(), "2010-05-03");
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    /// What: Editing opens the student form with buffers pre-filled
    ///
    /// - Input: An existing student and a matching class list
    /// - Output: Buffers mirror the student; class index resolved from its id
    fn edit_prefills_aluno_form() {
        let mut app = AppState::default();
        app.turmas = vec![turma(10, "A"), turma(20, "B")];
        let aluno = Aluno {
            id: 7,
            nome: "Bia".into(),
            email: "bia@escola.br".into(),
            matricula: "m7".into(),
            data_nascimento: chrono::NaiveDate::from_ymd_opt(2011, 2, 2).unwrap(),
            turma: 20,
            turma_nome: "B".into(),
        };
        open_edit_aluno(&mut app, &aluno, Route::Dashboard);
        assert_eq!(app.route, Route::AlunoForm);
        assert_eq!(app.aluno_form.id, Some(7));
        assert_eq!(app.aluno_form.data_nascimento, "02/02/2011");
        assert_eq!(app.aluno_form.turma_idx, Some(1));
    }
}
