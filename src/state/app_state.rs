//! Central `AppState` container shared by the event, networking, and UI layers.

use std::collections::BTreeMap;

use ratatui::widgets::ListState;
use zeroize::Zeroizing;

use crate::state::modal::Modal;
use crate::state::types::{Aluno, ListQuery, ListViewState, Turma, Turno};
use crate::util::current_year;

/// Screen currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    /// Credential prompt; the only screen reachable while unauthenticated.
    #[default]
    Login,
    /// Stats cards plus the filtered, paginated student table.
    Dashboard,
    /// Class list with enrollment totals.
    Turmas,
    /// One class and its students.
    TurmaDetail,
    /// Create/edit form for a class.
    TurmaForm,
    /// Create/edit form for a student.
    AlunoForm,
}

/// Which dashboard control receives key input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashFocus {
    /// The student table.
    #[default]
    Table,
    /// The name filter input.
    NameFilter,
    /// The class filter selector.
    TurmaFilter,
}

impl DashFocus {
    /// Cycle focus Table -> NameFilter -> TurmaFilter -> Table.
    pub fn next(self) -> Self {
        match self {
            Self::Table => Self::NameFilter,
            Self::NameFilter => Self::TurmaFilter,
            Self::TurmaFilter => Self::Table,
        }
    }
}

/// Fields of the login form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    /// Username input.
    #[default]
    Username,
    /// Password input (masked).
    Password,
}

/// Login screen state.
#[derive(Default)]
pub struct LoginForm {
    /// Username buffer.
    pub username: String,
    /// Password buffer, wiped on drop.
    pub password: Zeroizing<String>,
    /// Focused field.
    pub field: LoginField,
    /// Last login failure shown under the form.
    pub error: Option<String>,
    /// A login request is in flight.
    pub busy: bool,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("field", &self.field)
            .field("error", &self.error)
            .field("busy", &self.busy)
            .finish()
    }
}

/// Fields of the class form, in navigation order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurmaField {
    /// Class name.
    #[default]
    Nome,
    /// School year.
    AnoLetivo,
    /// Shift selector.
    Turno,
}

impl TurmaField {
    /// Next field, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Nome => Self::AnoLetivo,
            Self::AnoLetivo => Self::Turno,
            Self::Turno => Self::Nome,
        }
    }

    /// Previous field, wrapping.
    pub fn prev(self) -> Self {
        match self {
            Self::Nome => Self::Turno,
            Self::AnoLetivo => Self::Nome,
            Self::Turno => Self::AnoLetivo,
        }
    }
}

/// Create/edit buffer for a class.
#[derive(Debug)]
pub struct TurmaFormState {
    /// Id when editing; `None` when creating.
    pub id: Option<i64>,
    /// Name buffer.
    pub nome: String,
    /// School year buffer (validated on submit).
    pub ano_letivo: String,
    /// Selected shift.
    pub turno: Turno,
    /// Focused field.
    pub field: TurmaField,
    /// Field-level errors, keyed by wire field name.
    pub errors: BTreeMap<String, String>,
    /// A save request is in flight.
    pub busy: bool,
}

impl Default for TurmaFormState {
    fn default() -> Self {
        Self {
            id: None,
            nome: String::new(),
            ano_letivo: current_year().to_string(),
            turno: Turno::Manha,
            field: TurmaField::Nome,
            errors: BTreeMap::new(),
            busy: false,
        }
    }
}

/// Fields of the student form, in navigation order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlunoField {
    /// Student name.
    #[default]
    Nome,
    /// E-mail.
    Email,
    /// Enrollment number.
    Matricula,
    /// Birth date.
    DataNascimento,
    /// Class selector.
    Turma,
}

impl AlunoField {
    /// Next field, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Nome => Self::Email,
            Self::Email => Self::Matricula,
            Self::Matricula => Self::DataNascimento,
            Self::DataNascimento => Self::Turma,
            Self::Turma => Self::Nome,
        }
    }

    /// Previous field, wrapping.
    pub fn prev(self) -> Self {
        match self {
            Self::Nome => Self::Turma,
            Self::Email => Self::Nome,
            Self::Matricula => Self::Email,
            Self::DataNascimento => Self::Matricula,
            Self::Turma => Self::DataNascimento,
        }
    }
}

/// Create/edit buffer for a student.
#[derive(Debug, Default)]
pub struct AlunoFormState {
    /// Id when editing; `None` when creating.
    pub id: Option<i64>,
    /// Name buffer.
    pub nome: String,
    /// E-mail buffer.
    pub email: String,
    /// Enrollment number buffer.
    pub matricula: String,
    /// Birth date buffer (DD/MM/YYYY or YYYY-MM-DD, validated on submit).
    pub data_nascimento: String,
    /// Index into `AppState::turmas` of the selected class, when any exist.
    pub turma_idx: Option<usize>,
    /// Focused field.
    pub field: AlunoField,
    /// Field-level errors, keyed by wire field name.
    pub errors: BTreeMap<String, String>,
    /// A save request is in flight.
    pub busy: bool,
}

/// One class plus its students, for the detail screen.
#[derive(Clone, Debug)]
pub struct TurmaDetailState {
    /// The class being shown.
    pub turma: Turma,
    /// Its students.
    pub alunos: Vec<Aluno>,
}

/// Global application state mutated only by the event loop.
#[derive(Debug, Default)]
pub struct AppState {
    /// Screen currently shown.
    pub route: Route,
    /// Username of the authenticated user, mirrored from the session store.
    pub username: Option<String>,

    /// Login screen state.
    pub login: LoginForm,

    // Dashboard
    /// All classes, backing the stats card, the filter selector, and the class list.
    pub turmas: Vec<Turma>,
    /// Render-ready student list derived from the last folded-in page.
    pub alunos: ListViewState<Aluno>,
    /// Filters and page of the student list as currently applied.
    pub query: ListQuery,
    /// Pending name filter buffer (applied on Enter).
    pub filtro_nome: String,
    /// Pending class filter as an index into `turmas`; `None` = all classes.
    pub filtro_turma: Option<usize>,
    /// Which dashboard control receives keys.
    pub dash_focus: DashFocus,
    /// Selection state of the student table.
    pub aluno_state: ListState,
    /// Index into `alunos.items` currently highlighted.
    pub selected_aluno: usize,
    /// Class list fetch in flight (initial load or refresh).
    pub loading_turmas: bool,
    /// Student list fetch in flight.
    pub loading_alunos: bool,
    /// Total students across all pages, for the stats card.
    pub total_alunos: u64,

    // Turmas screen
    /// Selection state of the class list.
    pub turma_state: ListState,
    /// Index into `turmas` currently highlighted.
    pub selected_turma: usize,

    // Turma detail screen
    /// Loaded class detail, when on the detail route.
    pub detail: Option<TurmaDetailState>,
    /// Selection state of the detail student list.
    pub detail_state: ListState,
    /// Index into the detail student list currently highlighted.
    pub selected_detail_aluno: usize,
    /// Detail fetch in flight.
    pub loading_detail: bool,

    // Forms
    /// Class form buffer.
    pub turma_form: TurmaFormState,
    /// Student form buffer.
    pub aluno_form: AlunoFormState,
    /// Route to return to when a form closes.
    pub form_origin: Route,

    /// Dismissible error banner; failures leave prior data in place.
    pub error: Option<String>,
    /// Active modal dialog, if any.
    pub modal: Modal,

    /// Identifier of the newest student query whose results were folded in.
    pub latest_query_id: u64,
    /// Next student query identifier to allocate.
    pub next_query_id: u64,
}

impl AppState {
    /// `true` while the initial dashboard fetches have not both resolved.
    pub fn dashboard_loading(&self) -> bool {
        self.loading_turmas || self.loading_alunos
    }

    /// Currently highlighted student on the dashboard, if any.
    pub fn selected_aluno(&self) -> Option<&Aluno> {
        self.alunos.items.get(self.selected_aluno)
    }

    /// Currently highlighted class on the class list, if any.
    pub fn selected_turma(&self) -> Option<&Turma> {
        self.turmas.get(self.selected_turma)
    }
}
