//! Modularized state: wire models, the `AppState` container, and modals.
//!
//! Submodules are re-exported so call sites keep the flat `crate::state::*`
//! paths.

pub mod app_state;
pub mod modal;
pub mod types;

pub use app_state::{
    AlunoField, AlunoFormState, AppState, DashFocus, LoginField, LoginForm, Route,
    TurmaDetailState, TurmaField, TurmaFormState,
};
pub use modal::Modal;
pub use types::{
    Aluno, AlunoInput, AlunoQuery, Credentials, DeleteRequest, ListQuery, ListViewState, Page,
    SaveRequest, Turma, TurmaInput, Turno,
};
