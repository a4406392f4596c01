//! Core value types used by Turmalin state: wire models and list view state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// School-day shift a class runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turno {
    /// Morning shift.
    Manha,
    /// Afternoon shift.
    Tarde,
    /// Evening shift.
    Noite,
}

impl Turno {
    /// Human label used by forms before the server echoes `turno_display`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Manha => "Manhã",
            Self::Tarde => "Tarde",
            Self::Noite => "Noite",
        }
    }

    /// Next shift in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Manha => Self::Tarde,
            Self::Tarde => Self::Noite,
            Self::Noite => Self::Manha,
        }
    }

    /// Previous shift in display order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Self::Manha => Self::Noite,
            Self::Tarde => Self::Manha,
            Self::Noite => Self::Tarde,
        }
    }
}

/// A class grouping students by school year and shift.
///
/// `turno_display` and `total_alunos` are computed server-side and never sent
/// back on writes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turma {
    /// Server-assigned identifier.
    pub id: i64,
    /// Class name.
    pub nome: String,
    /// School year (e.g. 2026).
    pub ano_letivo: i32,
    /// Shift the class runs in.
    pub turno: Turno,
    /// Server-rendered shift label.
    #[serde(default)]
    pub turno_display: String,
    /// Number of students enrolled, as counted by the server.
    #[serde(default)]
    pub total_alunos: i64,
}

/// A student belonging to exactly one [`Turma`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aluno {
    /// Server-assigned identifier.
    pub id: i64,
    /// Full name.
    pub nome: String,
    /// Contact e-mail.
    pub email: String,
    /// Unique enrollment number.
    pub matricula: String,
    /// Birth date.
    pub data_nascimento: NaiveDate,
    /// Id of the class the student belongs to.
    pub turma: i64,
    /// Server-rendered class name for display.
    #[serde(default)]
    pub turma_nome: String,
}

/// Request body for creating or updating a [`Turma`].
#[derive(Clone, Debug, Serialize)]
pub struct TurmaInput {
    /// Class name.
    pub nome: String,
    /// School year.
    pub ano_letivo: i32,
    /// Shift.
    pub turno: Turno,
}

/// Request body for creating or updating an [`Aluno`].
#[derive(Clone, Debug, Serialize)]
pub struct AlunoInput {
    /// Full name.
    pub nome: String,
    /// Contact e-mail.
    pub email: String,
    /// Unique enrollment number.
    pub matricula: String,
    /// Birth date.
    pub data_nascimento: NaiveDate,
    /// Id of the class the student belongs to.
    pub turma: i64,
}

/// Server pagination envelope.
///
/// Every list endpoint is normalized into this shape at the network boundary;
/// downstream code never sees the bare-array legacy payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,
    /// Items of the current page.
    pub results: Vec<T>,
    /// URL of the next page, when one exists.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, when one exists.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            results: Vec::new(),
            next: None,
            previous: None,
        }
    }
}

/// Client-held filter and pagination state driving student list requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// Restrict to one class, when set.
    pub turma: Option<i64>,
    /// Case-insensitive name fragment, when set.
    pub nome: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            turma: None,
            nome: None,
            page: 1,
        }
    }
}

/// Student list query sent to the background fetch worker.
///
/// The id is monotonic and lets the event loop drop responses that were
/// overtaken by a newer query.
#[derive(Clone, Debug)]
pub struct AlunoQuery {
    /// Monotonic identifier used to correlate responses.
    pub id: u64,
    /// Filters and page for this request.
    pub query: ListQuery,
}

/// Credentials captured by the login form, sent to the login worker.
///
/// The password buffer is wiped when the value is dropped.
#[derive(Clone)]
pub struct Credentials {
    /// Username as typed.
    pub username: String,
    /// Password as typed; zeroized on drop.
    pub password: zeroize::Zeroizing<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Create/update request sent to the save worker.
#[derive(Clone, Debug)]
pub enum SaveRequest {
    /// Create a class.
    CreateTurma(TurmaInput),
    /// Update a class.
    UpdateTurma {
        /// Class id.
        id: i64,
        /// New field values.
        input: TurmaInput,
    },
    /// Create a student.
    CreateAluno(AlunoInput),
    /// Update a student.
    UpdateAluno {
        /// Student id.
        id: i64,
        /// New field values.
        input: AlunoInput,
    },
}

/// Deletion request sent to the delete worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteRequest {
    /// Delete a class (cascades to its students server-side).
    Turma(i64),
    /// Delete a student.
    Aluno(i64),
}

/// Derived, render-ready view of one fetched page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListViewState<T> {
    /// Items of the current page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub count: u64,
    /// 1-based page currently shown.
    pub current_page: u32,
    /// Total number of pages; 0 iff `count` is 0.
    pub total_pages: u32,
    /// Whether the server reports an earlier page.
    pub can_prev: bool,
    /// Whether the server reports a later page.
    pub can_next: bool,
}

impl<T> Default for ListViewState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            current_page: 1,
            total_pages: 0,
            can_prev: false,
            can_next: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Turno serializes to the lowercase wire strings
    ///
    /// - Input: All three variants
    /// - Output: `"manha"`, `"tarde"`, `"noite"`
    fn turno_wire_names() {
        assert_eq!(serde_json::to_string(&Turno::Manha).unwrap(), "\"manha\"");
        assert_eq!(serde_json::to_string(&Turno::Tarde).unwrap(), "\"tarde\"");
        assert_eq!(serde_json::to_string(&Turno::Noite).unwrap(), "\"noite\"");
        let back: Turno = serde_json::from_str("\"noite\"").unwrap();
        assert_eq!(back, Turno::Noite);
    }

    #[test]
    /// What: Turno cycling is a 3-cycle in both directions
    ///
    /// - Input: Manha
    /// - Output: next/prev wrap through all variants back to Manha
    fn turno_cycles() {
        let t = Turno::Manha;
        assert_eq!(t.next().next().next(), t);
        assert_eq!(t.prev(), Turno::Noite);
    }

    #[test]
    /// What: Aluno deserializes the backend list shape
    ///
    /// - Input: JSON with ISO date and denormalized class name
    /// - Output: Fields mapped, date parsed
    fn aluno_deserializes() {
        let a: Aluno = serde_json::from_str(
            r#"{"id":7,"nome":"Ana Souza","email":"ana@escola.br","matricula":"2026-0007",
                "data_nascimento":"2010-05-03","turma":2,"turma_nome":"5º Ano A"}"#,
        )
        .unwrap();
        assert_eq!(a.id, 7);
        assert_eq!(a.turma, 2);
        assert_eq!(a.data_nascimento.to_string(), "2010-05-03");
        assert_eq!(a.turma_nome, "5º Ano A");
    }
}
