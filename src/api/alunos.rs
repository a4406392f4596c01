//! Typed CRUD operations for students.

use crate::state::{Aluno, AlunoInput, ListQuery, Page};

use super::{ApiClient, Result};

/// What: List students honoring the active filters and page.
///
/// Inputs:
/// - `query`: Class filter, name fragment, and 1-based page
///
/// Output:
/// - The requested page, normalized to [`Page`] regardless of wire shape.
///
/// Details:
/// - Absent filters are omitted from the query string; `page` is always sent.
pub async fn list(client: &ApiClient, query: &ListQuery) -> Result<Page<Aluno>> {
    let mut params: Vec<(&str, String)> = Vec::with_capacity(3);
    if let Some(turma) = query.turma {
        params.push(("turma", turma.to_string()));
    }
    if let Some(nome) = query.nome.as_deref()
        && !nome.is_empty()
    {
        params.push(("nome", nome.to_string()));
    }
    params.push(("page", query.page.to_string()));
    client.get_page("/api/alunos/", &params).await
}

/// Fetch one student by id.
pub async fn get(client: &ApiClient, id: i64) -> Result<Aluno> {
    client.get_json(&format!("/api/alunos/{id}/")).await
}

/// Create a student. Validation failures carry the backend's field errors.
pub async fn create(client: &ApiClient, input: &AlunoInput) -> Result<Aluno> {
    client.post_json("/api/alunos/", input).await
}

/// Update a student by id.
pub async fn update(client: &ApiClient, id: i64, input: &AlunoInput) -> Result<Aluno> {
    client.put_json(&format!("/api/alunos/{id}/"), input).await
}

/// Delete a student by id.
pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client.delete(&format!("/api/alunos/{id}/")).await
}
