//! Typed CRUD operations for classes.

use crate::state::{Aluno, Page, Turma, TurmaInput};

use super::{ApiClient, Result};

/// List all classes, normalized to a [`Page`] regardless of wire shape.
pub async fn list(client: &ApiClient) -> Result<Page<Turma>> {
    client.get_page("/api/turmas/", &[]).await
}

/// Fetch one class by id.
pub async fn get(client: &ApiClient, id: i64) -> Result<Turma> {
    client.get_json(&format!("/api/turmas/{id}/")).await
}

/// Create a class. Validation failures carry the backend's field errors.
pub async fn create(client: &ApiClient, input: &TurmaInput) -> Result<Turma> {
    client.post_json("/api/turmas/", input).await
}

/// Update a class by id.
pub async fn update(client: &ApiClient, id: i64, input: &TurmaInput) -> Result<Turma> {
    client.put_json(&format!("/api/turmas/{id}/"), input).await
}

/// Delete a class by id. The backend cascades deletion to its students.
pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client.delete(&format!("/api/turmas/{id}/")).await
}

/// List the students of one class.
pub async fn alunos_of(client: &ApiClient, id: i64) -> Result<Page<Aluno>> {
    client
        .get_page(&format!("/api/turmas/{id}/alunos/"), &[])
        .await
}
