//! Background fetch workers, one task per concern.
//!
//! Each worker loops over its request channel, performs the call through the
//! gateway, and reports the full `Result` back; the event loop decides how a
//! failure surfaces. Workers exit when their request channel closes.

use tokio::sync::mpsc;

use crate::api::{self, ApiClient};
use crate::session::Session;
use crate::state::{
    Aluno, AlunoQuery, Credentials, DeleteRequest, ListQuery, Page, SaveRequest, Turma,
};

use super::channels::{AlunoPageOutcome, DeleteOutcome, DetailOutcome, InitOutcome, SaveOutcome};

/// Worker-side request receivers.
pub struct Requests {
    /// Combined initial fetch triggers.
    pub init_rx: mpsc::UnboundedReceiver<()>,
    /// Student list queries.
    pub query_rx: mpsc::UnboundedReceiver<AlunoQuery>,
    /// Class list refresh triggers.
    pub turmas_rx: mpsc::UnboundedReceiver<()>,
    /// Class detail fetches.
    pub detail_rx: mpsc::UnboundedReceiver<i64>,
    /// Fresh single-student fetches.
    pub aluno_rx: mpsc::UnboundedReceiver<i64>,
    /// Create/update requests.
    pub save_rx: mpsc::UnboundedReceiver<SaveRequest>,
    /// Deletion requests.
    pub delete_rx: mpsc::UnboundedReceiver<DeleteRequest>,
    /// Login attempts.
    pub login_rx: mpsc::UnboundedReceiver<Credentials>,
}

/// Worker-side response senders.
pub struct Responses {
    /// Combined initial fetch results.
    pub init_tx: mpsc::UnboundedSender<InitOutcome>,
    /// Student list query results.
    pub alunos_tx: mpsc::UnboundedSender<AlunoPageOutcome>,
    /// Class list results.
    pub turmas_tx: mpsc::UnboundedSender<api::Result<Page<Turma>>>,
    /// Class detail results.
    pub detail_tx: mpsc::UnboundedSender<DetailOutcome>,
    /// Fresh single-student fetch results.
    pub aluno_tx: mpsc::UnboundedSender<api::Result<Aluno>>,
    /// Create/update results.
    pub save_tx: mpsc::UnboundedSender<SaveOutcome>,
    /// Deletion results.
    pub delete_tx: mpsc::UnboundedSender<DeleteOutcome>,
    /// Login results.
    pub login_tx: mpsc::UnboundedSender<api::Result<Session>>,
}

/// Spawn every worker task.
pub fn spawn_all(client: ApiClient, rx: Requests, tx: Responses) {
    spawn_init_worker(client.clone(), rx.init_rx, tx.init_tx);
    spawn_query_worker(client.clone(), rx.query_rx, tx.alunos_tx);
    spawn_turmas_worker(client.clone(), rx.turmas_rx, tx.turmas_tx);
    spawn_detail_worker(client.clone(), rx.detail_rx, tx.detail_tx);
    spawn_aluno_worker(client.clone(), rx.aluno_rx, tx.aluno_tx);
    spawn_save_worker(client.clone(), rx.save_rx, tx.save_tx);
    spawn_delete_worker(client.clone(), rx.delete_rx, tx.delete_tx);
    spawn_login_worker(client, rx.login_rx, tx.login_tx);
}

/// What: Combined initial dashboard fetch.
///
/// Details:
/// - Issues the class list and the first student page concurrently and
///   reports both results together, so the dashboard renders only once both
///   have resolved.
fn spawn_init_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<()>,
    tx: mpsc::UnboundedSender<InitOutcome>,
) {
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            let query = ListQuery::default();
            let (turmas, alunos) = futures::join!(
                api::turmas::list(&client),
                api::alunos::list(&client, &query)
            );
            if tx.send(InitOutcome { turmas, alunos }).is_err() {
                break;
            }
        }
    });
}

/// Student list queries; the outcome echoes the query id for staleness checks.
fn spawn_query_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<AlunoQuery>,
    tx: mpsc::UnboundedSender<AlunoPageOutcome>,
) {
    tokio::spawn(async move {
        while let Some(q) = rx.recv().await {
            let result = api::alunos::list(&client, &q.query).await;
            let out = AlunoPageOutcome {
                id: q.id,
                requested_page: q.query.page,
                result,
            };
            if tx.send(out).is_err() {
                break;
            }
        }
    });
}

/// Class list refreshes.
fn spawn_turmas_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<()>,
    tx: mpsc::UnboundedSender<api::Result<Page<Turma>>>,
) {
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            if tx.send(api::turmas::list(&client).await).is_err() {
                break;
            }
        }
    });
}

/// Class detail: the class and its students, fetched concurrently.
fn spawn_detail_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<i64>,
    tx: mpsc::UnboundedSender<DetailOutcome>,
) {
    tokio::spawn(async move {
        while let Some(turma_id) = rx.recv().await {
            let (turma, alunos) = futures::join!(
                api::turmas::get(&client, turma_id),
                api::turmas::alunos_of(&client, turma_id)
            );
            let result = match (turma, alunos) {
                (Ok(t), Ok(a)) => Ok((t, a)),
                (Err(e), _) | (_, Err(e)) => Err(e),
            };
            if tx.send(DetailOutcome { turma_id, result }).is_err() {
                break;
            }
        }
    });
}

/// Fresh single-student fetches backing the edit form.
fn spawn_aluno_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<i64>,
    tx: mpsc::UnboundedSender<api::Result<Aluno>>,
) {
    tokio::spawn(async move {
        while let Some(id) = rx.recv().await {
            if tx.send(api::alunos::get(&client, id).await).is_err() {
                break;
            }
        }
    });
}

/// Create/update requests for both entities.
fn spawn_save_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<SaveRequest>,
    tx: mpsc::UnboundedSender<SaveOutcome>,
) {
    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            let outcome = match request {
                SaveRequest::CreateTurma(input) => {
                    SaveOutcome::Turma(api::turmas::create(&client, &input).await)
                }
                SaveRequest::UpdateTurma { id, input } => {
                    SaveOutcome::Turma(api::turmas::update(&client, id, &input).await)
                }
                SaveRequest::CreateAluno(input) => {
                    SaveOutcome::Aluno(api::alunos::create(&client, &input).await)
                }
                SaveRequest::UpdateAluno { id, input } => {
                    SaveOutcome::Aluno(api::alunos::update(&client, id, &input).await)
                }
            };
            if tx.send(outcome).is_err() {
                break;
            }
        }
    });
}

/// Deletion requests for both entities.
fn spawn_delete_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<DeleteRequest>,
    tx: mpsc::UnboundedSender<DeleteOutcome>,
) {
    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            let result = match request {
                DeleteRequest::Turma(id) => api::turmas::delete(&client, id).await,
                DeleteRequest::Aluno(id) => api::alunos::delete(&client, id).await,
            };
            if tx.send(DeleteOutcome { request, result }).is_err() {
                break;
            }
        }
    });
}

/// Login attempts; the gateway persists the session on success.
fn spawn_login_worker(
    client: ApiClient,
    mut rx: mpsc::UnboundedReceiver<Credentials>,
    tx: mpsc::UnboundedSender<api::Result<Session>>,
) {
    tokio::spawn(async move {
        while let Some(creds) = rx.recv().await {
            let result = client.login(&creds.username, &creds.password).await;
            if tx.send(result).is_err() {
                break;
            }
        }
    });
}
