//! Channel definitions for runtime communication.
//!
//! One request/response channel pair per background concern. The event loop
//! owns every response receiver; workers own the request receivers. All
//! channels are unbounded: traffic is keystroke-scale.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::api::{self, ApiClient};
use crate::events::Senders;
use crate::session::Session;
use crate::state::{Aluno, DeleteRequest, Page, Turma};

use super::workers;

/// Result of the combined initial dashboard fetch (classes + first student
/// page, requested together and folded in together).
#[derive(Debug)]
pub struct InitOutcome {
    /// Class list result.
    pub turmas: api::Result<Page<Turma>>,
    /// First student page result.
    pub alunos: api::Result<Page<Aluno>>,
}

/// Result of one student list query.
#[derive(Debug)]
pub struct AlunoPageOutcome {
    /// Id the query was dispatched with.
    pub id: u64,
    /// 1-based page the query asked for.
    pub requested_page: u32,
    /// Fetched page or failure.
    pub result: api::Result<Page<Aluno>>,
}

/// Result of a class detail fetch (the class and its students).
#[derive(Debug)]
pub struct DetailOutcome {
    /// Class that was requested.
    pub turma_id: i64,
    /// Both halves of the detail screen.
    pub result: api::Result<(Turma, Page<Aluno>)>,
}

/// Result of a create/update request.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Class save result.
    Turma(api::Result<Turma>),
    /// Student save result.
    Aluno(api::Result<Aluno>),
}

/// Result of a deletion.
#[derive(Debug)]
pub struct DeleteOutcome {
    /// What was asked to be deleted.
    pub request: DeleteRequest,
    /// Deletion result.
    pub result: api::Result<()>,
}

/// Loop-side channel ends: request senders plus response receivers.
pub struct Channels {
    /// Terminal events from the reader thread.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Cooperative stop flag for the reader thread.
    pub event_cancelled: Arc<AtomicBool>,
    /// Triggers the combined initial dashboard fetch.
    pub init_tx: mpsc::UnboundedSender<()>,
    /// Request senders handed to the key handlers.
    pub senders: Senders,
    /// Combined initial fetch results.
    pub init_rx: mpsc::UnboundedReceiver<InitOutcome>,
    /// Student list query results.
    pub alunos_rx: mpsc::UnboundedReceiver<AlunoPageOutcome>,
    /// Class list refresh results.
    pub turmas_rx: mpsc::UnboundedReceiver<api::Result<Page<Turma>>>,
    /// Class detail results.
    pub detail_rx: mpsc::UnboundedReceiver<DetailOutcome>,
    /// Fresh single-student fetch results.
    pub aluno_rx: mpsc::UnboundedReceiver<api::Result<Aluno>>,
    /// Create/update results.
    pub save_rx: mpsc::UnboundedReceiver<SaveOutcome>,
    /// Deletion results.
    pub delete_rx: mpsc::UnboundedReceiver<DeleteOutcome>,
    /// Login results.
    pub login_rx: mpsc::UnboundedReceiver<api::Result<Session>>,
}

/// What: Create all channels, spawn the input reader and the workers.
///
/// Inputs:
/// - `client`: Gateway client cloned into every worker
///
/// Output:
/// - The loop-side [`Channels`]; worker-side receivers are already moved into
///   their tasks.
pub fn create(client: &ApiClient) -> Channels {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let event_cancelled = Arc::new(AtomicBool::new(false));
    spawn_event_reader(event_tx, event_cancelled.clone());

    let (init_tx, init_req_rx) = mpsc::unbounded_channel();
    let (query_tx, query_rx) = mpsc::unbounded_channel();
    let (turmas_tx, turmas_req_rx) = mpsc::unbounded_channel();
    let (detail_tx, detail_req_rx) = mpsc::unbounded_channel();
    let (aluno_tx, aluno_req_rx) = mpsc::unbounded_channel();
    let (save_tx, save_req_rx) = mpsc::unbounded_channel();
    let (delete_tx, delete_req_rx) = mpsc::unbounded_channel();
    let (login_tx, login_req_rx) = mpsc::unbounded_channel();

    let (init_res_tx, init_rx) = mpsc::unbounded_channel();
    let (alunos_res_tx, alunos_rx) = mpsc::unbounded_channel();
    let (turmas_res_tx, turmas_rx) = mpsc::unbounded_channel();
    let (detail_res_tx, detail_rx) = mpsc::unbounded_channel();
    let (aluno_res_tx, aluno_rx) = mpsc::unbounded_channel();
    let (save_res_tx, save_rx) = mpsc::unbounded_channel();
    let (delete_res_tx, delete_rx) = mpsc::unbounded_channel();
    let (login_res_tx, login_rx) = mpsc::unbounded_channel();

    workers::spawn_all(
        client.clone(),
        workers::Requests {
            init_rx: init_req_rx,
            query_rx,
            turmas_rx: turmas_req_rx,
            detail_rx: detail_req_rx,
            aluno_rx: aluno_req_rx,
            save_rx: save_req_rx,
            delete_rx: delete_req_rx,
            login_rx: login_req_rx,
        },
        workers::Responses {
            init_tx: init_res_tx,
            alunos_tx: alunos_res_tx,
            turmas_tx: turmas_res_tx,
            detail_tx: detail_res_tx,
            aluno_tx: aluno_res_tx,
            save_tx: save_res_tx,
            delete_tx: delete_res_tx,
            login_tx: login_res_tx,
        },
    );

    Channels {
        event_rx,
        event_cancelled,
        init_tx,
        senders: Senders {
            query_tx,
            turmas_tx,
            detail_tx,
            aluno_tx,
            save_tx,
            delete_tx,
            login_tx,
        },
        init_rx,
        alunos_rx,
        turmas_rx,
        detail_rx,
        aluno_rx,
        save_rx,
        delete_rx,
        login_rx,
    }
}

/// Blocking crossterm reader on its own thread, feeding the event channel.
fn spawn_event_reader(tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        while !cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(Duration::from_millis(100)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal event read failed");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event poll failed");
                    break;
                }
            }
        }
    });
}
