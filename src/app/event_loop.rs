//! The `tokio::select!` loop that owns all state mutation.

use std::io::Stdout;

use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use crate::events::handle_event;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::ui::ui;

use super::channels::Channels;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the main loop until the user quits.
///
/// Inputs:
/// - `terminal`: Prepared ratatui terminal
/// - `app`: Application state, mutated only from this loop
/// - `channels`: All channel ends created by `channels::create`
/// - `session`: Shared session store
///
/// Output:
/// - `Ok(())` on a clean exit; draw failures propagate.
pub async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    channels: Channels,
    session: &SessionStore,
) -> Result<()> {
    let Channels {
        mut event_rx,
        event_cancelled,
        init_tx,
        senders,
        mut init_rx,
        mut alunos_rx,
        mut turmas_rx,
        mut detail_rx,
        mut aluno_rx,
        mut save_rx,
        mut delete_rx,
        mut login_rx,
    } = channels;

    loop {
        terminal.draw(|f| ui(f, app))?;
        select! {
            Some(ev) = event_rx.recv() => {
                if handle_event(ev, app, session, &senders) {
                    break;
                }
            }
            Some(out) = init_rx.recv() => super::handlers::handle_init(app, session, out),
            Some(out) = alunos_rx.recv() => super::handlers::handle_alunos_page(app, session, out),
            Some(res) = turmas_rx.recv() => super::handlers::handle_turmas(app, session, res),
            Some(out) = detail_rx.recv() => super::handlers::handle_detail(app, session, out),
            Some(res) = aluno_rx.recv() => super::handlers::handle_aluno_fetch(app, session, res),
            Some(out) = save_rx.recv() => super::handlers::handle_save(app, session, out, &senders),
            Some(out) = delete_rx.recv() => super::handlers::handle_delete(app, session, out, &senders),
            Some(res) = login_rx.recv() => super::handlers::handle_login(app, res, &init_tx),
            else => break,
        }
    }

    event_cancelled.store(true, std::sync::atomic::Ordering::Relaxed);
    Ok(())
}
