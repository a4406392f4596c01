//! Application runtime: wiring of config, session, gateway, workers, and the
//! terminal lifecycle around the event loop.

use std::sync::Arc;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::ApiClient;
use crate::args::Args;
use crate::config;
use crate::session::SessionStore;
use crate::state::{AppState, Route};

mod channels;
mod event_loop;
mod handlers;
mod terminal;
mod workers;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Start the TUI and run it to completion.
///
/// Inputs:
/// - `cli`: Parsed command-line arguments
///
/// Output:
/// - `Ok(())` on a clean exit. The terminal is restored even when the loop
///   fails.
pub async fn run(cli: Args) -> Result<()> {
    let settings = config::settings();
    let base_url = config::resolve_base_url(cli.base_url, &settings);
    tracing::info!(base_url = %base_url, "gateway configured");

    let session = Arc::new(SessionStore::load(config::session_path()));
    let client = ApiClient::new(base_url, session.clone());

    let mut app = AppState::default();
    if session.is_authenticated() {
        app.route = Route::Dashboard;
        app.username = session.username();
    }

    let channels = channels::create(&client);
    if app.route == Route::Dashboard {
        // Resumed session: load the dashboard right away.
        app.loading_turmas = true;
        app.loading_alunos = true;
        let _ = channels.init_tx.send(());
    }

    terminal::setup_terminal()?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    let result = event_loop::run_event_loop(&mut term, &mut app, channels, &session).await;
    terminal::restore_terminal()?;
    result
}
