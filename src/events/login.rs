//! Key handling for the login screen.

use crossterm::event::{KeyCode, KeyEvent};
use zeroize::Zeroizing;

use crate::state::{AppState, Credentials, LoginField};

use super::Senders;

/// What: Handle one key press on the login screen.
///
/// Inputs:
/// - `ke`: Key event
/// - `app`: Application state
/// - `tx`: Worker senders
///
/// Output:
/// - `true` when the user asked to quit (Esc).
///
/// Details:
/// - Enter submits once both fields are non-empty and no attempt is in
///   flight; the previous failure message is cleared on submit.
pub fn handle_key(ke: KeyEvent, app: &mut AppState, tx: &Senders) -> bool {
    match ke.code {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.field = match app.login.field {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
        }
        KeyCode::Enter => {
            if app.login.busy {
                return false;
            }
            if app.login.username.trim().is_empty() || app.login.password.is_empty() {
                app.login.error = Some("Enter both username and password".to_string());
                return false;
            }
            app.login.error = None;
            app.login.busy = true;
            let _ = tx.login_tx.send(Credentials {
                username: app.login.username.trim().to_string(),
                password: Zeroizing::new(app.login.password.to_string()),
            });
        }
        KeyCode::Backspace => match app.login.field {
            LoginField::Username => {
                app.login.username.pop();
            }
            LoginField::Password => {
                app.login.password.pop();
            }
        },
        KeyCode::Char(c) => match app.login.field {
            LoginField::Username => app.login.username.push(c),
            LoginField::Password => app.login.password.push(c),
        },
        _ => {}
    }
    false
}
