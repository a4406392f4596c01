//! Modal dialogs layered over the active route.

/// Active modal dialog, if any.
///
/// Modals capture all key input until dismissed; see `events::handle_event`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    /// No modal is shown.
    #[default]
    None,
    /// Informational dialog dismissed with Enter or Esc.
    Alert {
        /// Message body.
        message: String,
    },
    /// Confirmation before deleting a student.
    ConfirmDeleteAluno {
        /// Student id to delete on confirm.
        id: i64,
        /// Student name shown in the prompt.
        nome: String,
    },
    /// Confirmation before deleting a class (cascades to its students).
    ConfirmDeleteTurma {
        /// Class id to delete on confirm.
        id: i64,
        /// Class name shown in the prompt.
        nome: String,
    },
}
