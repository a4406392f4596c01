//! List selection movement shared by the table views.

use ratatui::widgets::ListState;

/// What: Move a list selection by `delta`, clamped to the list bounds.
///
/// Inputs:
/// - `len`: Number of items in the list
/// - `selected`: Highlighted index to update
/// - `state`: ratatui list state kept in sync with `selected`
/// - `delta`: Signed movement
///
/// Output:
/// - Updates both `selected` and `state`; clears the selection on an empty
///   list.
pub fn move_sel(len: usize, selected: &mut usize, state: &mut ListState, delta: isize) {
    if len == 0 {
        *selected = 0;
        state.select(None);
        return;
    }
    let max = len as isize - 1;
    let idx = (*selected as isize + delta).clamp(0, max);
    *selected = idx as usize;
    state.select(Some(*selected));
}

/// Clamp a selection after the backing list changed length.
pub fn clamp_sel(len: usize, selected: &mut usize, state: &mut ListState) {
    if len == 0 {
        *selected = 0;
        state.select(None);
        return;
    }
    *selected = (*selected).min(len - 1);
    state.select(Some(*selected));
}
