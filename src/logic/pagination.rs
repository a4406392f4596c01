//! Page math: deriving a render-ready list view from a fetched page, and
//! choosing which page to re-fetch after a deletion.

use crate::state::{ListViewState, Page};

/// Fixed server page size for student lists.
pub const PAGE_SIZE: u64 = 20;

/// Total number of pages for `count` items; 0 iff `count` is 0.
pub fn total_pages(count: u64) -> u32 {
    u32::try_from(count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

/// What: Derive the view state for a fetched page.
///
/// Inputs:
/// - `page`: Normalized page as returned by the gateway
/// - `requested_page`: 1-based page the request asked for
///
/// Output:
/// - [`ListViewState`] with `total_pages = ceil(count / 20)` and the shown
///   page clamped into range, so a bare-array payload (one full page, no
///   next/previous links) always reads as page 1 of 1.
pub fn view_state<T>(page: Page<T>, requested_page: u32) -> ListViewState<T> {
    let total = total_pages(page.count);
    let current_page = requested_page.clamp(1, total.max(1));
    ListViewState {
        can_prev: page.previous.is_some(),
        can_next: page.next.is_some(),
        count: page.count,
        total_pages: total,
        current_page,
        items: page.results,
    }
}

/// What: Pick the page to re-fetch after deleting one item.
///
/// Inputs:
/// - `count`: Total item count as last seen, before the deletion
/// - `current_page`: 1-based page that was being shown
///
/// Output:
/// - `current_page`, unless the deletion emptied the trailing page, in which
///   case the new last page. Best effort: a concurrent writer can still make
///   the chosen page stale.
pub fn page_after_delete(count: u64, current_page: u32) -> u32 {
    let new_total = total_pages(count.saturating_sub(1));
    if current_page > new_total && new_total > 0 {
        new_total
    } else {
        current_page
    }
}
