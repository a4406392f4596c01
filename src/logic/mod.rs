//! Core non-UI logic split into modular submodules.

pub mod filter;
pub mod pagination;
pub mod selection;

// Re-export public APIs to keep flat `crate::logic::...` paths at call sites.
pub use filter::{apply_filters, pending_query, refresh_after_delete, refresh_current, send_query};
pub use pagination::{PAGE_SIZE, page_after_delete, total_pages, view_state};
pub use selection::{clamp_sel, move_sel};
