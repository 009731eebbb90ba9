//! The user list controller and its supporting types.

mod debounce;
mod list;
mod state;

pub use debounce::{DEFAULT_SEARCH_DELAY, SearchDebouncer};
pub use list::{DEFAULT_PAGE_SIZE, LoadOutcome, SeedOutcome, UserListController};
pub use state::{ListState, PaginationCursor};
