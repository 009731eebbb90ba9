//! Observable list state and pagination cursor.

use crate::error::{Error, InvalidInputError};
use crate::types::UserRecord;

/// What the user list currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    /// A session or search is starting.
    #[default]
    Loading,
    /// Nothing is cached and the remote source could not be reached.
    NoNetworkNoData,
    /// The listing or search matched nothing.
    Empty,
    /// Users to display, never empty.
    Ready(Vec<UserRecord>),
}

impl ListState {
    /// `Ready` for a non-empty sequence, `Empty` otherwise.
    pub fn from_users(users: Vec<UserRecord>) -> Self {
        if users.is_empty() {
            Self::Empty
        } else {
            Self::Ready(users)
        }
    }

    /// The visible users; empty for every state but `Ready`.
    pub fn users(&self) -> &[UserRecord] {
        match self {
            Self::Ready(users) => users,
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Short name for logs and terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::NoNetworkNoData => "no-network",
            Self::Empty => "empty",
            Self::Ready(_) => "ready",
        }
    }
}

/// Progress through the paginated, unfiltered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    page_index: usize,
    page_size: usize,
    exhausted: bool,
}

impl PaginationCursor {
    /// Create a cursor at page 0.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self, Error> {
        if page_size == 0 {
            return Err(InvalidInputError::Other {
                message: "page size must be positive".to_string(),
            }
            .into());
        }

        Ok(Self {
            page_index: 0,
            page_size,
            exhausted: false,
        })
    }

    /// Number of pages loaded so far.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// True once a page came back shorter than `page_size`.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Cache offset of the next page.
    pub fn offset(&self) -> usize {
        self.page_index * self.page_size
    }

    pub(crate) fn advance(&mut self) {
        self.page_index += 1;
    }

    pub(crate) fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    pub(crate) fn reset(&mut self) {
        self.page_index = 0;
        self.exhausted = false;
    }
}
