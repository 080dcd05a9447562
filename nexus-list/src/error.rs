//! Error types for list and cursor operations.
//!
//! Every failing operation leaves the list exactly as it was before the call,
//! so each of these conditions is recoverable by retrying with corrected
//! arguments.

use core::fmt;

/// Reason a list or cursor operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListError {
    /// The cursor was used with a list other than the one that opened it.
    InvalidHandle,
    /// Position is `>= len`, a move would leave the chain, or an end
    /// operation was attempted on an empty list.
    IndexOutOfRange,
    /// Sorted insertion or value search on a list without a comparator.
    MissingComparator,
    /// No element compared equal to the searched value.
    NotFound,
    /// The list still has open cursors.
    Busy,
    /// The cursor is at the empty sentinel and has no current element.
    EmptyPosition,
    /// The cursor's node was removed from the list through another path.
    Invalidated,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ListError::InvalidHandle => "cursor does not belong to this list",
            ListError::IndexOutOfRange => "position out of range",
            ListError::MissingComparator => "list has no comparator",
            ListError::NotFound => "no matching element",
            ListError::Busy => "list has open cursors",
            ListError::EmptyPosition => "cursor has no current element",
            ListError::Invalidated => "cursor position was removed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ListError {}

/// Error returned when destroying a list that still has open cursors.
///
/// Carries the list back so the caller can close its cursors and retry.
pub struct Busy<L> {
    list: L,
    open: usize,
}

impl<L> Busy<L> {
    pub(crate) fn new(list: L, open: usize) -> Self {
        Self { list, open }
    }

    /// Number of cursors that were still open.
    #[inline]
    pub fn open_cursors(&self) -> usize {
        self.open
    }

    /// Returns the list that could not be destroyed.
    pub fn into_inner(self) -> L {
        self.list
    }
}

impl<L> fmt::Debug for Busy<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Busy").field("open", &self.open).finish_non_exhaustive()
    }
}

impl<L> fmt::Display for Busy<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list has {} open cursor(s)", self.open)
    }
}

impl<L> std::error::Error for Busy<L> {}

impl<L> From<Busy<L>> for ListError {
    fn from(_: Busy<L>) -> Self {
        ListError::Busy
    }
}
