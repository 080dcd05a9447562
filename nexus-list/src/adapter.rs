//! Stack, queue and priority-list views over one chain.
//!
//! Every list carries an [`Adapter`] chosen at construction. The adapter
//! binds five verbs to concrete end operations:
//!
//! | Verb | `Stack` | `Queue` | `PriorityList` |
//! |------|---------|---------|----------------|
//! | `push` | add_last | add_last | add_sorted |
//! | `pop` | remove_last | remove_first | remove_first |
//! | `peek_next` | read_last | read_first | read_first |
//! | `peek_other_end` | read_first | read_last | read_last |
//! | `replace_next` | edit_last | edit_first | edit_first |
//!
//! Code written against the verbs does not care which discipline backs the
//! list, while the by-position and by-value operations stay available.
//!
//! # Example
//!
//! ```
//! use nexus_list::{Comparator, List};
//!
//! fn drain_all(list: &mut List<u32>) -> Vec<u32> {
//!     let mut out = Vec::new();
//!     while let Ok(v) = list.pop() {
//!         out.push(v);
//!     }
//!     out
//! }
//!
//! let mut stack = List::stack();
//! let mut queue = List::queue();
//! let mut prio = List::priority(Comparator::natural());
//!
//! for v in [2, 3, 1] {
//!     stack.push(v).unwrap();
//!     queue.push(v).unwrap();
//!     prio.push(v).unwrap();
//! }
//!
//! assert_eq!(drain_all(&mut stack), vec![1, 3, 2]);
//! assert_eq!(drain_all(&mut queue), vec![2, 3, 1]);
//! assert_eq!(drain_all(&mut prio), vec![1, 2, 3]);
//! ```

use crate::error::ListError;
use crate::list::List;

/// Adapter requested at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdapterType {
    /// Same as [`AdapterType::Stack`].
    #[default]
    Default,
    /// First-in first-out.
    Queue,
    /// Last-in first-out.
    Stack,
    /// Ordered by the list's comparator, lowest first.
    PriorityList,
}

impl AdapterType {
    /// Resolves the requested type to a concrete adapter.
    #[inline]
    pub const fn resolve(self) -> Adapter {
        match self {
            AdapterType::Default | AdapterType::Stack => Adapter::Stack,
            AdapterType::Queue => Adapter::Queue,
            AdapterType::PriorityList => Adapter::PriorityList,
        }
    }
}

/// Concrete verb binding of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adapter {
    /// Push and pop at the tail.
    Stack,
    /// Push at the tail, pop at the head.
    Queue,
    /// Push in comparator order, pop at the head.
    PriorityList,
}

/// One end of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    /// The head.
    First,
    /// The tail.
    Last,
}

impl End {
    /// Returns the other end.
    #[inline]
    pub const fn opposite(self) -> End {
        match self {
            End::First => End::Last,
            End::Last => End::First,
        }
    }
}

/// Where `push` puts new elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Append at the tail.
    Back,
    /// Insert in comparator order.
    Sorted,
}

impl Adapter {
    /// Where `push` inserts.
    #[inline]
    pub const fn placement(self) -> Placement {
        match self {
            Adapter::Stack | Adapter::Queue => Placement::Back,
            Adapter::PriorityList => Placement::Sorted,
        }
    }

    /// The end served by `pop`, `peek_next` and `replace_next`.
    #[inline]
    pub const fn next_end(self) -> End {
        match self {
            Adapter::Stack => End::Last,
            Adapter::Queue | Adapter::PriorityList => End::First,
        }
    }

    /// The end read by `peek_other_end`.
    #[inline]
    pub const fn other_end(self) -> End {
        self.next_end().opposite()
    }

    /// Returns `true` if this adapter cannot work without a comparator.
    #[inline]
    pub const fn requires_comparator(self) -> bool {
        matches!(self.placement(), Placement::Sorted)
    }
}

impl<T> List<T> {
    /// Inserts according to the adapter: at the tail, or in sorted order for
    /// a priority list.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] for a sorted push without a
    /// comparator; unreachable for lists built by the checked constructors.
    pub fn push(&mut self, data: T) -> Result<(), ListError> {
        match self.adapter.placement() {
            Placement::Back => {
                self.add_last(data);
                Ok(())
            }
            Placement::Sorted => self.add_sorted(data),
        }
    }

    /// Removes and returns the next element for this adapter.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if the list is empty.
    #[inline]
    pub fn pop(&mut self) -> Result<T, ListError> {
        self.remove_end(self.adapter.next_end())
    }

    /// Returns the element `pop` would remove.
    #[doc(alias = "top_next")]
    #[inline]
    pub fn peek_next(&self) -> Result<&T, ListError> {
        self.read_end(self.adapter.next_end())
    }

    /// Returns the element at the end opposite to `peek_next`.
    #[doc(alias = "back")]
    #[inline]
    pub fn peek_other_end(&self) -> Result<&T, ListError> {
        self.read_end(self.adapter.other_end())
    }

    /// Replaces the element `pop` would remove, returning the old payload.
    ///
    /// On a priority list this does not re-sort.
    #[doc(alias = "swap")]
    #[inline]
    pub fn replace_next(&mut self, new_data: T) -> Result<T, ListError> {
        self.edit_end(self.adapter.next_end(), new_data)
    }
}
