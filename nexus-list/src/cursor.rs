//! Detached cursors over a list's chain.
//!
//! A [`Cursor`] does not borrow its list. It stores the owner's [`ListId`] and
//! a generation-checked node handle, and every operation takes the list as
//! an argument. Any number of cursors can be open on one list while the list's
//! own end operations keep running; a cursor whose node was removed elsewhere
//! reports [`ListError::Invalidated`] instead of touching a reused slot, and
//! falls back to the empty sentinel.
//!
//! Cursors must be closed with [`Cursor::close`]. A list refuses
//! [`List::destroy`] while any of its cursors is open.
//!
//! # Example
//!
//! ```
//! use nexus_list::List;
//!
//! let mut list = List::queue();
//! for v in [10, 20, 30] {
//!     list.push(v).unwrap();
//! }
//!
//! let mut cursor = list.cursor(false); // at the tail
//! cursor.move_by(&list, -1).unwrap();
//! assert_eq!(cursor.read(&list), Ok(&20));
//!
//! assert_eq!(cursor.get(&mut list), Ok(20));
//! assert_eq!(cursor.read(&list), Ok(&10));
//!
//! assert!(list.destroy().is_err_and(|busy| busy.open_cursors() == 1));
//! ```
//!
//! Closing releases the list:
//!
//! ```
//! use nexus_list::List;
//!
//! let mut list: List<u32> = List::stack();
//! let cursor = list.cursor(true);
//! cursor.close(&mut list).unwrap();
//! assert!(list.destroy().is_ok());
//! ```

use core::cell::Cell;
use core::mem;

use crate::error::ListError;
use crate::handle::{Link, ListId, NodeHandle};
use crate::list::List;

/// A movable position in a list's chain.
///
/// The position is either a live node of the owning list or the empty
/// sentinel, reached when the list is empty or the last reachable node was
/// removed through this cursor.
///
/// If the node under the cursor is removed through the list or another
/// cursor, the next operation reports [`ListError::Invalidated`] and leaves
/// the cursor at the sentinel, where [`Cursor::insert`] re-seats it.
///
/// Every cursor must be handed back through [`Cursor::close`]. A cursor that
/// is simply dropped keeps its list's open count raised, and
/// [`List::destroy`] then returns [`Busy`](crate::Busy) for good.
#[derive(Debug)]
#[must_use = "cursors must be closed before their list can be destroyed"]
pub struct Cursor {
    owner: ListId,
    // Cell so read-only calls can drop a stale position
    position: Cell<Option<NodeHandle>>,
}

impl<T> List<T> {
    /// Opens a cursor at the head (`start_at_head`) or at the tail.
    ///
    /// On an empty list the cursor starts at the empty sentinel.
    pub fn cursor(&mut self, start_at_head: bool) -> Cursor {
        let key = if start_at_head {
            self.head()
        } else {
            self.tail()
        };
        self.open_cursors += 1;
        Cursor {
            owner: self.id(),
            position: Cell::new(key.get().map(|key| self.handle_of(key))),
        }
    }
}

impl Cursor {
    /// Returns the id of the list this cursor belongs to.
    #[inline]
    pub fn owner(&self) -> ListId {
        self.owner
    }

    /// Returns `true` if the cursor is at the empty sentinel.
    #[inline]
    pub fn is_empty_position(&self) -> bool {
        self.position.get().is_none()
    }

    /// Closes the cursor, releasing its hold on the list.
    ///
    /// # Errors
    ///
    /// Hands the cursor back if `list` is not its owner.
    pub fn close<T>(self, list: &mut List<T>) -> Result<(), Cursor> {
        if self.owner != list.id() {
            return Err(self);
        }
        debug_assert!(list.open_cursors > 0);
        list.open_cursors -= 1;
        Ok(())
    }

    /// Moves `delta` nodes toward the tail (positive) or head (negative).
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if the target lies outside the chain,
    /// including any nonzero move from the empty sentinel. The position is
    /// unchanged on failure.
    pub fn move_by<T>(&mut self, list: &List<T>, delta: isize) -> Result<(), ListError> {
        let Some(mut key) = self.current(list)? else {
            return if delta == 0 {
                Ok(())
            } else {
                Err(ListError::IndexOutOfRange)
            };
        };

        for _ in 0..delta.unsigned_abs() {
            let node = list.node(key);
            let step = if delta > 0 { node.next } else { node.prev };
            if step.is_none() {
                return Err(ListError::IndexOutOfRange);
            }
            key = step;
        }

        self.position.set(Some(list.handle_of(key)));
        Ok(())
    }

    /// Moves forward to the first node, starting at the current one, equal to
    /// `value` under the list's comparator. Never wraps around.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] without a comparator,
    /// [`ListError::NotFound`] if no node from here to the tail matches. The
    /// position is unchanged on failure.
    pub fn find<T>(&mut self, list: &List<T>, value: &T) -> Result<(), ListError> {
        let current = self.current(list)?;
        if !list.has_comparator() {
            return Err(ListError::MissingComparator);
        }
        let start = current.ok_or(ListError::NotFound)?;

        let key = list.scan_from(start, value)?;
        self.position.set(Some(list.handle_of(key)));
        Ok(())
    }

    /// Inserts `data` right after (`after`) or right before the current node
    /// without moving the cursor.
    ///
    /// At the empty sentinel the element goes to the tail (`after`) or the
    /// head, and the cursor adopts it.
    pub fn insert<T>(&mut self, list: &mut List<T>, data: T, after: bool) -> Result<(), ListError> {
        match self.current(list)? {
            Some(key) => {
                let new = list.alloc(data);
                if after {
                    list.link_after(key, new);
                } else {
                    list.link_before(key, new);
                }
            }
            None => {
                let new = list.alloc(data);
                if after {
                    list.link_back(new);
                } else {
                    list.link_front(new);
                }
                self.position.set(Some(list.handle_of(new)));
            }
        }
        Ok(())
    }

    /// Returns the payload at the current node.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyPosition`] at the empty sentinel.
    pub fn read<'a, T>(&self, list: &'a List<T>) -> Result<&'a T, ListError> {
        let key = self.current_key(list)?;
        Ok(&list.node(key).data)
    }

    /// Replaces the payload at the current node, returning the old one.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyPosition`] at the empty sentinel.
    pub fn edit<T>(&mut self, list: &mut List<T>, new_data: T) -> Result<T, ListError> {
        let key = self.current_key(list)?;
        Ok(mem::replace(&mut list.node_mut(key).data, new_data))
    }

    /// Removes the current node and returns its payload.
    ///
    /// The cursor steps to the previous node; if the removed node was the
    /// head it steps to the next one, and if it was the only node it moves
    /// to the empty sentinel.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyPosition`] at the empty sentinel.
    pub fn get<T>(&mut self, list: &mut List<T>) -> Result<T, ListError> {
        let key = self.current_key(list)?;
        let node = list.node(key);
        let target = if node.prev.is_some() {
            node.prev
        } else {
            node.next
        };

        let data = list.unlink(key);
        self.position.set(target.get().map(|key| list.handle_of(key)));
        Ok(data)
    }

    /// Returns the 0-based position of the current node.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyPosition`] at the empty sentinel.
    pub fn index<T>(&self, list: &List<T>) -> Result<usize, ListError> {
        let mut key = self.current_key(list)?;
        let mut idx = 0;
        loop {
            key = list.node(key).prev;
            if key.is_none() {
                return Ok(idx);
            }
            idx += 1;
        }
    }

    /// Resolves the position against `list`; `None` is the empty sentinel.
    ///
    /// A stale position is reported once and reset to the sentinel.
    fn current<T>(&self, list: &List<T>) -> Result<Option<usize>, ListError> {
        if self.owner != list.id() {
            return Err(ListError::InvalidHandle);
        }
        let Some(handle) = self.position.get() else {
            return Ok(None);
        };
        match list.resolve(handle) {
            Some(key) => Ok(Some(key)),
            None => {
                self.position.set(None);
                Err(ListError::Invalidated)
            }
        }
    }

    fn current_key<T>(&self, list: &List<T>) -> Result<usize, ListError> {
        self.current(list)?.ok_or(ListError::EmptyPosition)
    }
}
