//! Doubly-linked list over a slab-backed node arena.
//!
//! Nodes live in a [`slab::Slab`] and refer to each other by key, so the
//! chain never holds aliasing pointers. The list tracks head, tail, its
//! adapter binding and an optional comparator; see [`crate::adapter`] for the
//! stack/queue/priority verbs and [`crate::cursor`] for detached cursors.
//!
//! # Example
//!
//! ```
//! use nexus_list::{AdapterType, List};
//!
//! let mut list: List<u32> = List::create(AdapterType::Default, None).unwrap();
//!
//! list.add_last(1);
//! list.add_last(3);
//! list.add_at(2, 1).unwrap();
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.read_at(1), Ok(&2));
//!
//! assert_eq!(list.remove_first(), Ok(1));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
//! ```

use core::fmt;
use core::mem;

use slab::Slab;

use crate::adapter::{Adapter, AdapterType, End};
use crate::error::{Busy, ListError};
use crate::handle::{Link, ListId, NodeHandle};
use crate::order::Comparator;

/// A link in the chain.
pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) prev: usize,
    pub(crate) next: usize,
    pub(crate) stamp: u64,
}

/// A doubly-linked list with a fixed adapter binding.
///
/// # Type Parameters
///
/// - `T`: payload type. The list never inspects payloads except through its
///   comparator, and every removal hands the payload back to the caller.
///
/// # Example
///
/// ```
/// use nexus_list::List;
///
/// let mut queue: List<&str> = List::queue();
/// queue.push("a").unwrap();
/// queue.push("b").unwrap();
///
/// assert_eq!(queue.peek_next(), Ok(&"a"));
/// assert_eq!(queue.pop(), Ok("a"));
/// ```
pub struct List<T> {
    nodes: Slab<Node<T>>,
    head: usize,
    tail: usize,
    pub(crate) adapter: Adapter,
    pub(crate) comparator: Option<Comparator<T>>,
    pub(crate) open_cursors: usize,
    id: ListId,
    next_stamp: u64,
}

impl<T> List<T> {
    /// Creates an empty list.
    ///
    /// `AdapterType::Default` resolves to a stack.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::MissingComparator`] for
    /// [`AdapterType::PriorityList`] without a comparator.
    pub fn create(
        adapter: AdapterType,
        comparator: Option<Comparator<T>>,
    ) -> Result<Self, ListError> {
        Self::with_capacity(adapter, comparator, 0)
    }

    /// Creates an empty list with room for `capacity` nodes before the arena
    /// reallocates.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::MissingComparator`] for
    /// [`AdapterType::PriorityList`] without a comparator.
    pub fn with_capacity(
        adapter: AdapterType,
        comparator: Option<Comparator<T>>,
        capacity: usize,
    ) -> Result<Self, ListError> {
        let adapter = adapter.resolve();
        if adapter.requires_comparator() && comparator.is_none() {
            return Err(ListError::MissingComparator);
        }

        Ok(Self {
            nodes: Slab::with_capacity(capacity),
            head: usize::NONE,
            tail: usize::NONE,
            adapter,
            comparator,
            open_cursors: 0,
            id: ListId::next(),
            next_stamp: 0,
        })
    }

    /// Creates an empty LIFO list.
    pub fn stack() -> Self {
        Self::unchecked(Adapter::Stack, None)
    }

    /// Creates an empty FIFO list.
    pub fn queue() -> Self {
        Self::unchecked(Adapter::Queue, None)
    }

    /// Creates an empty priority list ordered by `comparator`.
    pub fn priority(comparator: Comparator<T>) -> Self {
        Self::unchecked(Adapter::PriorityList, Some(comparator))
    }

    fn unchecked(adapter: Adapter, comparator: Option<Comparator<T>>) -> Self {
        Self {
            nodes: Slab::new(),
            head: usize::NONE,
            tail: usize::NONE,
            adapter,
            comparator,
            open_cursors: 0,
            id: ListId::next(),
            next_stamp: 0,
        }
    }

    /// Destroys the list, dropping every remaining payload.
    ///
    /// # Errors
    ///
    /// Refused while any cursor opened on this list is still open. The list
    /// is handed back untouched inside [`Busy`].
    pub fn destroy(mut self) -> Result<(), Busy<Self>> {
        if self.open_cursors > 0 {
            let open = self.open_cursors;
            return Err(Busy::new(self, open));
        }
        self.clear();
        Ok(())
    }

    /// Returns this list's identity.
    #[inline]
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the adapter bound at construction.
    #[inline]
    pub fn adapter(&self) -> Adapter {
        self.adapter
    }

    /// Returns the ordering policy, if one was supplied.
    #[inline]
    pub fn comparator(&self) -> Option<&Comparator<T>> {
        self.comparator.as_ref()
    }

    /// Returns `true` if the list has an ordering policy.
    #[inline]
    pub fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }

    /// Returns the number of cursors that have not been closed.
    #[inline]
    pub fn open_cursors(&self) -> usize {
        self.open_cursors
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts at the head. O(1).
    pub fn add_first(&mut self, data: T) {
        let key = self.alloc(data);
        self.link_front(key);
    }

    /// Inserts at the tail. O(1).
    pub fn add_last(&mut self, data: T) {
        let key = self.alloc(data);
        self.link_back(key);
    }

    /// Inserts so that `data` ends up at position `idx`.
    ///
    /// Walks from whichever end is closer to `idx`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if `idx > len`.
    pub fn add_at(&mut self, data: T, idx: usize) -> Result<(), ListError> {
        if idx == self.len() {
            self.add_last(data);
            return Ok(());
        }

        let at = self.locate(idx)?;
        let key = self.alloc(data);
        self.link_before(at, key);
        Ok(())
    }

    // ========================================================================
    // Access by end
    // ========================================================================

    /// Returns the element at `end`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if the list is empty.
    pub fn read_end(&self, end: End) -> Result<&T, ListError> {
        let key = self.end_key(end)?;
        Ok(&self.nodes[key].data)
    }

    /// Removes and returns the element at `end`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if the list is empty.
    pub fn remove_end(&mut self, end: End) -> Result<T, ListError> {
        let key = self.end_key(end)?;
        Ok(self.unlink(key))
    }

    /// Replaces the element at `end`, returning the previous payload.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if the list is empty.
    pub fn edit_end(&mut self, end: End, new_data: T) -> Result<T, ListError> {
        let key = self.end_key(end)?;
        Ok(mem::replace(&mut self.nodes[key].data, new_data))
    }

    /// Returns the head element.
    #[inline]
    pub fn read_first(&self) -> Result<&T, ListError> {
        self.read_end(End::First)
    }

    /// Returns the tail element.
    #[inline]
    pub fn read_last(&self) -> Result<&T, ListError> {
        self.read_end(End::Last)
    }

    /// Removes and returns the head element.
    #[inline]
    pub fn remove_first(&mut self) -> Result<T, ListError> {
        self.remove_end(End::First)
    }

    /// Removes and returns the tail element.
    #[inline]
    pub fn remove_last(&mut self) -> Result<T, ListError> {
        self.remove_end(End::Last)
    }

    /// Replaces the head element, returning the previous payload.
    #[inline]
    pub fn edit_first(&mut self, new_data: T) -> Result<T, ListError> {
        self.edit_end(End::First, new_data)
    }

    /// Replaces the tail element, returning the previous payload.
    #[inline]
    pub fn edit_last(&mut self, new_data: T) -> Result<T, ListError> {
        self.edit_end(End::Last, new_data)
    }

    // ========================================================================
    // Access by position
    // ========================================================================

    /// Returns the element at position `idx`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if `idx >= len`.
    pub fn read_at(&self, idx: usize) -> Result<&T, ListError> {
        let key = self.locate(idx)?;
        Ok(&self.nodes[key].data)
    }

    /// Removes and returns the element at position `idx`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if `idx >= len`.
    pub fn remove_at(&mut self, idx: usize) -> Result<T, ListError> {
        let key = self.locate(idx)?;
        Ok(self.unlink(key))
    }

    /// Replaces the element at position `idx`, returning the previous payload.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if `idx >= len`.
    pub fn edit_at(&mut self, new_data: T, idx: usize) -> Result<T, ListError> {
        let key = self.locate(idx)?;
        Ok(mem::replace(&mut self.nodes[key].data, new_data))
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Removes every element.
    ///
    /// Open cursors stay open; their positions become stale and report
    /// [`ListError::Invalidated`].
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = usize::NONE;
        self.tail = usize::NONE;
    }

    /// Returns an iterator over references to elements, head to tail.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Walks the whole chain and panics if any structural invariant is
    /// violated: link symmetry, head/tail consistency, and node count.
    pub fn check_invariants(&self) {
        let mut count = 0;
        let mut prev = usize::NONE;
        let mut key = self.head;
        while key.is_some() {
            let node = &self.nodes[key];
            assert_eq!(node.prev, prev, "broken prev link at key {key}");
            count += 1;
            assert!(count <= self.nodes.len(), "cycle in chain");
            prev = key;
            key = node.next;
        }
        assert_eq!(prev, self.tail, "tail does not match chain end");
        assert_eq!(count, self.nodes.len(), "len does not match chain");
    }

    // ========================================================================
    // Internals shared with cursor and ordering code
    // ========================================================================

    #[inline]
    pub(crate) fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> usize {
        self.tail
    }

    #[inline]
    pub(crate) fn node(&self, key: usize) -> &Node<T> {
        &self.nodes[key]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: usize) -> &mut Node<T> {
        &mut self.nodes[key]
    }

    /// Returns the live key behind `handle`, or `None` if that node is gone.
    #[inline]
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Option<usize> {
        self.nodes
            .get(handle.key)
            .filter(|node| node.stamp == handle.stamp)
            .map(|_| handle.key)
    }

    #[inline]
    pub(crate) fn handle_of(&self, key: usize) -> NodeHandle {
        NodeHandle::new(key, self.nodes[key].stamp)
    }

    /// Stores `data` in a fresh, unlinked node.
    pub(crate) fn alloc(&mut self, data: T) -> usize {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.nodes.insert(Node {
            data,
            prev: usize::NONE,
            next: usize::NONE,
            stamp,
        })
    }

    pub(crate) fn link_front(&mut self, key: usize) {
        let head = self.head;
        let node = &mut self.nodes[key];
        node.prev = usize::NONE;
        node.next = head;

        if head.is_some() {
            self.nodes[head].prev = key;
        } else {
            self.tail = key;
        }
        self.head = key;
        self.debug_check_ends();
    }

    pub(crate) fn link_back(&mut self, key: usize) {
        let tail = self.tail;
        let node = &mut self.nodes[key];
        node.prev = tail;
        node.next = usize::NONE;

        if tail.is_some() {
            self.nodes[tail].next = key;
        } else {
            self.head = key;
        }
        self.tail = key;
        self.debug_check_ends();
    }

    /// Links `key` directly after the live node `after`.
    pub(crate) fn link_after(&mut self, after: usize, key: usize) {
        let next = self.nodes[after].next;
        let node = &mut self.nodes[key];
        node.prev = after;
        node.next = next;

        self.nodes[after].next = key;
        if next.is_some() {
            self.nodes[next].prev = key;
        } else {
            self.tail = key;
        }
        self.debug_check_ends();
    }

    /// Links `key` directly before the live node `before`.
    pub(crate) fn link_before(&mut self, before: usize, key: usize) {
        let prev = self.nodes[before].prev;
        let node = &mut self.nodes[key];
        node.next = before;
        node.prev = prev;

        self.nodes[before].prev = key;
        if prev.is_some() {
            self.nodes[prev].next = key;
        } else {
            self.head = key;
        }
        self.debug_check_ends();
    }

    /// Unlinks the live node `key`, frees its slot and returns its payload.
    pub(crate) fn unlink(&mut self, key: usize) -> T {
        let node = self.nodes.remove(key);

        if node.prev.is_some() {
            self.nodes[node.prev].next = node.next;
        } else {
            self.head = node.next;
        }

        if node.next.is_some() {
            self.nodes[node.next].prev = node.prev;
        } else {
            self.tail = node.prev;
        }

        self.debug_check_ends();
        node.data
    }

    fn end_key(&self, end: End) -> Result<usize, ListError> {
        let key = match end {
            End::First => self.head,
            End::Last => self.tail,
        };
        key.get().ok_or(ListError::IndexOutOfRange)
    }

    /// Finds the key at position `idx`, walking from the closer end.
    fn locate(&self, idx: usize) -> Result<usize, ListError> {
        let len = self.len();
        if idx >= len {
            return Err(ListError::IndexOutOfRange);
        }

        let mut key;
        if idx <= len - idx {
            key = self.head;
            for _ in 0..idx {
                key = self.nodes[key].next;
            }
        } else {
            key = self.tail;
            for _ in 0..(len - 1 - idx) {
                key = self.nodes[key].prev;
            }
        }
        Ok(key)
    }

    #[inline]
    fn debug_check_ends(&self) {
        debug_assert_eq!(self.head.is_none(), self.nodes.is_empty());
        debug_assert_eq!(self.tail.is_none(), self.nodes.is_empty());
        debug_assert!(self.head.is_none() || self.nodes[self.head].prev.is_none());
        debug_assert!(self.tail.is_none() || self.nodes[self.tail].next.is_none());
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("adapter", &self.adapter)
            .field("len", &self.len())
            .field("open_cursors", &self.open_cursors)
            .field("elements", &DebugChain(self))
            .finish()
    }
}

struct DebugChain<'a, T>(&'a List<T>);

impl<T: fmt::Debug> fmt::Debug for DebugChain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// Iterator over references to list elements, head to tail.
pub struct Iter<'a, T> {
    nodes: &'a Slab<Node<T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[u32]) -> List<u32> {
        let mut list = List::stack();
        for &v in values {
            list.add_last(v);
        }
        list
    }

    fn values(list: &List<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn new_list_is_empty() {
        let list: List<u32> = List::create(AdapterType::Default, None).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.adapter(), Adapter::Stack);
        assert_eq!(list.read_first(), Err(ListError::IndexOutOfRange));
        assert_eq!(list.read_last(), Err(ListError::IndexOutOfRange));
        list.check_invariants();
    }

    #[test]
    fn priority_requires_comparator() {
        let err = List::<u32>::create(AdapterType::PriorityList, None).unwrap_err();
        assert_eq!(err, ListError::MissingComparator);

        let list = List::<u32>::create(AdapterType::PriorityList, Some(Comparator::natural()));
        assert!(list.is_ok_and(|l| l.has_comparator()));
    }

    #[test]
    fn add_first_and_last() {
        let mut list = List::stack();
        list.add_last(2);
        list.add_first(1);
        list.add_last(3);

        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.read_first(), Ok(&1));
        assert_eq!(list.read_last(), Ok(&3));
        list.check_invariants();
    }

    #[test]
    fn add_at_every_position() {
        for idx in 0..=4 {
            let mut list = list_of(&[0, 1, 2, 3]);
            list.add_at(99, idx).unwrap();
            assert_eq!(list.read_at(idx), Ok(&99));
            assert_eq!(list.len(), 5);
            list.check_invariants();
        }
    }

    #[test]
    fn add_at_past_end_is_rejected() {
        let mut list = list_of(&[1, 2]);
        assert_eq!(list.add_at(9, 3), Err(ListError::IndexOutOfRange));
        assert_eq!(values(&list), vec![1, 2]);
    }

    #[test]
    fn add_at_on_empty() {
        let mut list: List<u32> = List::queue();
        list.add_at(7, 0).unwrap();
        assert_eq!(values(&list), vec![7]);
    }

    #[test]
    fn read_at_walks_from_both_ends() {
        let list = list_of(&[10, 11, 12, 13, 14, 15, 16]);
        for idx in 0..7 {
            assert_eq!(list.read_at(idx), Ok(&(10 + idx as u32)));
        }
        assert_eq!(list.read_at(7), Err(ListError::IndexOutOfRange));
    }

    #[test]
    fn remove_ends() {
        let mut list = list_of(&[1, 2, 3]);

        assert_eq!(list.remove_first(), Ok(1));
        assert_eq!(list.remove_last(), Ok(3));
        assert_eq!(list.remove_last(), Ok(2));
        assert_eq!(list.remove_first(), Err(ListError::IndexOutOfRange));
        assert!(list.is_empty());
        list.check_invariants();
    }

    #[test]
    fn remove_at_middle() {
        let mut list = list_of(&[1, 2, 3, 4]);

        assert_eq!(list.remove_at(2), Ok(3));
        assert_eq!(values(&list), vec![1, 2, 4]);
        assert_eq!(list.remove_at(3), Err(ListError::IndexOutOfRange));
        list.check_invariants();
    }

    #[test]
    fn edit_returns_previous_payload() {
        let mut list = list_of(&[1, 2, 3]);

        assert_eq!(list.edit_first(10), Ok(1));
        assert_eq!(list.edit_last(30), Ok(3));
        assert_eq!(list.edit_at(20, 1), Ok(2));
        assert_eq!(values(&list), vec![10, 20, 30]);

        assert_eq!(list.edit_at(0, 3), Err(ListError::IndexOutOfRange));
    }

    #[test]
    fn edit_on_empty_fails() {
        let mut list: List<u32> = List::stack();
        assert_eq!(list.edit_first(1), Err(ListError::IndexOutOfRange));
        assert!(list.is_empty());
    }

    #[test]
    fn clear_then_reuse() {
        let mut list = list_of(&[1, 2, 3]);
        list.clear();
        assert!(list.is_empty());
        list.check_invariants();

        list.add_last(4);
        assert_eq!(values(&list), vec![4]);
    }

    #[test]
    fn iter_double_ended() {
        let list = list_of(&[1, 2, 3, 4]);
        let mut iter = list.iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_rev() {
        let list = list_of(&[1, 2, 3]);
        let rev: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(rev, vec![3, 2, 1]);
    }

    #[test]
    fn into_iter_for_ref() {
        let list = list_of(&[5, 6]);
        let mut sum = 0;
        for v in &list {
            sum += v;
        }
        assert_eq!(sum, 11);
    }

    #[test]
    fn destroy_empty_and_full() {
        let list: List<u32> = List::stack();
        assert!(list.destroy().is_ok());

        let list = list_of(&[1, 2, 3]);
        assert!(list.destroy().is_ok());
    }

    #[test]
    fn destroy_drops_payloads() {
        use std::rc::Rc;

        let payload = Rc::new(5);
        let mut list = List::queue();
        list.add_last(Rc::clone(&payload));
        list.add_last(Rc::clone(&payload));
        assert_eq!(Rc::strong_count(&payload), 3);

        list.destroy().unwrap();
        assert_eq!(Rc::strong_count(&payload), 1);
    }

    #[test]
    fn slots_are_reused_with_fresh_stamps() {
        let mut list = list_of(&[1]);
        let old = list.handle_of(list.head());

        list.remove_first().unwrap();
        list.add_last(2);
        let new = list.handle_of(list.head());

        assert_eq!(old.key, new.key);
        assert_ne!(old.stamp, new.stamp);
        assert_eq!(list.resolve(old), None);
        assert_eq!(list.resolve(new), Some(new.key));
    }

    #[test]
    fn debug_output() {
        let list = list_of(&[1, 2]);
        let out = format!("{list:?}");
        assert!(out.contains("Stack"));
        assert!(out.contains("[1, 2]"));
    }
}
