//! Ordering policy: sorted insertion and search by value.
//!
//! A list may carry a [`Comparator`]. Priority lists require one; on any other
//! list it enables [`List::add_sorted`] and the `*_find` family. Lists without
//! a comparator refuse these with [`ListError::MissingComparator`].
//!
//! Equality for search purposes is `compare(existing, value) == Equal`, so a
//! comparator keyed on one field finds elements by that field alone.
//!
//! # Example
//!
//! ```
//! use nexus_list::{AdapterType, Comparator, List};
//!
//! #[derive(Debug, PartialEq)]
//! struct Job {
//!     deadline: u32,
//!     name: &'static str,
//! }
//!
//! let by_deadline = Comparator::by_key(|job: &Job| job.deadline);
//! let mut jobs = List::create(AdapterType::Queue, Some(by_deadline)).unwrap();
//!
//! jobs.add_sorted(Job { deadline: 30, name: "report" }).unwrap();
//! jobs.add_sorted(Job { deadline: 10, name: "build" }).unwrap();
//!
//! let probe = Job { deadline: 30, name: "" };
//! assert_eq!(jobs.read_find(&probe).map(|j| j.name), Ok("report"));
//! assert_eq!(jobs.position_of(&probe), Ok(1));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::mem;

use crate::error::ListError;
use crate::handle::Link;
use crate::list::List;

/// Ordering function used for sorted insertion and value search.
pub struct Comparator<T> {
    cmp: Box<dyn Fn(&T, &T) -> Ordering>,
}

impl<T> Comparator<T> {
    /// Wraps an arbitrary comparison function.
    pub fn new<F>(cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self { cmp: Box::new(cmp) }
    }

    /// Orders by `T`'s [`Ord`] implementation, ascending.
    pub fn natural() -> Self
    where
        T: Ord + 'static,
    {
        Self::new(T::cmp)
    }

    /// Orders ascending by a key extracted from each element.
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
        T: 'static,
    {
        Self::new(move |a, b| key(a).cmp(&key(b)))
    }

    /// Returns a comparator with the opposite order.
    pub fn reversed(self) -> Self
    where
        T: 'static,
    {
        let cmp = self.cmp;
        Self::new(move |a, b| cmp(b, a))
    }

    /// Compares two elements.
    #[inline]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

impl<T> List<T> {
    /// Inserts `data` before the first element that orders strictly after
    /// it, or at the tail if there is none.
    ///
    /// Equal elements keep their arrival order.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] if the list has no comparator.
    pub fn add_sorted(&mut self, data: T) -> Result<(), ListError> {
        let cmp = self.comparator.as_ref().ok_or(ListError::MissingComparator)?;

        let mut key = self.head();
        while key.is_some() {
            let node = self.node(key);
            if cmp.compare(&node.data, &data) == Ordering::Greater {
                break;
            }
            key = node.next;
        }

        let new = self.alloc(data);
        if key.is_some() {
            self.link_before(key, new);
        } else {
            self.link_back(new);
        }
        Ok(())
    }

    /// Returns the first element, from the head, equal to `value`.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] without a comparator,
    /// [`ListError::NotFound`] if nothing matches.
    pub fn read_find(&self, value: &T) -> Result<&T, ListError> {
        let (key, _) = self.find_key(value)?;
        Ok(&self.node(key).data)
    }

    /// Removes and returns the first element equal to `value`.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] without a comparator,
    /// [`ListError::NotFound`] if nothing matches.
    pub fn remove_find(&mut self, value: &T) -> Result<T, ListError> {
        let (key, _) = self.find_key(value)?;
        Ok(self.unlink(key))
    }

    /// Replaces the first element equal to `value`, returning the old payload.
    ///
    /// The chain is not re-sorted.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] without a comparator,
    /// [`ListError::NotFound`] if nothing matches.
    pub fn edit_find(&mut self, new_data: T, value: &T) -> Result<T, ListError> {
        let (key, _) = self.find_key(value)?;
        Ok(mem::replace(&mut self.node_mut(key).data, new_data))
    }

    /// Returns the position of the first element equal to `value`.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] without a comparator,
    /// [`ListError::NotFound`] if nothing matches.
    pub fn position_of(&self, value: &T) -> Result<usize, ListError> {
        self.find_key(value).map(|(_, idx)| idx)
    }

    /// Returns `true` if some element is equal to `value`.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] without a comparator.
    pub fn contains(&self, value: &T) -> Result<bool, ListError> {
        match self.find_key(value) {
            Ok(_) => Ok(true),
            Err(ListError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Returns `true` if the chain is non-decreasing under the comparator.
    ///
    /// # Errors
    ///
    /// [`ListError::MissingComparator`] without a comparator.
    pub fn is_sorted(&self) -> Result<bool, ListError> {
        let cmp = self.comparator.as_ref().ok_or(ListError::MissingComparator)?;
        let mut iter = self.iter();
        let Some(mut prev) = iter.next() else {
            return Ok(true);
        };
        for cur in iter {
            if cmp.compare(prev, cur) == Ordering::Greater {
                return Ok(false);
            }
            prev = cur;
        }
        Ok(true)
    }

    /// Scans forward from `start` for a node equal to `value`.
    pub(crate) fn scan_from(&self, start: usize, value: &T) -> Result<usize, ListError> {
        let cmp = self.comparator.as_ref().ok_or(ListError::MissingComparator)?;

        let mut key = start;
        while key.is_some() {
            let node = self.node(key);
            if cmp.compare(&node.data, value) == Ordering::Equal {
                return Ok(key);
            }
            key = node.next;
        }
        Err(ListError::NotFound)
    }

    /// Returns the key and position of the first node equal to `value`.
    fn find_key(&self, value: &T) -> Result<(usize, usize), ListError> {
        let cmp = self.comparator.as_ref().ok_or(ListError::MissingComparator)?;

        let mut key = self.head();
        let mut idx = 0;
        while key.is_some() {
            let node = self.node(key);
            if cmp.compare(&node.data, value) == Ordering::Equal {
                return Ok((key, idx));
            }
            key = node.next;
            idx += 1;
        }
        Err(ListError::NotFound)
    }
}
