//! Sentinel links, generation-checked node handles and list identities.
//!
//! Nodes refer to each other by slab key. A reserved sentinel (`usize::MAX`)
//! stands in for "no link" instead of `Option<usize>`, keeping nodes compact.
//! Cursors hold a [`NodeHandle`], which pairs the key with the node's stamp so
//! a reused slot is never mistaken for the node that used to live there.

use core::sync::atomic::{AtomicU64, Ordering};

/// A copyable link type with a sentinel "none" value.
pub(crate) trait Link: Copy + Eq {
    /// Sentinel value representing "no link".
    const NONE: Self;

    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Converts the sentinel into `None`.
    #[inline]
    fn get(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

impl Link for usize {
    // slab never hands out usize::MAX as a key
    const NONE: Self = usize::MAX;
}

/// Stable reference to one node of one list.
///
/// The stamp is unique per inserted node for the lifetime of its list, so a
/// handle to a removed node stays detectably stale even after its slab slot
/// has been reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeHandle {
    pub(crate) key: usize,
    pub(crate) stamp: u64,
}

impl NodeHandle {
    #[inline]
    pub(crate) const fn new(key: usize, stamp: u64) -> Self {
        Self { key, stamp }
    }
}

/// Process-unique identity of a list.
///
/// Cursors record the id of the list that opened them and refuse to operate
/// on any other list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(u64);

impl ListId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ListId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}
